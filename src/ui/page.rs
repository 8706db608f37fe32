//! Page model: the translatable elements of the site shell.
//!
//! Each element declares its role once at construction; the role decides which
//! attribute receives translated text, so applying a language never has to
//! inspect element kinds.

/// What an element is, as far as translation is concerned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ElementRole {
    /// Text-bearing element (headings, links, labels, paragraphs).
    #[default]
    Content,
    /// Text or search input; translated text is its placeholder.
    TextInput,
    /// Button-type input; translated text is its value.
    ButtonInput,
    /// Image; translated text is its alternative text.
    Image,
}

/// Attribute that receives translated text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextTarget {
    /// Element content.
    Text,
    /// Input placeholder.
    Placeholder,
    /// Input value.
    Value,
    /// Image alternative text.
    Alt,
}

impl ElementRole {
    /// Attribute written by `apply_language` for this role.
    #[must_use]
    pub const fn target(self) -> TextTarget {
        match self {
            Self::Content => TextTarget::Text,
            Self::TextInput => TextTarget::Placeholder,
            Self::ButtonInput => TextTarget::Value,
            Self::Image => TextTarget::Alt,
        }
    }
}

/// One element of the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    /// Element id, when addressable.
    pub id: Option<String>,
    /// Translation role.
    pub role: ElementRole,
    /// Translation key (e.g., `nav.home`); untagged elements are left alone.
    pub i18n_key: Option<String>,
    /// Content text.
    pub text: String,
    /// Placeholder text.
    pub placeholder: String,
    /// Value text.
    pub value: String,
    /// Alternative text.
    pub alt: String,
}

impl Element {
    /// Create an element with `role` and no id or key.
    #[must_use]
    pub fn new(role: ElementRole) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    /// Builder: set the element id.
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Builder: tag the element with a translation key.
    #[must_use]
    pub fn with_key(mut self, key: &str) -> Self {
        self.i18n_key = Some(key.to_string());
        self
    }

    /// Current text of one attribute.
    #[must_use]
    pub fn attr(&self, target: TextTarget) -> &str {
        match target {
            TextTarget::Text => &self.text,
            TextTarget::Placeholder => &self.placeholder,
            TextTarget::Value => &self.value,
            TextTarget::Alt => &self.alt,
        }
    }

    /// Overwrite one attribute.
    pub fn set_attr(&mut self, target: TextTarget, text: String) {
        match target {
            TextTarget::Text => self.text = text,
            TextTarget::Placeholder => self.placeholder = text,
            TextTarget::Value => self.value = text,
            TextTarget::Alt => self.alt = text,
        }
    }

    /// Text in the attribute this element's role targets.
    #[must_use]
    pub fn translated_text(&self) -> &str {
        self.attr(self.role.target())
    }
}

/// Document-level state plus the element list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    /// Document language attribute.
    pub lang: String,
    /// Document title.
    pub title: String,
    /// Meta description.
    pub meta_description: String,
    /// Meta keywords.
    pub meta_keywords: String,
    /// Elements in document order.
    pub elements: Vec<Element>,
}

impl Page {
    /// Create a page holding `elements`.
    #[must_use]
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements,
            ..Self::default()
        }
    }

    /// What: Build the standard site shell.
    ///
    /// Output:
    /// - Page with navigation, search box, logo, filter panel container, grid and footer
    #[must_use]
    pub fn site_shell() -> Self {
        Self::new(vec![
            Element::new(ElementRole::Image)
                .with_id("logo")
                .with_key("site.logo_alt"),
            Element::new(ElementRole::Content)
                .with_id("nav-home")
                .with_key("nav.home"),
            Element::new(ElementRole::Content)
                .with_id("nav-games")
                .with_key("nav.games"),
            Element::new(ElementRole::Content)
                .with_id("nav-about")
                .with_key("nav.about"),
            Element::new(ElementRole::TextInput)
                .with_id("search-input")
                .with_key("search.placeholder"),
            Element::new(ElementRole::ButtonInput)
                .with_id("search-button")
                .with_key("search.button"),
            Element::new(ElementRole::Content).with_id("filter-panel"),
            Element::new(ElementRole::Content)
                .with_id("games-heading")
                .with_key("games.heading"),
            Element::new(ElementRole::Content).with_id("games-grid"),
            Element::new(ElementRole::Content)
                .with_id("footer")
                .with_key("footer.copyright"),
        ])
    }

    /// Element with the given id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id.as_deref() == Some(id))
    }

    /// Whether an element with the given id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Elements tagged with a translation key.
    pub fn translatable(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.i18n_key.is_some())
    }
}
