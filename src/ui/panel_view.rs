//! Render model of the advanced filter panel.
//!
//! The panel never touches markup; it produces a [`FilterPanelView`] that a
//! renderer (the CLI printer, a template) turns into controls.

use serde::Serialize;

use crate::i18n::{TextLookup, format_text};
use crate::state::{
    ALL, FeaturedFilter, FilterCriteria, FilterOptions, FilterStats, SortDirection, SortField,
    SortSpec,
};

/// One selectable choice of a control.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    /// Value submitted when chosen.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Whether this choice is the active one.
    pub selected: bool,
}

impl ChoiceView {
    fn new(value: impl Into<String>, label: impl Into<String>, selected: bool) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            selected,
        }
    }
}

/// Everything a renderer needs to draw the panel.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FilterPanelView {
    /// Panel heading.
    pub title: String,
    /// Whether the panel body is hidden.
    pub collapsed: bool,
    /// Label of the expand/collapse toggle.
    pub toggle_label: String,
    /// Category choices, `all` first.
    pub categories: Vec<ChoiceView>,
    /// Difficulty choices, `all` first.
    pub difficulties: Vec<ChoiceView>,
    /// Age choices, "any age" (0) first.
    pub ages: Vec<ChoiceView>,
    /// Featured choices.
    pub featured: Vec<ChoiceView>,
    /// Tag chips; `selected` marks active tags.
    pub tags: Vec<ChoiceView>,
    /// Lower rating bound.
    pub rating_min: f64,
    /// Upper rating bound.
    pub rating_max: f64,
    /// Free-text query.
    pub query: String,
    /// Sort field choices.
    pub sort_fields: Vec<ChoiceView>,
    /// Active sort direction.
    pub sort_direction: SortDirection,
    /// Label of the sort-direction toggle.
    pub sort_direction_label: String,
    /// "Showing N of M games" line.
    pub stats_text: String,
}

/// Display labels used by the panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PanelLabels {
    /// Panel heading.
    pub title: String,
    /// Toggle label while expanded.
    pub collapse: String,
    /// Toggle label while collapsed.
    pub expand: String,
    /// Label of the `all` choice.
    pub all: String,
    /// Label of the zero age choice.
    pub any_age: String,
    /// Template of age choices; `{age}` is substituted.
    pub age_template: String,
    /// Featured choice labels, in [`FeaturedFilter::VALUES`] order.
    pub featured: [String; 3],
    /// Sort field labels, in [`SortField::VALUES`] order.
    pub sort_fields: [String; 6],
    /// Ascending toggle label.
    pub ascending: String,
    /// Descending toggle label.
    pub descending: String,
    /// Stats template; `{filtered}` and `{total}` are substituted.
    pub stats_template: String,
}

impl Default for PanelLabels {
    fn default() -> Self {
        Self {
            title: "Advanced Filters".into(),
            collapse: "Hide filters".into(),
            expand: "Show filters".into(),
            all: "All".into(),
            any_age: "Any age".into(),
            age_template: "{age}+".into(),
            featured: ["All games".into(), "Featured only".into(), "Not featured".into()],
            sort_fields: [
                "Popularity".into(),
                "Rating".into(),
                "Play count".into(),
                "Title".into(),
                "Category".into(),
                "Date added".into(),
            ],
            ascending: "Ascending".into(),
            descending: "Descending".into(),
            stats_template: "Showing {filtered} of {total} games".into(),
        }
    }
}

impl PanelLabels {
    /// What: Resolve every label through a translation source.
    ///
    /// Inputs:
    /// - `texts`: Translation source; English defaults are used for missing keys
    ///
    /// Output:
    /// - Localized labels
    pub fn resolve(texts: &impl TextLookup) -> Self {
        let d = Self::default();
        let t = |key: &str, fallback: &str| texts.text(key, Some(fallback));
        let featured_keys = ["filters.featured.all", "filters.featured.only", "filters.featured.not"];
        let sort_keys = [
            "filters.sort.popularity",
            "filters.sort.rating",
            "filters.sort.plays",
            "filters.sort.title",
            "filters.sort.category",
            "filters.sort.added",
        ];
        Self {
            title: t("filters.title", &d.title),
            collapse: t("filters.collapse", &d.collapse),
            expand: t("filters.expand", &d.expand),
            all: t("filters.all", &d.all),
            any_age: t("filters.any_age", &d.any_age),
            age_template: t("filters.age_template", &d.age_template),
            featured: std::array::from_fn(|i| t(featured_keys[i], &d.featured[i])),
            sort_fields: std::array::from_fn(|i| t(sort_keys[i], &d.sort_fields[i])),
            ascending: t("filters.sort.asc", &d.ascending),
            descending: t("filters.sort.desc", &d.descending),
            stats_template: t("filters.stats", &d.stats_template),
        }
    }

    /// Label of a sort field.
    #[must_use]
    pub fn sort_field(&self, field: SortField) -> &str {
        SortField::VALUES
            .iter()
            .position(|f| *f == field)
            .map_or("", |i| self.sort_fields[i].as_str())
    }

    /// Label of a featured choice.
    #[must_use]
    pub fn featured(&self, value: FeaturedFilter) -> &str {
        FeaturedFilter::VALUES
            .iter()
            .position(|f| *f == value)
            .map_or("", |i| self.featured[i].as_str())
    }
}

/// Inputs of one render pass.
pub struct ViewInput<'a> {
    /// Choices derived from the whole catalog.
    pub options: &'a FilterOptions,
    /// Active criteria (tags are the panel's own selection).
    pub criteria: &'a FilterCriteria,
    /// Active sort.
    pub sort: SortSpec,
    /// Current counts.
    pub stats: FilterStats,
    /// Whether the panel is collapsed.
    pub collapsed: bool,
}

/// What: Build the panel view.
///
/// Inputs:
/// - `input`: Options, active criteria, sort, stats and collapse state
/// - `labels`: Display labels
///
/// Output:
/// - Complete view with the active choice of every control marked
///
/// Details:
/// - Tag chips are listed for every catalog tag; selected tags unknown to the catalog are skipped.
pub fn build_view(input: &ViewInput<'_>, labels: &PanelLabels) -> FilterPanelView {
    let criteria = input.criteria;
    let with_all = |values: &[String], active: &str| {
        std::iter::once(ChoiceView::new(ALL, labels.all.clone(), active == ALL))
            .chain(
                values
                    .iter()
                    .map(|v| ChoiceView::new(v.clone(), v.clone(), v == active)),
            )
            .collect::<Vec<_>>()
    };

    let ages = std::iter::once(ChoiceView::new("0", labels.any_age.clone(), criteria.min_age == 0))
        .chain(input.options.min_ages.iter().filter(|a| **a > 0).map(|age| {
            ChoiceView::new(
                age.to_string(),
                format_text(&labels.age_template, &[("age", age)]),
                *age == criteria.min_age,
            )
        }))
        .collect();

    let featured = FeaturedFilter::VALUES
        .iter()
        .map(|f| ChoiceView::new(f.as_key(), labels.featured(*f), *f == criteria.featured))
        .collect();

    let tags = input
        .options
        .tags
        .iter()
        .map(|tag| ChoiceView::new(tag.clone(), tag.clone(), criteria.tags.contains(tag)))
        .collect();

    let sort_fields = SortField::VALUES
        .iter()
        .map(|f| ChoiceView::new(f.as_key(), labels.sort_field(*f), *f == input.sort.field))
        .collect();

    let sort_direction_label = match input.sort.direction {
        SortDirection::Asc => labels.ascending.clone(),
        SortDirection::Desc => labels.descending.clone(),
    };

    FilterPanelView {
        title: labels.title.clone(),
        collapsed: input.collapsed,
        toggle_label: if input.collapsed {
            labels.expand.clone()
        } else {
            labels.collapse.clone()
        },
        categories: with_all(&input.options.categories, &criteria.category),
        difficulties: with_all(&input.options.difficulties, &criteria.difficulty),
        ages,
        featured,
        tags,
        rating_min: criteria.rating.min,
        rating_max: criteria.rating.max,
        query: criteria.query.clone(),
        sort_fields,
        sort_direction: input.sort.direction,
        sort_direction_label,
        stats_text: format_text(
            &labels.stats_template,
            &[("filtered", &input.stats.filtered), ("total", &input.stats.total)],
        ),
    }
}
