//! Core value types shared by the catalog, the filter/sort manager and the UI.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Facet value meaning "no constraint" for category and difficulty selectors.
pub const ALL: &str = "all";

/// Language used when a localized text has no entry for the requested language.
pub const BASE_LANGUAGE: &str = "en";

/// Per-language text (title or description) keyed by language code.
///
/// Catalog documents may carry either a plain string or a `{lang: text}` map;
/// a plain string is stored under [`BASE_LANGUAGE`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawText", into = "BTreeMap<String, String>")]
pub struct LocalizedText(BTreeMap<String, String>);

/// Accepted on-disk shapes of a [`LocalizedText`].
#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    /// Single untranslated string.
    Plain(String),
    /// Language code to text.
    Map(BTreeMap<String, String>),
}

impl From<RawText> for LocalizedText {
    fn from(raw: RawText) -> Self {
        match raw {
            RawText::Plain(s) => Self(BTreeMap::from([(BASE_LANGUAGE.to_string(), s)])),
            RawText::Map(m) => Self(m),
        }
    }
}

impl From<LocalizedText> for BTreeMap<String, String> {
    fn from(text: LocalizedText) -> Self {
        text.0
    }
}

impl LocalizedText {
    /// What: Build a localized text from `(language, text)` pairs.
    ///
    /// Inputs:
    /// - `pairs`: Language code and text pairs
    ///
    /// Output:
    /// - `LocalizedText` holding every pair (later duplicates win)
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// What: Resolve the text for a language.
    ///
    /// Inputs:
    /// - `lang`: Requested language code
    ///
    /// Output:
    /// - Text in `lang`, else in [`BASE_LANGUAGE`], else the first available entry, else `""`
    #[must_use]
    pub fn get(&self, lang: &str) -> &str {
        self.0
            .get(lang)
            .or_else(|| self.0.get(BASE_LANGUAGE))
            .or_else(|| self.0.values().next())
            .map_or("", String::as_str)
    }

    /// Whether no language has an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One playable game in the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Unique identifier within the catalog (e.g., `game001`).
    pub id: String,
    /// Localized display title.
    pub title: LocalizedText,
    /// Localized short description.
    #[serde(default)]
    pub description: LocalizedText,
    /// Category slug (e.g., `puzzle`).
    pub category: String,
    /// Average rating on a 0–5 scale with one decimal.
    pub rating: f64,
    /// Number of recorded plays.
    #[serde(default)]
    pub play_count: u64,
    /// Editor's pick flag.
    #[serde(default)]
    pub featured: bool,
    /// Recently added flag.
    #[serde(default, rename = "new")]
    pub is_new: bool,
    /// Trending flag.
    #[serde(default)]
    pub hot: bool,
    /// Free-form tags, unique per item.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Date the game was added to the catalog.
    pub added_date: NaiveDate,
    /// Ranking score; derived from rating and plays when the catalog omits it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity_score: Option<u32>,
    /// Difficulty slug (e.g., `easy`), when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    /// Declared minimum player age; 0 when not declared.
    #[serde(default)]
    pub min_age: u32,
    /// Thumbnail image location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Location of the embedded game.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CatalogItem {
    /// What: Effective popularity score used for ranking.
    ///
    /// Output:
    /// - The catalog score when present, else [`derive_popularity`] of rating and plays
    #[must_use]
    pub fn popularity(&self) -> u32 {
        self.popularity_score
            .unwrap_or_else(|| derive_popularity(self.rating, self.play_count))
    }

    /// Whether the item carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// What: Derive a popularity score from rating and play count.
///
/// Inputs:
/// - `rating`: 0–5 rating
/// - `play_count`: Number of plays
///
/// Output:
/// - `round(rating * 20 + log10(play_count + 1) * 10)`, saturating at `u32::MAX`
///
/// Details:
/// - A perfect rating contributes 100 points; every tenfold increase in plays adds 10.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn derive_popularity(rating: f64, play_count: u64) -> u32 {
    let plays = (play_count as f64 + 1.0).log10() * 10.0;
    let score = rating.clamp(0.0, 5.0).mul_add(20.0, plays).round();
    if score >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        score.max(0.0) as u32
    }
}

/// Inclusive rating bounds within 0–5.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingRange {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
}

impl RatingRange {
    /// Lowest possible rating.
    pub const FLOOR: f64 = 0.0;
    /// Highest possible rating.
    pub const CEILING: f64 = 5.0;

    /// What: Build a range, keeping `min <= max` within 0–5.
    ///
    /// Inputs:
    /// - `min`, `max`: Requested bounds
    ///
    /// Output:
    /// - Range with both bounds clamped to 0–5 and swapped when inverted
    ///
    /// Details:
    /// - NaN bounds are replaced by the corresponding default bound.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let min = if min.is_nan() { Self::FLOOR } else { min };
        let max = if max.is_nan() { Self::CEILING } else { max };
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min: lo.clamp(Self::FLOOR, Self::CEILING),
            max: hi.clamp(Self::FLOOR, Self::CEILING),
        }
    }

    /// Whether `rating` lies within the inclusive bounds.
    #[must_use]
    pub fn contains(&self, rating: f64) -> bool {
        self.min <= rating && rating <= self.max
    }
}

impl Default for RatingRange {
    fn default() -> Self {
        Self {
            min: Self::FLOOR,
            max: Self::CEILING,
        }
    }
}

/// Three-way featured selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeaturedFilter {
    /// No constraint.
    #[default]
    All,
    /// Only featured games.
    Featured,
    /// Only games that are not featured.
    NotFeatured,
}

impl FeaturedFilter {
    /// Every selector value in display order.
    pub const VALUES: [Self; 3] = [Self::All, Self::Featured, Self::NotFeatured];

    /// Return the string key used in settings and control values.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Featured => "featured",
            Self::NotFeatured => "not_featured",
        }
    }

    /// Parse a selector from its key (case-insensitive, `-` accepted for `_`).
    #[must_use]
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "all" | "" => Some(Self::All),
            "featured" | "yes" | "true" => Some(Self::Featured),
            "not_featured" | "no" | "false" => Some(Self::NotFeatured),
            _ => None,
        }
    }

    /// Whether an item with the given featured flag passes.
    #[must_use]
    pub const fn accepts(self, featured: bool) -> bool {
        match self {
            Self::All => true,
            Self::Featured => featured,
            Self::NotFeatured => !featured,
        }
    }
}

/// Active filter state of the catalog view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Category slug or [`ALL`].
    pub category: String,
    /// Selected tags; an item passes when it carries any of them.
    pub tags: BTreeSet<String>,
    /// Inclusive rating bounds.
    pub rating: RatingRange,
    /// Difficulty slug or [`ALL`].
    pub difficulty: String,
    /// Selected age; 0 means no constraint, otherwise exact match.
    pub min_age: u32,
    /// Featured selector.
    pub featured: FeaturedFilter,
    /// Case-insensitive text search; empty means no constraint.
    #[serde(default)]
    pub query: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            category: ALL.to_string(),
            tags: BTreeSet::new(),
            rating: RatingRange::default(),
            difficulty: ALL.to_string(),
            min_age: 0,
            featured: FeaturedFilter::All,
            query: String::new(),
        }
    }
}

/// Sortable catalog fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Derived popularity ranking (default).
    PopularityScore,
    /// Average rating.
    Rating,
    /// Number of plays.
    PlayCount,
    /// Localized title, case-insensitive.
    Title,
    /// Category slug, case-insensitive.
    Category,
    /// Date added.
    AddedDate,
}

impl SortField {
    /// Every sortable field in display order.
    pub const VALUES: [Self; 6] = [
        Self::PopularityScore,
        Self::Rating,
        Self::PlayCount,
        Self::Title,
        Self::Category,
        Self::AddedDate,
    ];

    /// Return the key used in control values and exports.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::PopularityScore => "popularityScore",
            Self::Rating => "rating",
            Self::PlayCount => "playCount",
            Self::Title => "title",
            Self::Category => "category",
            Self::AddedDate => "addedDate",
        }
    }

    /// What: Parse a sort field from its key or aliases.
    ///
    /// Inputs:
    /// - `s`: Field key (case-insensitive; camelCase, snake_case and short aliases accepted)
    ///
    /// Output:
    /// - `Some(SortField)` on recognized value; `None` otherwise.
    #[must_use]
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', '-'], "").as_str() {
            "popularityscore" | "popularity" => Some(Self::PopularityScore),
            "rating" => Some(Self::Rating),
            "playcount" | "plays" => Some(Self::PlayCount),
            "title" | "name" => Some(Self::Title),
            "category" => Some(Self::Category),
            "addeddate" | "added" | "date" => Some(Self::AddedDate),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortDirection {
    /// Return the opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Return the key used in control values.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse a direction from `asc`/`desc` (case-insensitive).
    #[must_use]
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Some(Self::Asc),
            "desc" | "descending" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Active ordering of the catalog view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to order by.
    pub field: SortField,
    /// Direction.
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::PopularityScore,
            direction: SortDirection::Desc,
        }
    }
}

/// Legal facet values derived from the loaded catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Distinct categories, alphabetical.
    pub categories: Vec<String>,
    /// Distinct tags, alphabetical.
    pub tags: Vec<String>,
    /// Distinct declared difficulties, alphabetical.
    pub difficulties: Vec<String>,
    /// Distinct declared non-zero ages, ascending.
    pub min_ages: Vec<u32>,
}

/// Item counts after and before filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    /// Items passing the active filters.
    pub filtered: usize,
    /// Items in the catalog.
    pub total: usize,
}

/// Serialization format of an export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON array.
    Json,
    /// Flattened comma-separated table.
    Csv,
}

impl ExportFormat {
    /// MIME type of the exported document.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }

    /// File extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Parse a format from `json`/`csv` (case-insensitive).
    #[must_use]
    pub fn from_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}
