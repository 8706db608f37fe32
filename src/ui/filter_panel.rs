//! Advanced filter panel: translates control input into manager calls.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tokio::sync::broadcast;

use crate::events::{EventBus, FilterChange};
use crate::logic::{FilterSortManager, SerializeError, export_file_name};
use crate::state::{
    ALL, ExportFormat, FeaturedFilter, FilterCriteria, RatingRange, SortDirection,
};
use crate::ui::page::Page;
use crate::ui::panel_view::{FilterPanelView, PanelLabels, ViewInput, build_view};

/// Values of the panel's form controls, except the tag chips.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterControls {
    /// Category select (`all` for any).
    pub category: String,
    /// Lower rating input.
    pub rating_min: f64,
    /// Upper rating input.
    pub rating_max: f64,
    /// Difficulty select (`all` for any).
    pub difficulty: String,
    /// Age select (0 for any).
    pub min_age: u32,
    /// Featured select.
    pub featured: FeaturedFilter,
    /// Search box.
    pub query: String,
}

impl Default for FilterControls {
    fn default() -> Self {
        Self::from_criteria(&FilterCriteria::default())
    }
}

impl FilterControls {
    /// Mirror the control-backed fields of `criteria`.
    #[must_use]
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        Self {
            category: criteria.category.clone(),
            rating_min: criteria.rating.min,
            rating_max: criteria.rating.max,
            difficulty: criteria.difficulty.clone(),
            min_age: criteria.min_age,
            featured: criteria.featured,
            query: criteria.query.clone(),
        }
    }

    /// What: Combine the control values with a tag selection.
    ///
    /// Inputs:
    /// - `tags`: Selected tags
    ///
    /// Output:
    /// - Criteria; blank selects read as `all`
    #[must_use]
    pub fn to_criteria(&self, tags: &BTreeSet<String>) -> FilterCriteria {
        let or_all = |s: &str| {
            let s = s.trim();
            if s.is_empty() { ALL.to_string() } else { s.to_string() }
        };
        FilterCriteria {
            category: or_all(&self.category),
            tags: tags.clone(),
            rating: RatingRange::new(self.rating_min, self.rating_max),
            difficulty: or_all(&self.difficulty),
            min_age: self.min_age,
            featured: self.featured,
            query: self.query.trim().to_string(),
        }
    }
}

/// Asks the user which export format to produce.
pub trait ExportPrompt {
    /// Chosen format, or `None` when the user cancels.
    fn choose_format(&mut self) -> Option<ExportFormat>;
}

/// Prompt with a preset answer (CLI flag, tests).
#[derive(Clone, Copy, Debug)]
pub struct FixedPrompt(pub Option<ExportFormat>);

impl ExportPrompt for FixedPrompt {
    fn choose_format(&mut self) -> Option<ExportFormat> {
        self.0
    }
}

/// Receives an exported document (the "download").
pub trait ExportTarget {
    /// What: Deliver an exported document.
    ///
    /// Inputs:
    /// - `file_name`: Suggested file name
    /// - `mime_type`: Content type
    /// - `contents`: Serialized document
    ///
    /// Output:
    /// - Where the document ended up
    ///
    /// # Errors
    /// - Returns `Err` when the document cannot be stored
    fn deliver(&mut self, file_name: &str, mime_type: &str, contents: &str) -> io::Result<PathBuf>;
}

/// Target writing exports into a directory.
#[derive(Clone, Debug)]
pub struct DirectoryTarget {
    /// Destination directory (created on demand).
    dir: PathBuf,
}

impl DirectoryTarget {
    /// Create a target writing into `dir`.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Destination directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportTarget for DirectoryTarget {
    fn deliver(&mut self, file_name: &str, mime_type: &str, contents: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, contents)?;
        tracing::info!(
            path = %path.display(),
            mime = mime_type,
            bytes = contents.len(),
            "[Export] Wrote export file"
        );
        Ok(path)
    }
}

/// Errors raised while exporting results.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The view could not be serialized.
    #[error("failed to serialize export: {0}")]
    Serialize(#[from] SerializeError),
    /// The export file could not be written.
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
}

/// The advanced filter panel bound to one page container.
///
/// Owns the authoritative tag selection; the rendered view is derived from it
/// and never read back.
pub struct FilterPanel {
    /// Injected filter/sort state.
    manager: FilterSortManager,
    /// Bound container id; `None` keeps every handler a no-op.
    container: Option<String>,
    /// Presentational collapse flag.
    collapsed: bool,
    /// Selected tag chips.
    selected_tags: BTreeSet<String>,
    /// Last control values.
    controls: FilterControls,
    /// Display labels in the active language.
    labels: PanelLabels,
    /// Filter-change listeners.
    events: EventBus<FilterChange>,
}

impl FilterPanel {
    /// What: Create an unbound panel over `manager`.
    ///
    /// Inputs:
    /// - `manager`: Filter/sort state the panel drives
    ///
    /// Output:
    /// - Panel with controls mirroring the manager's current criteria
    #[must_use]
    pub fn new(manager: FilterSortManager) -> Self {
        let criteria = manager.current_filters();
        Self {
            controls: FilterControls::from_criteria(&criteria),
            selected_tags: criteria.tags,
            manager,
            container: None,
            collapsed: false,
            labels: PanelLabels::default(),
            events: EventBus::default(),
        }
    }

    /// What: Bind the panel to a container of `page`.
    ///
    /// Inputs:
    /// - `page`: Page holding the container
    /// - `container`: Container element id
    ///
    /// Output:
    /// - `true` when bound; `false` (logged, panel stays inert) when the container is missing
    pub fn init(&mut self, page: &Page, container: &str) -> bool {
        if !page.contains(container) {
            tracing::warn!(container = %container, "[FilterPanel] Container not found; panel disabled");
            return false;
        }
        self.container = Some(container.to_string());
        tracing::debug!(container = %container, "[FilterPanel] Bound to container");
        true
    }

    /// Whether the panel is bound to a container.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.container.is_some()
    }

    /// Filter/sort state behind the panel.
    #[must_use]
    pub const fn manager(&self) -> &FilterSortManager {
        &self.manager
    }

    /// Register a filter-change listener.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<FilterChange> {
        self.events.subscribe()
    }

    /// Selected tag chips.
    #[must_use]
    pub const fn selected_tags(&self) -> &BTreeSet<String> {
        &self.selected_tags
    }

    /// Whether the panel body is hidden.
    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// What: Build the panel's view model.
    ///
    /// Output:
    /// - View reflecting the manager's criteria, sort and stats plus the tag selection
    #[must_use]
    pub fn render(&self) -> FilterPanelView {
        let options = self.manager.filter_options();
        let criteria = self.controls.to_criteria(&self.selected_tags);
        build_view(
            &ViewInput {
                options: &options,
                criteria: &criteria,
                sort: self.manager.current_sort(),
                stats: self.manager.filter_stats(),
                collapsed: self.collapsed,
            },
            &self.labels,
        )
    }

    /// Flip the collapsed flag.
    pub fn toggle_panel(&mut self) {
        if !self.is_bound() {
            return;
        }
        self.collapsed = !self.collapsed;
        tracing::debug!(collapsed = self.collapsed, "[FilterPanel] Toggled panel");
    }

    /// What: Apply new control values.
    ///
    /// Inputs:
    /// - `controls`: Values of the form controls
    ///
    /// Details:
    /// - Tags come from the panel's own selection; listeners receive the new view.
    pub fn handle_filter_change(&mut self, controls: FilterControls) {
        if !self.is_bound() {
            return;
        }
        self.controls = controls;
        self.apply_filters();
    }

    /// What: Apply a sort chosen in the sort controls.
    ///
    /// Inputs:
    /// - `field`: Sort field key
    /// - `direction`: Sort direction
    ///
    /// Output:
    /// - `true` when applied; `false` for an unknown field or an unbound panel
    pub fn handle_sort_change(&mut self, field: &str, direction: SortDirection) -> bool {
        if !self.is_bound() || !self.manager.set_sort(field, direction) {
            return false;
        }
        self.notify();
        true
    }

    /// Flip the sort direction, keeping the field.
    pub fn toggle_sort_order(&mut self) {
        if !self.is_bound() {
            return;
        }
        let mut spec = self.manager.current_sort();
        spec.direction = spec.direction.toggled();
        self.manager.set_sort_spec(spec);
        self.notify();
    }

    /// What: Toggle one tag chip.
    ///
    /// Inputs:
    /// - `tag`: Tag to add or remove
    ///
    /// Output:
    /// - `true` when the selection changed; `false` for a tag not in the catalog or an unbound panel
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if !self.is_bound() {
            return false;
        }
        if !self.manager.filter_options().tags.iter().any(|t| t == tag) {
            tracing::debug!(tag = %tag, "[FilterPanel] Ignoring unknown tag");
            return false;
        }
        if !self.selected_tags.remove(tag) {
            self.selected_tags.insert(tag.to_string());
        }
        self.apply_filters();
        true
    }

    /// Restore default criteria, sort, controls and tag selection.
    pub fn handle_reset(&mut self) {
        if !self.is_bound() {
            return;
        }
        self.manager.reset_filters();
        self.manager.reset_sort();
        self.selected_tags.clear();
        self.controls = FilterControls::default();
        tracing::debug!("[FilterPanel] Reset filters and sort");
        self.notify();
    }

    /// What: Switch the panel language.
    ///
    /// Inputs:
    /// - `lang`: Language code for titles and search
    /// - `labels`: Labels resolved in that language
    pub fn set_language(&mut self, lang: &str, labels: PanelLabels) {
        self.labels = labels;
        let changed = self.manager.language() != lang;
        self.manager.set_language(lang);
        if changed && self.is_bound() {
            self.notify();
        }
    }

    /// What: Export the current view.
    ///
    /// Inputs:
    /// - `prompt`: Asks for the format
    /// - `target`: Receives the document
    /// - `today`: Date used in the file name
    ///
    /// Output:
    /// - `Ok(Some(path))` when written; `Ok(None)` when cancelled or unbound
    ///
    /// # Errors
    /// - Returns `Err` when serialization or delivery fails
    pub fn export_results(
        &self,
        prompt: &mut impl ExportPrompt,
        target: &mut impl ExportTarget,
        today: NaiveDate,
    ) -> Result<Option<PathBuf>, ExportError> {
        if !self.is_bound() {
            return Ok(None);
        }
        let Some(format) = prompt.choose_format() else {
            tracing::debug!("[Export] Export cancelled");
            return Ok(None);
        };
        let contents = self.manager.export_filtered_games(format)?;
        let file_name = export_file_name(format, today);
        let path = target.deliver(&file_name, format.mime_type(), &contents)?;
        Ok(Some(path))
    }

    fn apply_filters(&mut self) {
        let criteria = self.controls.to_criteria(&self.selected_tags);
        self.manager.set_filters(criteria);
        self.notify();
    }

    fn notify(&self) {
        let listeners = self.events.emit(FilterChange {
            filters: self.manager.current_filters(),
            sort: self.manager.current_sort(),
            games: self.manager.filtered_games().to_vec(),
        });
        tracing::trace!(listeners, "[FilterPanel] Emitted filter change");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SortField;
    use crate::test_utils::sample_games;

    fn bound_panel() -> FilterPanel {
        let mut panel = FilterPanel::new(FilterSortManager::new(sample_games()));
        assert!(panel.init(&Page::site_shell(), "filter-panel"));
        panel
    }

    fn ids(games: &[crate::state::CatalogItem]) -> Vec<String> {
        games.iter().map(|g| g.id.clone()).collect()
    }

    #[test]
    /// What: Missing container keeps the panel inert
    ///
    /// - Input: Init against an unknown container, then handlers
    /// - Output: Not bound; manager untouched; no events
    fn unbound_panel_is_noop() {
        let mut panel = FilterPanel::new(FilterSortManager::new(sample_games()));
        assert!(!panel.init(&Page::site_shell(), "sidebar"));
        let mut rx = panel.subscribe();
        panel.toggle_panel();
        assert!(!panel.toggle_tag("classic"));
        panel.handle_filter_change(FilterControls {
            category: "puzzle".into(),
            ..FilterControls::default()
        });
        assert!(!panel.is_collapsed());
        assert_eq!(panel.manager().filter_stats().filtered, 4);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    /// What: Control changes drive the manager and notify listeners
    ///
    /// - Input: Category puzzle with rating 4.0..=5.0
    /// - Output: View [game002]; event carries the same criteria and games
    fn filter_change_emits_event() {
        let mut panel = bound_panel();
        let mut rx = panel.subscribe();
        panel.handle_filter_change(FilterControls {
            category: "puzzle".into(),
            rating_min: 4.0,
            rating_max: 5.0,
            ..FilterControls::default()
        });
        let ev = rx.try_recv().expect("filter change");
        assert_eq!(ev.filters.category, "puzzle");
        assert_eq!(ids(&ev.games), vec!["game002"]);
        assert_eq!(ev.games, panel.manager().filtered_games());
        assert_eq!(panel.render().stats_text, "Showing 1 of 4 games");
    }

    #[test]
    /// What: Tag chips are owned by the panel
    ///
    /// - Input: Toggle classic, toggle retro, toggle classic again, toggle unknown
    /// - Output: Selection and view follow each toggle; unknown tag rejected
    fn toggle_tag_tracks_selection() {
        let mut panel = bound_panel();
        assert!(panel.toggle_tag("classic"));
        assert_eq!(panel.manager().filter_stats().filtered, 2);
        assert!(panel.toggle_tag("retro"));
        assert!(panel.toggle_tag("classic"));
        assert_eq!(
            panel.selected_tags().iter().collect::<Vec<_>>(),
            vec!["retro"]
        );
        assert_eq!(ids(panel.manager().filtered_games()), vec!["game001"]);
        assert!(!panel.toggle_tag("nonexistent"));

        let view = panel.render();
        let chips: Vec<_> = view
            .tags
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.value.as_str())
            .collect();
        assert_eq!(chips, vec!["retro"]);
    }

    #[test]
    /// What: Tag toggles keep the last control values
    ///
    /// - Input: Featured-only controls, then toggle tag classic
    /// - Output: Both constraints applied
    fn toggle_tag_reuses_controls() {
        let mut panel = bound_panel();
        panel.handle_filter_change(FilterControls {
            featured: FeaturedFilter::Featured,
            ..FilterControls::default()
        });
        assert!(panel.toggle_tag("classic"));
        assert_eq!(ids(panel.manager().filtered_games()), vec!["game001"]);
    }

    #[test]
    /// What: Sort handlers
    ///
    /// - Input: Title ascending, toggle, unknown field
    /// - Output: Order follows the sort; unknown field rejected without change
    fn sort_handlers_update_order() {
        let mut panel = bound_panel();
        assert!(panel.handle_sort_change("title", SortDirection::Asc));
        assert_eq!(
            ids(panel.manager().filtered_games()),
            vec!["game004", "game001", "game003", "game002"]
        );
        panel.toggle_sort_order();
        assert_eq!(panel.manager().current_sort().direction, SortDirection::Desc);
        assert!(!panel.handle_sort_change("price", SortDirection::Asc));
        assert_eq!(panel.manager().current_sort().field, SortField::Title);
    }

    #[test]
    /// What: Reset restores every default
    ///
    /// - Input: Tag, controls and sort changed, then reset
    /// - Output: All games, default sort, empty selection, collapsed flag untouched
    fn reset_restores_defaults() {
        let mut panel = bound_panel();
        panel.toggle_panel();
        assert!(panel.toggle_tag("classic"));
        panel.handle_filter_change(FilterControls {
            difficulty: "easy".into(),
            ..FilterControls::default()
        });
        panel.handle_sort_change("rating", SortDirection::Asc);
        panel.handle_reset();
        assert!(panel.selected_tags().is_empty());
        assert_eq!(panel.manager().filter_stats().filtered, 4);
        assert_eq!(panel.manager().current_sort().field, SortField::PopularityScore);
        assert_eq!(panel.manager().current_filters(), FilterCriteria::default());
        assert!(panel.is_collapsed());
        assert_eq!(panel.render().toggle_label, "Show filters");
    }

    #[test]
    /// What: Export through a prompt and a directory target
    ///
    /// - Input: JSON chosen, then a cancelled prompt
    /// - Output: Dated file holding the filtered ids; cancel writes nothing
    fn export_results_writes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut panel = bound_panel();
        assert!(panel.toggle_tag("classic"));
        let mut target = DirectoryTarget::new(dir.path().join("exports"));
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date");

        let path = panel
            .export_results(&mut FixedPrompt(Some(ExportFormat::Json)), &mut target, today)
            .expect("export")
            .expect("written");
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("games-export-2024-03-09.json")
        );
        let parsed: Vec<serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
        let exported: Vec<_> = parsed
            .iter()
            .filter_map(|v| v["id"].as_str().map(ToString::to_string))
            .collect();
        assert_eq!(exported, ids(panel.manager().filtered_games()));

        let cancelled = panel
            .export_results(&mut FixedPrompt(None), &mut target, today)
            .expect("cancel");
        assert!(cancelled.is_none());
    }
}
