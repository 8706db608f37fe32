//! Page model and the advanced filter panel.
//!
//! Nothing here draws anything; renderers consume [`page::Page`] and
//! [`panel_view::FilterPanelView`].

pub mod filter_panel;
pub mod page;
pub mod panel_view;

pub use filter_panel::{
    DirectoryTarget, ExportError, ExportPrompt, ExportTarget, FilterControls, FilterPanel,
    FixedPrompt,
};
pub use page::{Element, ElementRole, Page, TextTarget};
pub use panel_view::{ChoiceView, FilterPanelView, PanelLabels};
