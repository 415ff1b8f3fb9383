use std::path::PathBuf;

use crate::color::IndexPalette;
use crate::config::DashboardConfig;
use crate::data::model::ObservationTable;
use crate::view::{self, ContentBlock, Section};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Observations shown and analysed (built-in site table until a file is opened).
    pub table: ObservationTable,

    /// Where the table came from, for the top bar.
    pub source: Option<PathBuf>,

    pub config: DashboardConfig,

    /// Sidebar selection.
    pub section: Section,

    /// Content for `section`, rebuilt when the selection or table changes.
    pub content: ContentBlock,

    /// Line colours per index.
    pub palette: IndexPalette,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let table = ObservationTable::peatland_site();
        let section = Section::default();
        let content = view::build(section, &table, &config);
        let state = Self {
            table,
            source: None,
            config,
            section,
            content,
            palette: IndexPalette::default(),
            status_message: None,
        };
        state.warn_missing_images();
        state
    }

    /// Switch sections; recomputes content only when the selection changes.
    pub fn select(&mut self, section: Section) {
        if section != self.section {
            log::debug!("Selected section: {section}");
            self.section = section;
            self.refresh();
        }
    }

    /// Replace the observation table with a newly loaded one.
    pub fn set_table(&mut self, table: ObservationTable, source: PathBuf) {
        self.table = table;
        self.source = Some(source);
        self.status_message = None;
        self.refresh();
    }

    /// Go back to the built-in site table.
    pub fn reset_table(&mut self) {
        self.table = ObservationTable::peatland_site();
        self.source = None;
        self.status_message = None;
        self.refresh();
    }

    pub fn set_image_dir(&mut self, dir: PathBuf) {
        self.config.image_dir = dir;
        self.refresh();
    }

    /// Rebuild `content` for the current section.
    pub fn refresh(&mut self) {
        self.content = view::build(self.section, &self.table, &self.config);
        self.warn_missing_images();
    }

    fn warn_missing_images(&self) {
        for figure in self.content.figures() {
            if !figure.path.exists() {
                log::warn!("Image not found: {}", figure.path.display());
            }
        }
    }
}
