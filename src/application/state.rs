//! Application state management for the dropdown selector.
//!
//! This module contains the selection state manager: the funnel catalog,
//! the current selection, the button label, and the open/closed state of
//! the panel, together with one method per user-visible operation.

use crate::domain::{
    selection_label, Catalog, DropdownState, SelectionIndex, PLACEHOLDER_LABEL,
};

/// One row of the open panel, in display order.
///
/// The panel is a flattened view over the catalog: the select-all control
/// first, then every funnel, each followed by its stages while expanded.
/// Indices address `Catalog::funnels` and `Funnel::stages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRow {
    /// The «Выбрать все» control
    SelectAll,
    /// Funnel header row (funnel index)
    Funnel(usize),
    /// Stage row (funnel index, stage index)
    Stage(usize, usize),
}

/// Main application state: the selection state manager plus the terminal
/// UI state needed to drive it.
///
/// All mutating operations recompute the label themselves; callers never
/// have to remember to. Persistence is not performed here. The input
/// adapter saves a [`snapshot`](App::snapshot) after each selection
/// mutation and reports the outcome back through
/// [`set_save_result`](App::set_save_result).
///
/// # Examples
///
/// ```
/// use funsel::application::App;
///
/// let mut app = App::default();
/// assert_eq!(app.label, "Выбрать элементы");
///
/// app.toggle_stage("Продажи", "Переговоры");
/// assert_eq!(app.label, "1 воронка, 1 этап");
/// ```
#[derive(Debug)]
pub struct App {
    /// Static funnel/stage catalog (`expanded` flags are the only part
    /// that changes after startup)
    pub catalog: Catalog,
    /// Currently selected stages, grouped by funnel
    pub selection: SelectionIndex,
    /// Button label, recomputed after every mutation
    pub label: String,
    /// Whether the dropdown panel is open
    pub is_open: bool,
    /// Cursor position within the visible panel rows
    pub cursor: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::with_catalog(Catalog::default())
    }
}

impl App {
    /// Creates a manager over the given catalog with an empty selection
    /// and the placeholder label.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            selection: SelectionIndex::default(),
            label: PLACEHOLDER_LABEL.to_string(),
            is_open: false,
            cursor: 0,
            status_message: None,
        }
    }

    /// Opens the panel if closed, closes it otherwise. Closing recomputes
    /// the label so the button always shows the final selection.
    pub fn toggle_dropdown(&mut self) {
        self.is_open = !self.is_open;
        if !self.is_open {
            self.update_label();
        }
        self.clamp_cursor();
    }

    /// Closes the panel and recomputes the label. This is the outside-press
    /// path; a press while the panel is already closed does nothing.
    pub fn close_dropdown(&mut self) {
        if self.is_open {
            self.is_open = false;
            self.update_label();
        }
    }

    /// Flips a funnel's expand/collapse flag. UI-only: the selection and
    /// the label are untouched, and nothing is persisted for this.
    pub fn toggle_expanded(&mut self, funnel: &str) {
        if let Some(funnel) = self.catalog.funnel_mut(funnel) {
            funnel.expanded = !funnel.expanded;
        }
        self.clamp_cursor();
    }

    /// Selects the stage if unselected, deselects it otherwise.
    ///
    /// Calling this twice with the same pair restores the prior selection
    /// exactly. Stage names are trusted to come from the catalog.
    pub fn toggle_stage(&mut self, funnel: &str, stage: &str) {
        if self.selection.contains(funnel, stage) {
            self.selection.remove(funnel, stage);
        } else {
            self.selection.insert(funnel, stage);
        }
        self.update_label();
    }

    /// Selects every stage of the funnel, or deselects all of them when the
    /// funnel is already fully selected. Unknown funnel names are a quiet
    /// no-op.
    pub fn toggle_funnel(&mut self, funnel: &str) {
        let stages: Vec<String> = match self.catalog.funnel(funnel) {
            Some(found) => found.stage_names().map(str::to_string).collect(),
            None => return,
        };

        if self.is_funnel_fully_selected(funnel) {
            for stage in &stages {
                self.selection.remove(funnel, stage);
            }
        } else {
            for stage in &stages {
                self.selection.insert(funnel, stage);
            }
        }
        self.update_label();
    }

    /// Clears every selection if any exists, otherwise selects every stage
    /// of every funnel.
    pub fn toggle_select_all(&mut self) {
        if self.has_any_selection() {
            self.selection.clear();
        } else {
            let pairs: Vec<(String, String)> = self
                .catalog
                .funnels
                .iter()
                .flat_map(|funnel| {
                    funnel
                        .stage_names()
                        .map(|stage| (funnel.name.clone(), stage.to_string()))
                })
                .collect();
            for (funnel, stage) in &pairs {
                self.selection.insert(funnel, stage);
            }
        }
        self.update_label();
    }

    pub fn is_selected(&self, funnel: &str, stage: &str) -> bool {
        self.selection.contains(funnel, stage)
    }

    /// True iff every stage of the funnel is selected. A funnel missing
    /// from the catalog is never fully selected.
    pub fn is_funnel_fully_selected(&self, funnel: &str) -> bool {
        self.catalog.funnel(funnel).is_some_and(|found| {
            found
                .stage_names()
                .all(|stage| self.selection.contains(funnel, stage))
        })
    }

    pub fn has_any_selection(&self) -> bool {
        self.selection.has_any()
    }

    /// Recomputes the button label from the current selection counts.
    pub fn update_label(&mut self) {
        self.label = selection_label(
            self.selection.funnel_count(),
            self.selection.stage_count(),
        );
    }

    /// The flattened panel rows in display order. Never empty: the
    /// select-all row is always present.
    pub fn visible_rows(&self) -> Vec<PanelRow> {
        let mut rows = vec![PanelRow::SelectAll];
        for (funnel_idx, funnel) in self.catalog.funnels.iter().enumerate() {
            rows.push(PanelRow::Funnel(funnel_idx));
            if funnel.expanded {
                for stage_idx in 0..funnel.stages.len() {
                    rows.push(PanelRow::Stage(funnel_idx, stage_idx));
                }
            }
        }
        rows
    }

    /// The row under the cursor.
    pub fn current_row(&self) -> PanelRow {
        let rows = self.visible_rows();
        rows[self.cursor.min(rows.len() - 1)]
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        let last = self.visible_rows().len() - 1;
        if self.cursor < last {
            self.cursor += 1;
        }
    }

    /// Keeps the cursor inside the visible rows after a collapse shrinks
    /// the panel.
    fn clamp_cursor(&mut self) {
        let last = self.visible_rows().len() - 1;
        if self.cursor > last {
            self.cursor = last;
        }
    }

    /// The persisted record for the current selection.
    pub fn snapshot(&self) -> DropdownState {
        self.selection.to_state()
    }

    /// Processes the result of the startup load.
    ///
    /// A found record replaces the selection; a missing record keeps the
    /// empty selection. Either way the label is recomputed. A failure is
    /// reported through the status message and the session continues
    /// in-memory-only.
    pub fn set_load_result(&mut self, result: Result<Option<DropdownState>, String>) {
        match result {
            Ok(Some(state)) => {
                self.selection = SelectionIndex::from_state(&state);
            }
            Ok(None) => {}
            Err(error) => {
                self.status_message = Some(format!("Load failed: {}", error));
            }
        }
        self.update_label();
    }

    /// Processes the result of a save. Saves run after every selection
    /// mutation, so success stays silent and only failures surface.
    pub fn set_save_result(&mut self, result: Result<(), String>) {
        if let Err(error) = result {
            self.status_message = Some(format!("Save failed: {}", error));
        }
    }
}
