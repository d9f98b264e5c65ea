use crate::application::{App, PanelRow};
use crate::infrastructure::StateStore;
use crate::presentation::ui;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(
        app: &mut App,
        store: &StateStore,
        key: KeyCode,
        _modifiers: KeyModifiers,
    ) {
        app.status_message = None;

        if app.is_open {
            Self::handle_panel_keys(app, store, key);
        } else {
            Self::handle_button_keys(app, key);
        }
    }

    /// Mouse contract: a left press on the button toggles the panel, a
    /// press on a panel row toggles that row, and a press anywhere else
    /// closes the panel (the outside-press rule).
    pub fn handle_mouse_event(app: &mut App, store: &StateStore, mouse: MouseEvent, area: Rect) {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }
        app.status_message = None;
        let position = Position::new(mouse.column, mouse.row);

        if ui::button_area(area).contains(position) {
            app.toggle_dropdown();
            return;
        }
        if !app.is_open {
            return;
        }

        if let Some(index) = ui::panel_row_at(area, app, position) {
            app.cursor = index;
            let row = app.current_row();
            Self::toggle_row(app, store, row);
        } else if !ui::panel_area(area, app.visible_rows().len()).contains(position) {
            app.close_dropdown();
        }
    }

    fn handle_button_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                app.toggle_dropdown();
            }
            _ => {}
        }
    }

    fn handle_panel_keys(app: &mut App, store: &StateStore, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                app.close_dropdown();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.move_cursor_up();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.move_cursor_down();
            }
            KeyCode::Char(' ') => {
                let row = app.current_row();
                Self::toggle_row(app, store, row);
            }
            KeyCode::Enter => match app.current_row() {
                PanelRow::Funnel(funnel_idx) => {
                    let name = app.catalog.funnels[funnel_idx].name.clone();
                    app.toggle_expanded(&name);
                }
                row => Self::toggle_row(app, store, row),
            },
            KeyCode::Right | KeyCode::Char('l') => {
                if let PanelRow::Funnel(funnel_idx) = app.current_row() {
                    let funnel = &app.catalog.funnels[funnel_idx];
                    if !funnel.expanded {
                        let name = funnel.name.clone();
                        app.toggle_expanded(&name);
                    }
                }
            }
            KeyCode::Left | KeyCode::Char('h') => match app.current_row() {
                PanelRow::Funnel(funnel_idx) => {
                    let funnel = &app.catalog.funnels[funnel_idx];
                    if funnel.expanded {
                        let name = funnel.name.clone();
                        app.toggle_expanded(&name);
                    }
                }
                PanelRow::Stage(funnel_idx, _) => {
                    // Jump back to the stage's funnel header.
                    let rows = app.visible_rows();
                    if let Some(index) = rows
                        .iter()
                        .position(|row| *row == PanelRow::Funnel(funnel_idx))
                    {
                        app.cursor = index;
                    }
                }
                PanelRow::SelectAll => {}
            },
            KeyCode::Char('a') => {
                app.toggle_select_all();
                Self::persist(app, store);
            }
            _ => {}
        }
    }

    fn toggle_row(app: &mut App, store: &StateStore, row: PanelRow) {
        match row {
            PanelRow::SelectAll => {
                app.toggle_select_all();
            }
            PanelRow::Funnel(funnel_idx) => {
                let name = app.catalog.funnels[funnel_idx].name.clone();
                app.toggle_funnel(&name);
            }
            PanelRow::Stage(funnel_idx, stage_idx) => {
                let funnel = app.catalog.funnels[funnel_idx].name.clone();
                let stage = app.catalog.funnels[funnel_idx].stages[stage_idx].name.clone();
                app.toggle_stage(&funnel, &stage);
            }
        }
        Self::persist(app, store);
    }

    /// Saves the current selection. Failures are logged and shown as a
    /// status message; the session keeps running in-memory-only.
    fn persist(app: &mut App, store: &StateStore) {
        let result = store.save_state(&app.snapshot());
        if let Err(ref error) = result {
            log::warn!(
                "saving dropdown state to {} failed: {}",
                store.path().display(),
                error
            );
        }
        app.set_save_result(result.map_err(|error| error.to_string()));
    }
}
