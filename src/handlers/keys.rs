//! Keyboard Input Handling Module
//!
//! Translates terminal key events into application state changes. Input modes
//! capture keystrokes for their own flow; only `Normal` mode routes keys to
//! navigation and catalog mutations. Returns `true` when the application
//! should exit.

use crate::app::{App, AppState, ConfirmationState, InputMode};
use crate::models::CategoryKey;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main keyboard event handler and dispatcher
pub fn handle_key_events(key: KeyEvent, app: &mut App) -> bool {
    // Pending delete confirmation swallows everything except its answer
    if app.confirmation_state != ConfirmationState::None {
        return handle_confirmation_keys(key, app);
    }

    if app.input_mode != InputMode::Normal {
        return handle_input_mode_keys(key, app);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,

        // Help overlay toggle (works from any page)
        KeyCode::Char('?') => {
            app.clear_messages();
            app.input_mode = InputMode::HelpMenu;
            false
        }

        _ => match app.state {
            AppState::Editor => handle_editor_keys(key, app),
            AppState::Generator => handle_generator_keys(key, app),
        },
    }
}

/// Answers to a pending destructive-action dialog.
fn handle_confirmation_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_confirmation(),
        _ => {}
    }
    false
}

/// Handles keyboard input while an input mode is active.
fn handle_input_mode_keys(key: KeyEvent, app: &mut App) -> bool {
    // The non-typing modes first; they reuse navigation keys
    match app.input_mode {
        InputMode::HelpMenu => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                app.input_mode = InputMode::Normal;
            }
            return false;
        }
        InputMode::ToggleTypes => {
            match key.code {
                KeyCode::Char('a') | KeyCode::Char('A') => app.toggle_type(CategoryKey::Ar),
                KeyCode::Char('m') | KeyCode::Char('M') => app.toggle_type(CategoryKey::Mr),
                KeyCode::Char('v') | KeyCode::Char('V') => app.toggle_type(CategoryKey::Vr),
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('t') => {
                    app.input_mode = InputMode::Normal;
                }
                _ => {}
            }
            return false;
        }
        InputMode::Reorder => {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => app.move_selected(false),
                KeyCode::Down | KeyCode::Char('j') => app.move_selected(true),
                // Leaving the mode drops the entry where it is
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('m') => {
                    app.input_mode = InputMode::Normal;
                }
                _ => {}
            }
            return false;
        }
        _ => {}
    }

    // Text-entry modes
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.input_buffer.clear();
            app.clear_messages();
        }
        KeyCode::Enter => {
            let input = app.input_buffer.trim().to_string();

            match app.input_mode.clone() {
                InputMode::EditValue => {
                    app.apply_field_edit();
                }
                InputMode::ImportPath => {
                    if !input.is_empty() {
                        app.import_from(&input);
                    }
                }
                InputMode::ExportPath => {
                    if !input.is_empty() {
                        app.export_to(&input);
                    }
                }
                InputMode::GeneratorValue => {
                    apply_generator_edit(app, &input);
                }
                InputMode::GeneratorOutput => {
                    if !input.is_empty() {
                        app.output_path = input;
                    }
                }
                _ => {}
            }

            app.input_buffer.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            app.input_buffer.pop();
        }
        KeyCode::Char(c) => {
            app.input_buffer.push(c);
        }
        _ => {}
    }
    false
}

fn apply_generator_edit(app: &mut App, input: &str) {
    use crate::app::GeneratorRow;

    match app.generator_row() {
        GeneratorRow::Title => app.generator_options.title = input.to_string(),
        GeneratorRow::Description => app.generator_options.description = input.to_string(),
        GeneratorRow::PrimaryColor => app.generator_options.primary_color = input.to_string(),
        GeneratorRow::Language => {
            app.generator_options.language = input.to_lowercase();
        }
        _ => {}
    }
}

/// Keyboard handling for the catalog editor page.
fn handle_editor_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        // Category navigation
        KeyCode::Tab | KeyCode::Right => {
            app.select_category(app.current_category.next());
        }
        KeyCode::BackTab | KeyCode::Left => {
            app.select_category(app.current_category.previous());
        }
        KeyCode::Char('1') => app.select_category(CategoryKey::Ar),
        KeyCode::Char('2') => app.select_category(CategoryKey::Mr),
        KeyCode::Char('3') => app.select_category(CategoryKey::Vr),

        // Experience and field selection
        KeyCode::Up | KeyCode::Char('k') => app.previous_experience(),
        KeyCode::Down | KeyCode::Char('j') => app.next_experience(),
        KeyCode::Char('n') => app.next_field(),
        KeyCode::Char('p') => app.previous_field(),

        // Catalog mutations
        KeyCode::Char('a') => app.add_experience(),
        KeyCode::Char('d') => app.request_delete_selected(),
        KeyCode::Enter => {
            if let Some(experience) = app.selected_experience() {
                let field = app.selected_field_kind();
                if field.is_bool() {
                    app.toggle_selected_bool_field();
                } else {
                    app.input_buffer = field.current_value(experience);
                    app.input_mode = InputMode::EditValue;
                }
            }
        }
        KeyCode::Char('t') => {
            if app.selected_experience().is_some() {
                app.input_mode = InputMode::ToggleTypes;
            }
        }
        KeyCode::Char('m') => {
            if app.current_experiences().len() > 1 {
                app.input_mode = InputMode::Reorder;
            }
        }

        // Persistence
        KeyCode::Char('s') => app.save(),
        KeyCode::Char('x') => {
            app.input_buffer = crate::models::export::EXPORT_FILE_NAME.to_string();
            app.input_mode = InputMode::ExportPath;
        }
        KeyCode::Char('i') => {
            app.input_buffer.clear();
            app.input_mode = InputMode::ImportPath;
        }

        // Generator page
        KeyCode::Char('g') => {
            app.state = AppState::Generator;
            app.generator_selected = 0;
        }
        _ => {}
    }
    false
}

/// Keyboard handling for the generator options page.
fn handle_generator_keys(key: KeyEvent, app: &mut App) -> bool {
    use crate::app::GeneratorRow;

    match key.code {
        KeyCode::Esc | KeyCode::Char('g') => {
            app.state = AppState::Editor;
        }
        KeyCode::Up | KeyCode::Char('k') => app.previous_generator_row(),
        KeyCode::Down | KeyCode::Char('j') => app.next_generator_row(),
        KeyCode::Enter | KeyCode::Char(' ') => match app.generator_row() {
            GeneratorRow::Title => {
                app.input_buffer = app.generator_options.title.clone();
                app.input_mode = InputMode::GeneratorValue;
            }
            GeneratorRow::Description => {
                app.input_buffer = app.generator_options.description.clone();
                app.input_mode = InputMode::GeneratorValue;
            }
            GeneratorRow::PrimaryColor => {
                app.input_buffer = app.generator_options.primary_color.clone();
                app.input_mode = InputMode::GeneratorValue;
            }
            GeneratorRow::Language => {
                app.generator_options.language = if app.generator_options.language == "es" {
                    String::from("en")
                } else {
                    String::from("es")
                };
            }
            GeneratorRow::MenuStyle => {
                app.generator_options.menu_style = app.generator_options.menu_style.next();
            }
            GeneratorRow::IncludeLoadingScreen => {
                app.generator_options.include_loading_screen =
                    !app.generator_options.include_loading_screen;
            }
            GeneratorRow::OutputPath => {
                app.input_buffer = app.output_path.clone();
                app.input_mode = InputMode::GeneratorOutput;
            }
            GeneratorRow::Generate => app.generate_output(),
        },
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::GeneratorRow;
    use crate::models::Catalog;
    use ratatui::crossterm::event::{KeyEvent, KeyModifiers};

    fn test_app() -> App {
        App::with_catalog(Catalog::sample())
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), app)
    }

    #[test]
    fn q_quits_from_editor() {
        let mut app = test_app();
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn tab_cycles_categories() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_category, CategoryKey::Mr);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_category, CategoryKey::Vr);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_category, CategoryKey::Ar);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = test_app();
        let before = app.current_experiences().len();

        press(&mut app, KeyCode::Char('d'));
        assert_ne!(app.confirmation_state, ConfirmationState::None);
        assert_eq!(app.current_experiences().len(), before);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.confirmation_state, ConfirmationState::None);
        assert_eq!(app.current_experiences().len(), before);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.current_experiences().len(), before - 1);
    }

    #[test]
    fn edit_value_flow_updates_title() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::EditValue);

        app.input_buffer.clear();
        for c in "Renamed".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.selected_experience().unwrap().title, "Renamed");
        assert!(app.dirty);
    }

    #[test]
    fn escape_cancels_text_entry() {
        let mut app = test_app();
        let original = app.selected_experience().unwrap().title.clone();

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('X'));
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.input_buffer.is_empty());
        assert_eq!(app.selected_experience().unwrap().title, original);
    }

    #[test]
    fn generator_toggles_cycle_in_place() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.state, AppState::Generator);

        // Language row: Enter flips es <-> en
        while app.generator_row() != GeneratorRow::Language {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.generator_options.language, "en");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.generator_options.language, "es");

        // Menu style cycles through all variants
        press(&mut app, KeyCode::Down);
        let start = app.generator_options.menu_style;
        press(&mut app, KeyCode::Enter);
        assert_ne!(app.generator_options.menu_style, start);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::Editor);
    }

    #[test]
    fn reorder_mode_moves_selection_with_entry() {
        let mut app = test_app();
        let first = app.current_experiences()[0].id.clone();

        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.input_mode, InputMode::Reorder);
        press(&mut app, KeyCode::Down);

        assert_eq!(app.current_experiences()[1].id, first);
        assert_eq!(app.selected_index, 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
