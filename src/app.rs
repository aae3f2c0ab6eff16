use crate::generator::{self, GeneratorOptions};
use crate::models::{
    Catalog, CategoryKey, Experience, LoadStatus, StorageManager, ToggleOutcome, export,
};
use ratatui::Frame;
use std::path::Path;
use std::time::{Duration, Instant};

/// Application State Enumeration
/// Represents the pages the application can be in. The editor is the main
/// surface; the generator page holds the branding-options form used to stamp
/// out the standalone WebXR app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Editor,
    Generator,
}

/// Input mode state machine for the editor page. Only `Normal` routes keys
/// to navigation; every other mode captures them for its own flow.
#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    /// Typing a new value for the selected experience field.
    EditValue,
    /// Picking experience types to toggle on the selected entry.
    ToggleTypes,
    /// Moving the selected entry within its category. Transient drag state:
    /// leaving the mode drops the item where it is.
    Reorder,
    /// Typing the path of a JSON file to import.
    ImportPath,
    /// Typing the destination for a JSON export.
    ExportPath,
    /// Typing a value for the selected generator option.
    GeneratorValue,
    /// Typing the output path for the generated document.
    GeneratorOutput,
    HelpMenu,
}

/// Pending destructive actions awaiting a yes/no answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmationState {
    None,
    DeleteExperience { id: String },
}

/// Editable fields of an experience, in the order the detail pane lists
/// them. Paths match the wire names `Catalog::update_field` understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    Title,
    Description,
    ThumbnailUrl,
    ModelUrl,
    IsExternal,
    ExternalUrl,
    PositionX,
    PositionY,
    PositionZ,
    RotationX,
    RotationY,
    RotationZ,
    ScaleX,
    ScaleY,
    ScaleZ,
}

impl EditableField {
    pub const ALL: [EditableField; 15] = [
        EditableField::Title,
        EditableField::Description,
        EditableField::ThumbnailUrl,
        EditableField::ModelUrl,
        EditableField::IsExternal,
        EditableField::ExternalUrl,
        EditableField::PositionX,
        EditableField::PositionY,
        EditableField::PositionZ,
        EditableField::RotationX,
        EditableField::RotationY,
        EditableField::RotationZ,
        EditableField::ScaleX,
        EditableField::ScaleY,
        EditableField::ScaleZ,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EditableField::Title => "Title",
            EditableField::Description => "Description",
            EditableField::ThumbnailUrl => "Thumbnail URL",
            EditableField::ModelUrl => "Model URL",
            EditableField::IsExternal => "External link",
            EditableField::ExternalUrl => "External URL",
            EditableField::PositionX => "Position X",
            EditableField::PositionY => "Position Y",
            EditableField::PositionZ => "Position Z",
            EditableField::RotationX => "Rotation X",
            EditableField::RotationY => "Rotation Y",
            EditableField::RotationZ => "Rotation Z",
            EditableField::ScaleX => "Scale X",
            EditableField::ScaleY => "Scale Y",
            EditableField::ScaleZ => "Scale Z",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            EditableField::Title => "title",
            EditableField::Description => "description",
            EditableField::ThumbnailUrl => "thumbnailUrl",
            EditableField::ModelUrl => "modelUrl",
            EditableField::IsExternal => "isExternal",
            EditableField::ExternalUrl => "externalUrl",
            EditableField::PositionX => "position.x",
            EditableField::PositionY => "position.y",
            EditableField::PositionZ => "position.z",
            EditableField::RotationX => "rotation.x",
            EditableField::RotationY => "rotation.y",
            EditableField::RotationZ => "rotation.z",
            EditableField::ScaleX => "scale.x",
            EditableField::ScaleY => "scale.y",
            EditableField::ScaleZ => "scale.z",
        }
    }

    /// Booleans flip on Enter instead of opening the value editor.
    pub fn is_bool(&self) -> bool {
        matches!(self, EditableField::IsExternal)
    }

    pub fn current_value(&self, experience: &Experience) -> String {
        match self {
            EditableField::Title => experience.title.clone(),
            EditableField::Description => experience.description.clone(),
            EditableField::ThumbnailUrl => experience.thumbnail_url.clone(),
            EditableField::ModelUrl => experience.model_url.clone(),
            EditableField::IsExternal => experience.is_external.to_string(),
            EditableField::ExternalUrl => experience.external_url.clone(),
            EditableField::PositionX => experience.position.x.to_string(),
            EditableField::PositionY => experience.position.y.to_string(),
            EditableField::PositionZ => experience.position.z.to_string(),
            EditableField::RotationX => experience.rotation.x.to_string(),
            EditableField::RotationY => experience.rotation.y.to_string(),
            EditableField::RotationZ => experience.rotation.z.to_string(),
            EditableField::ScaleX => experience.scale.x.to_string(),
            EditableField::ScaleY => experience.scale.y.to_string(),
            EditableField::ScaleZ => experience.scale.z.to_string(),
        }
    }
}

/// Rows of the generator options form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorRow {
    Title,
    Description,
    PrimaryColor,
    Language,
    MenuStyle,
    IncludeLoadingScreen,
    OutputPath,
    Generate,
}

impl GeneratorRow {
    pub const ALL: [GeneratorRow; 8] = [
        GeneratorRow::Title,
        GeneratorRow::Description,
        GeneratorRow::PrimaryColor,
        GeneratorRow::Language,
        GeneratorRow::MenuStyle,
        GeneratorRow::IncludeLoadingScreen,
        GeneratorRow::OutputPath,
        GeneratorRow::Generate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GeneratorRow::Title => "Title",
            GeneratorRow::Description => "Description",
            GeneratorRow::PrimaryColor => "Primary color",
            GeneratorRow::Language => "Language",
            GeneratorRow::MenuStyle => "Menu style",
            GeneratorRow::IncludeLoadingScreen => "Loading screen",
            GeneratorRow::OutputPath => "Output path",
            GeneratorRow::Generate => "Generate",
        }
    }
}

const MESSAGE_TIMEOUT: Duration = Duration::from_secs(3);

/// Main Application State Container
/// Owns the single mutable catalog; every mutation goes through the catalog
/// operations, and persistence and generation only ever receive read-only
/// snapshots of it.
#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub catalog: Catalog,
    pub storage_manager: Option<StorageManager>,

    pub current_category: CategoryKey,
    pub selected_index: usize,
    pub selected_experience_id: Option<String>,
    pub selected_field: usize,

    pub input_mode: InputMode,
    pub input_buffer: String,
    pub confirmation_state: ConfirmationState,

    pub generator_options: GeneratorOptions,
    pub generator_selected: usize,
    pub output_path: String,

    pub error_message: Option<String>,
    pub success_message: Option<String>,
    message_set_at: Option<Instant>,

    pub dirty: bool,
    pub needs_redraw: bool,
}

impl App {
    pub fn new() -> Self {
        let storage_manager = StorageManager::new().ok();
        let (catalog, load_status) = match storage_manager {
            Some(ref manager) => manager.load_catalog(),
            None => (Catalog::sample(), LoadStatus::FirstRun),
        };

        let mut app = Self {
            state: AppState::Editor,
            catalog,
            storage_manager,
            current_category: CategoryKey::Ar,
            selected_index: 0,
            selected_experience_id: None,
            selected_field: 0,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            confirmation_state: ConfirmationState::None,
            generator_options: GeneratorOptions::default(),
            generator_selected: 0,
            output_path: String::from("webxr-app.html"),
            error_message: None,
            success_message: None,
            message_set_at: None,
            dirty: false,
            needs_redraw: true,
        };

        if load_status == LoadStatus::Recovered {
            app.set_error_message(String::from(
                "Saved catalog could not be read; starting from sample data",
            ));
        }

        app.sync_selection();
        app
    }

    // Selection and navigation

    pub fn current_experiences(&self) -> &[Experience] {
        &self.catalog.category(self.current_category).experiences
    }

    pub fn selected_experience(&self) -> Option<&Experience> {
        let id = self.selected_experience_id.as_deref()?;
        self.current_experiences().iter().find(|exp| exp.id == id)
    }

    /// Clamps the list cursor and re-derives the selected id after any
    /// change to the underlying list.
    pub fn sync_selection(&mut self) {
        let experiences = self.catalog.category(self.current_category).experiences.len();
        if experiences == 0 {
            self.selected_index = 0;
            self.selected_experience_id = None;
        } else {
            self.selected_index = self.selected_index.min(experiences - 1);
            self.selected_experience_id = Some(
                self.catalog.category(self.current_category).experiences[self.selected_index]
                    .id
                    .clone(),
            );
        }
    }

    pub fn select_category(&mut self, key: CategoryKey) {
        if self.current_category != key {
            self.current_category = key;
            self.selected_index = 0;
            self.sync_selection();
            self.needs_redraw = true;
        }
    }

    pub fn next_experience(&mut self) {
        let len = self.current_experiences().len();
        if len > 0 {
            self.selected_index = (self.selected_index + 1) % len;
            self.sync_selection();
        }
    }

    pub fn previous_experience(&mut self) {
        let len = self.current_experiences().len();
        if len > 0 {
            self.selected_index = (self.selected_index + len - 1) % len;
            self.sync_selection();
        }
    }

    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % EditableField::ALL.len();
    }

    pub fn previous_field(&mut self) {
        let len = EditableField::ALL.len();
        self.selected_field = (self.selected_field + len - 1) % len;
    }

    pub fn selected_field_kind(&self) -> EditableField {
        EditableField::ALL[self.selected_field]
    }

    // Catalog mutations

    pub fn add_experience(&mut self) {
        let id = self.catalog.add_experience(self.current_category);
        self.selected_index = self.current_experiences().len() - 1;
        self.selected_experience_id = Some(id);
        self.dirty = true;
        self.set_success_message(String::from("Experience added"));
    }

    pub fn request_delete_selected(&mut self) {
        if let Some(id) = self.selected_experience_id.clone() {
            self.confirmation_state = ConfirmationState::DeleteExperience { id };
        }
    }

    pub fn confirm_delete(&mut self) {
        if let ConfirmationState::DeleteExperience { id } =
            std::mem::replace(&mut self.confirmation_state, ConfirmationState::None)
        {
            if self.catalog.delete_experience(&id) {
                self.dirty = true;
                self.set_success_message(String::from("Experience deleted"));
            }
            self.sync_selection();
        }
    }

    pub fn cancel_confirmation(&mut self) {
        self.confirmation_state = ConfirmationState::None;
    }

    /// Applies the value in the input buffer to the selected field.
    pub fn apply_field_edit(&mut self) {
        let Some(id) = self.selected_experience_id.clone() else {
            return;
        };
        let field = self.selected_field_kind();
        let value = self.input_buffer.clone();

        if self.catalog.update_field(&id, field.path(), &value) {
            self.dirty = true;
        } else {
            self.set_error_message(format!("Could not update {}", field.label()));
        }
        self.input_buffer.clear();
    }

    pub fn toggle_selected_bool_field(&mut self) {
        let Some(experience) = self.selected_experience() else {
            return;
        };
        let flipped = (!experience.is_external).to_string();
        let id = experience.id.clone();
        if self.catalog.update_field(&id, "isExternal", &flipped) {
            self.dirty = true;
        }
    }

    pub fn toggle_type(&mut self, key: CategoryKey) {
        let Some(id) = self.selected_experience_id.clone() else {
            return;
        };
        match self.catalog.toggle_experience_type(&id, key) {
            ToggleOutcome::Added | ToggleOutcome::Removed => {
                self.dirty = true;
            }
            ToggleOutcome::LastTypeKept => {
                self.set_error_message(String::from("An experience needs at least one type"));
            }
            ToggleOutcome::NotFound => {}
        }
    }

    /// Moves the selected experience one slot up or down in its category.
    pub fn move_selected(&mut self, down: bool) {
        let experiences = self.current_experiences();
        if experiences.len() < 2 {
            return;
        }

        let from = self.selected_index;
        let to = if down {
            if from + 1 >= experiences.len() {
                return;
            }
            from + 1
        } else {
            if from == 0 {
                return;
            }
            from - 1
        };

        let from_id = experiences[from].id.clone();
        let to_id = experiences[to].id.clone();

        if self.catalog.reorder(self.current_category, &from_id, &to_id) {
            self.selected_index = to;
            self.sync_selection();
            self.dirty = true;
        }
    }

    // Persistence

    pub fn save(&mut self) {
        let Some(ref manager) = self.storage_manager else {
            self.set_error_message(String::from("No storage available"));
            return;
        };

        match manager.save_catalog(&self.catalog) {
            Ok(()) => {
                self.dirty = false;
                self.set_success_message(String::from("Catalog saved"));
            }
            Err(e) => self.set_error_message(format!("Save failed: {}", e)),
        }
    }

    pub fn export_to(&mut self, path: &str) {
        match export::export_to_file(&self.catalog, Path::new(path)) {
            Ok(written) => {
                self.set_success_message(format!("Exported to {}", written.display()));
            }
            Err(e) => self.set_error_message(format!("Export failed: {}", e)),
        }
    }

    /// Imports a catalog file, replacing the working state wholesale. The
    /// previous snapshot is backed up first so the replacement is
    /// recoverable.
    pub fn import_from(&mut self, path: &str) {
        match export::import_from_file(Path::new(path)) {
            Ok(catalog) => {
                if let Some(ref manager) = self.storage_manager {
                    let _ = manager.backup_catalog();
                }
                self.catalog = catalog;
                self.selected_index = 0;
                self.sync_selection();
                self.dirty = true;
                self.set_success_message(String::from("Catalog imported"));
            }
            Err(e) => self.set_error_message(format!("Import failed: {}", e)),
        }
    }

    // Generation

    pub fn generate_output(&mut self) {
        let path = self.output_path.clone();
        match generator::generate(&self.catalog, &self.generator_options) {
            Ok(document) => match std::fs::write(&path, document) {
                Ok(()) => self.set_success_message(format!("Generated {}", path)),
                Err(e) => self.set_error_message(format!("Could not write {}: {}", path, e)),
            },
            Err(e) => self.set_error_message(format!("Generation failed: {}", e)),
        }
    }

    pub fn generator_row(&self) -> GeneratorRow {
        GeneratorRow::ALL[self.generator_selected]
    }

    pub fn next_generator_row(&mut self) {
        self.generator_selected = (self.generator_selected + 1) % GeneratorRow::ALL.len();
    }

    pub fn previous_generator_row(&mut self) {
        let len = GeneratorRow::ALL.len();
        self.generator_selected = (self.generator_selected + len - 1) % len;
    }

    // Status messages

    pub fn set_error_message(&mut self, message: String) {
        self.error_message = Some(message);
        self.success_message = None;
        self.message_set_at = Some(Instant::now());
    }

    pub fn set_success_message(&mut self, message: String) {
        self.success_message = Some(message);
        self.error_message = None;
        self.message_set_at = Some(Instant::now());
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
        self.message_set_at = None;
    }

    /// Expires status messages after a short delay so feedback stays
    /// transient.
    pub fn tick(&mut self) {
        if let Some(set_at) = self.message_set_at {
            if set_at.elapsed() >= MESSAGE_TIMEOUT {
                self.clear_messages();
                self.needs_redraw = true;
            }
        }
    }

    /// Renders the current application state to the terminal frame.
    pub fn render(&self, frame: &mut Frame) {
        match self.state {
            AppState::Editor => crate::ui::editor::render(frame, self),
            AppState::Generator => crate::ui::generate::render(frame, self),
        }

        if self.input_mode == InputMode::HelpMenu {
            crate::ui::help::render(frame, self);
        }
    }
}

impl App {
    /// Storage-less app over a fixed catalog, for state tests.
    #[cfg(test)]
    pub(crate) fn with_catalog(catalog: Catalog) -> Self {
        let mut app = App {
            state: AppState::Editor,
            catalog,
            storage_manager: None,
            current_category: CategoryKey::Ar,
            selected_index: 0,
            selected_experience_id: None,
            selected_field: 0,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            confirmation_state: ConfirmationState::None,
            generator_options: GeneratorOptions::default(),
            generator_selected: 0,
            output_path: String::from("webxr-app.html"),
            error_message: None,
            success_message: None,
            message_set_at: None,
            dirty: false,
            needs_redraw: false,
        };
        app.sync_selection();
        app
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_app() -> App {
        App::with_catalog(Catalog::new())
    }

    #[test]
    fn test_add_selects_the_new_experience() {
        let mut app = editor_app();
        app.add_experience();
        app.add_experience();

        assert_eq!(app.selected_index, 1);
        let selected = app.selected_experience().unwrap();
        assert_eq!(selected.id, app.current_experiences()[1].id);
        assert!(app.dirty);
    }

    #[test]
    fn test_delete_clears_selection_when_category_empties() {
        let mut app = editor_app();
        app.add_experience();
        app.request_delete_selected();
        assert!(matches!(
            app.confirmation_state,
            ConfirmationState::DeleteExperience { .. }
        ));

        app.confirm_delete();
        assert_eq!(app.confirmation_state, ConfirmationState::None);
        assert!(app.selected_experience_id.is_none());
        assert!(app.current_experiences().is_empty());
    }

    #[test]
    fn test_category_switch_resets_cursor() {
        let mut app = editor_app();
        app.add_experience();
        app.add_experience();
        app.next_experience();

        app.select_category(CategoryKey::Vr);
        assert_eq!(app.selected_index, 0);
        assert!(app.selected_experience_id.is_none());
    }

    #[test]
    fn test_move_selected_swaps_neighbors() {
        let mut app = editor_app();
        app.add_experience();
        app.add_experience();
        app.add_experience();
        let ids: Vec<_> = app
            .current_experiences()
            .iter()
            .map(|exp| exp.id.clone())
            .collect();

        app.selected_index = 0;
        app.sync_selection();
        app.move_selected(true);

        let after: Vec<_> = app
            .current_experiences()
            .iter()
            .map(|exp| exp.id.clone())
            .collect();
        assert_eq!(after, vec![ids[1].clone(), ids[0].clone(), ids[2].clone()]);
        assert_eq!(app.selected_index, 1);
        assert_eq!(app.selected_experience_id.as_deref(), Some(ids[0].as_str()));

        // Moving past the end of the list is a no-op
        app.selected_index = 2;
        app.sync_selection();
        app.move_selected(true);
        let unchanged: Vec<_> = app
            .current_experiences()
            .iter()
            .map(|exp| exp.id.clone())
            .collect();
        assert_eq!(unchanged, after);
    }

    #[test]
    fn test_apply_field_edit_routes_through_update_field() {
        let mut app = editor_app();
        app.add_experience();
        app.selected_field = 0; // Title
        app.input_buffer = String::from("Renamed");
        app.apply_field_edit();

        let selected = app.selected_experience().unwrap();
        assert_eq!(selected.title, "Renamed");
        assert!(app.input_buffer.is_empty());
    }

    #[test]
    fn test_last_type_refusal_surfaces_a_message() {
        let mut app = editor_app();
        app.add_experience();
        app.toggle_type(CategoryKey::Ar);

        assert!(app.error_message.is_some());
        let selected = app.selected_experience().unwrap();
        assert_eq!(selected.experience_types, vec![CategoryKey::Ar]);
    }
}
