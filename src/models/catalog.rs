use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed category vocabulary. The wire format and the generated app both key
/// the menu by these lowercase names, so they are not user-extensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Ar,
    Mr,
    Vr,
}

impl CategoryKey {
    /// Display order of the categories, which is also their serialization order.
    pub const ALL: [CategoryKey; 3] = [CategoryKey::Ar, CategoryKey::Mr, CategoryKey::Vr];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Ar => "ar",
            CategoryKey::Mr => "mr",
            CategoryKey::Vr => "vr",
        }
    }

    /// Short uppercase label, e.g. for tags on experience cards.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryKey::Ar => "AR",
            CategoryKey::Mr => "MR",
            CategoryKey::Vr => "VR",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CategoryKey::Ar => "Augmented Reality",
            CategoryKey::Mr => "Mixed Reality",
            CategoryKey::Vr => "Virtual Reality",
        }
    }

    pub fn parse(s: &str) -> Option<CategoryKey> {
        match s.to_lowercase().as_str() {
            "ar" => Some(CategoryKey::Ar),
            "mr" => Some(CategoryKey::Mr),
            "vr" => Some(CategoryKey::Vr),
            _ => None,
        }
    }

    pub fn next(&self) -> CategoryKey {
        match self {
            CategoryKey::Ar => CategoryKey::Mr,
            CategoryKey::Mr => CategoryKey::Vr,
            CategoryKey::Vr => CategoryKey::Ar,
        }
    }

    pub fn previous(&self) -> CategoryKey {
        match self {
            CategoryKey::Ar => CategoryKey::Vr,
            CategoryKey::Mr => CategoryKey::Ar,
            CategoryKey::Vr => CategoryKey::Mr,
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placement of a model in the rendered scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn one() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        }
    }

    pub fn set_component(&mut self, axis: &str, value: f64) -> bool {
        match axis {
            "x" => self.x = value,
            "y" => self.y = value,
            "z" => self.z = value,
            _ => return false,
        }
        true
    }
}

/// One catalog entry describing a 3D/AR/VR piece of content, or a link to an
/// externally hosted experience. Field names serialize in camelCase to stay
/// byte-compatible with exports produced by the web editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub model_url: String,
    #[serde(default)]
    pub external_url: String,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default = "Vec3::zero")]
    pub position: Vec3,
    #[serde(default = "Vec3::zero")]
    pub rotation: Vec3,
    #[serde(default = "Vec3::one")]
    pub scale: Vec3,
    pub experience_types: Vec<CategoryKey>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

const ID_LENGTH: usize = 9;
const ID_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random base-36 token. Nine characters give ~46 bits of entropy, enough to
/// make collisions within a single catalog negligible.
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LENGTH)
        .map(|_| ID_CHARSET[rng.random_range(0..ID_CHARSET.len())] as char)
        .collect()
}

impl Experience {
    pub fn new(key: CategoryKey) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            title: format!("New {} Experience", key.label()),
            description: String::from("Enter a description for this experience"),
            thumbnail_url: String::new(),
            model_url: String::new(),
            external_url: String::new(),
            is_external: false,
            position: Vec3::zero(),
            rotation: Vec3::zero(),
            scale: Vec3::one(),
            experience_types: vec![key],
            created_at: now,
            updated_at: now,
        }
    }

    /// Pre-filled entry used to seed a first-run catalog.
    pub fn sample(key: CategoryKey) -> Self {
        let mut experience = Self::new(key);
        experience.title = format!("Sample {} Experience", key.label());
        experience.description = format!(
            "This is a sample {} experience. You can edit this description.",
            key.as_str()
        );
        experience.model_url = String::from("https://example.com/models/sample.glb");
        experience.thumbnail_url = String::from("https://via.placeholder.com/300x180?text=Sample");
        experience
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// One named grouping holding an ordered list of experiences. The order of the
/// list is the display order and the target of reorder operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub title: String,
    pub experiences: Vec<Experience>,
}

impl Category {
    pub fn new(key: CategoryKey) -> Self {
        Self {
            title: String::from(key.title()),
            experiences: Vec::new(),
        }
    }
}

/// The fixed category mapping. Modeling the three keys as struct fields keeps
/// the vocabulary closed at the type level and gives serialization a stable
/// key order for free.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub ar: Category,
    pub mr: Category,
    pub vr: Category,
}

impl Menu {
    pub fn category(&self, key: CategoryKey) -> &Category {
        match key {
            CategoryKey::Ar => &self.ar,
            CategoryKey::Mr => &self.mr,
            CategoryKey::Vr => &self.vr,
        }
    }

    pub fn category_mut(&mut self, key: CategoryKey) -> &mut Category {
        match key {
            CategoryKey::Ar => &mut self.ar,
            CategoryKey::Mr => &mut self.mr,
            CategoryKey::Vr => &mut self.vr,
        }
    }

    pub fn entries(&self) -> [(CategoryKey, &Category); 3] {
        [
            (CategoryKey::Ar, &self.ar),
            (CategoryKey::Mr, &self.mr),
            (CategoryKey::Vr, &self.vr),
        ]
    }
}

/// Outcome of a type toggle, so callers can tell "nothing to toggle" apart
/// from "removal refused because it was the last remaining type".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    LastTypeKept,
    NotFound,
}

/// Root of the content model: the full collection of categorized experiences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub menu: Menu,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            menu: Menu {
                ar: Category::new(CategoryKey::Ar),
                mr: Category::new(CategoryKey::Mr),
                vr: Category::new(CategoryKey::Vr),
            },
        }
    }

    /// First-run catalog with two sample entries per category.
    pub fn sample() -> Self {
        let mut catalog = Self::new();
        for key in CategoryKey::ALL {
            let category = catalog.menu.category_mut(key);
            category.experiences.push(Experience::sample(key));
            category.experiences.push(Experience::sample(key));
        }
        catalog
    }

    pub fn category(&self, key: CategoryKey) -> &Category {
        self.menu.category(key)
    }

    pub fn category_mut(&mut self, key: CategoryKey) -> &mut Category {
        self.menu.category_mut(key)
    }

    pub fn total_experiences(&self) -> usize {
        self.menu
            .entries()
            .iter()
            .map(|(_, category)| category.experiences.len())
            .sum()
    }

    /// Appends a freshly constructed experience to the category and returns
    /// its generated id.
    pub fn add_experience(&mut self, key: CategoryKey) -> String {
        let experience = Experience::new(key);
        let id = experience.id.clone();
        self.category_mut(key).experiences.push(experience);
        id
    }

    /// Removes the experience with the given id from whichever category holds
    /// it. Returns false when the id is unknown.
    pub fn delete_experience(&mut self, id: &str) -> bool {
        for key in CategoryKey::ALL {
            let experiences = &mut self.category_mut(key).experiences;
            let before = experiences.len();
            experiences.retain(|exp| exp.id != id);
            if experiences.len() != before {
                return true;
            }
        }
        false
    }

    pub fn find_experience(&self, id: &str) -> Option<(CategoryKey, &Experience)> {
        for (key, category) in self.menu.entries() {
            if let Some(experience) = category.experiences.iter().find(|exp| exp.id == id) {
                return Some((key, experience));
            }
        }
        None
    }

    pub fn find_experience_mut(&mut self, id: &str) -> Option<&mut Experience> {
        // Disjoint field borrows, so one mutable chain can span all three
        // categories.
        [&mut self.menu.ar, &mut self.menu.mr, &mut self.menu.vr]
            .into_iter()
            .flat_map(|category| category.experiences.iter_mut())
            .find(|exp| exp.id == id)
    }

    /// Sets a single field, addressed by its wire name ("title", "modelUrl",
    /// "position.x", ...), from its textual input. Numeric components that
    /// fail to parse default to 0 instead of failing the update. Returns
    /// false when the id or field path is unknown.
    pub fn update_field(&mut self, id: &str, field: &str, value: &str) -> bool {
        let Some(experience) = self.find_experience_mut(id) else {
            return false;
        };

        let applied = match field {
            "title" => {
                experience.title = value.to_string();
                true
            }
            "description" => {
                experience.description = value.to_string();
                true
            }
            "thumbnailUrl" => {
                experience.thumbnail_url = value.to_string();
                true
            }
            "modelUrl" => {
                experience.model_url = value.to_string();
                true
            }
            "externalUrl" => {
                experience.external_url = value.to_string();
                true
            }
            "isExternal" => {
                experience.is_external = matches!(value, "true" | "1" | "yes");
                true
            }
            _ => match field.split_once('.') {
                Some((parent, axis)) => {
                    let numeric = value.parse::<f64>().unwrap_or(0.0);
                    match parent {
                        "position" => experience.position.set_component(axis, numeric),
                        "rotation" => experience.rotation.set_component(axis, numeric),
                        "scale" => experience.scale.set_component(axis, numeric),
                        _ => false,
                    }
                }
                None => false,
            },
        };

        if applied {
            experience.touch();
        }
        applied
    }

    /// Adds the type when absent, removes it when present, but refuses to
    /// empty the set: the last remaining type is kept.
    pub fn toggle_experience_type(&mut self, id: &str, key: CategoryKey) -> ToggleOutcome {
        let Some(experience) = self.find_experience_mut(id) else {
            return ToggleOutcome::NotFound;
        };

        if experience.experience_types.contains(&key) {
            if experience.experience_types.len() <= 1 {
                return ToggleOutcome::LastTypeKept;
            }
            experience.experience_types.retain(|ty| *ty != key);
            experience.touch();
            ToggleOutcome::Removed
        } else {
            experience.experience_types.push(key);
            experience.touch();
            ToggleOutcome::Added
        }
    }

    /// Moves the experience `from_id` to the slot `to_id` occupied before the
    /// move, within one category. No-op (false) when either id is missing
    /// from that category or both are the same entry.
    pub fn reorder(&mut self, key: CategoryKey, from_id: &str, to_id: &str) -> bool {
        if from_id == to_id {
            return false;
        }

        let experiences = &mut self.category_mut(key).experiences;
        let from_index = experiences.iter().position(|exp| exp.id == from_id);
        let to_index = experiences.iter().position(|exp| exp.id == to_id);

        let (Some(from_index), Some(to_index)) = (from_index, to_index) else {
            return false;
        };

        let moved = experiences.remove(from_index);
        experiences.insert(to_index, moved);
        true
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_base36_tokens() {
        for _ in 0..50 {
            let id = generate_id();
            assert_eq!(id.len(), 9);
            assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_new_experience_carries_its_category_type() {
        let experience = Experience::new(CategoryKey::Mr);
        assert_eq!(experience.experience_types, vec![CategoryKey::Mr]);
        assert_eq!(experience.position, Vec3::zero());
        assert_eq!(experience.scale, Vec3::one());
        assert!(!experience.is_external);
    }

    #[test]
    fn test_add_then_find_experience() {
        let mut catalog = Catalog::new();
        let id = catalog.add_experience(CategoryKey::Vr);

        let (key, experience) = catalog.find_experience(&id).unwrap();
        assert_eq!(key, CategoryKey::Vr);
        assert_eq!(experience.title, "New VR Experience");
    }

    #[test]
    fn test_find_experience_mut_reaches_every_category() {
        let mut catalog = Catalog::new();
        let ids: Vec<String> = CategoryKey::ALL
            .into_iter()
            .map(|key| catalog.add_experience(key))
            .collect();

        for (index, id) in ids.iter().enumerate() {
            let experience = catalog.find_experience_mut(id).unwrap();
            experience.title = format!("Entry {}", index);
        }

        for (index, id) in ids.iter().enumerate() {
            let (_, experience) = catalog.find_experience(id).unwrap();
            assert_eq!(experience.title, format!("Entry {}", index));
        }
        assert!(catalog.find_experience_mut("missing00").is_none());
    }

    #[test]
    fn test_delete_removes_exactly_one_entry() {
        let mut catalog = Catalog::sample();
        let id = catalog.category(CategoryKey::Ar).experiences[0].id.clone();
        let mr_before = catalog.category(CategoryKey::Mr).experiences.clone();
        let vr_before = catalog.category(CategoryKey::Vr).experiences.clone();

        assert!(catalog.delete_experience(&id));
        assert_eq!(catalog.category(CategoryKey::Ar).experiences.len(), 1);
        assert_eq!(catalog.category(CategoryKey::Mr).experiences, mr_before);
        assert_eq!(catalog.category(CategoryKey::Vr).experiences, vr_before);
        assert!(catalog.find_experience(&id).is_none());

        // Deleting an unknown id is a no-op, not an error
        assert!(!catalog.delete_experience("missing00"));
    }

    #[test]
    fn test_update_field_sets_string_fields() {
        let mut catalog = Catalog::new();
        let id = catalog.add_experience(CategoryKey::Ar);

        assert!(catalog.update_field(&id, "title", "Museum Tour"));
        assert!(catalog.update_field(&id, "modelUrl", "https://example.com/tour.glb"));
        assert!(catalog.update_field(&id, "isExternal", "true"));

        let (_, experience) = catalog.find_experience(&id).unwrap();
        assert_eq!(experience.title, "Museum Tour");
        assert_eq!(experience.model_url, "https://example.com/tour.glb");
        assert!(experience.is_external);
    }

    #[test]
    fn test_update_field_bad_numeric_defaults_to_zero() {
        let mut catalog = Catalog::new();
        let id = catalog.add_experience(CategoryKey::Ar);

        assert!(catalog.update_field(&id, "position.x", "2.5"));
        assert!(catalog.update_field(&id, "scale.y", "not a number"));

        let (_, experience) = catalog.find_experience(&id).unwrap();
        assert_eq!(experience.position.x, 2.5);
        assert_eq!(experience.scale.y, 0.0);
    }

    #[test]
    fn test_update_field_rejects_unknown_paths() {
        let mut catalog = Catalog::new();
        let id = catalog.add_experience(CategoryKey::Ar);

        assert!(!catalog.update_field(&id, "color", "red"));
        assert!(!catalog.update_field(&id, "position.w", "1"));
        assert!(!catalog.update_field("missing00", "title", "x"));
    }

    #[test]
    fn test_toggle_never_empties_the_type_set() {
        let mut catalog = Catalog::new();
        let id = catalog.add_experience(CategoryKey::Ar);

        assert_eq!(
            catalog.toggle_experience_type(&id, CategoryKey::Ar),
            ToggleOutcome::LastTypeKept
        );
        assert_eq!(
            catalog.toggle_experience_type(&id, CategoryKey::Vr),
            ToggleOutcome::Added
        );
        assert_eq!(
            catalog.toggle_experience_type(&id, CategoryKey::Ar),
            ToggleOutcome::Removed
        );
        assert_eq!(
            catalog.toggle_experience_type(&id, CategoryKey::Vr),
            ToggleOutcome::LastTypeKept
        );

        let (_, experience) = catalog.find_experience(&id).unwrap();
        assert_eq!(experience.experience_types, vec![CategoryKey::Vr]);
        assert_eq!(
            catalog.toggle_experience_type("missing00", CategoryKey::Ar),
            ToggleOutcome::NotFound
        );
    }

    #[test]
    fn test_reorder_preserves_the_id_multiset() {
        let mut catalog = Catalog::new();
        let a = catalog.add_experience(CategoryKey::Vr);
        let b = catalog.add_experience(CategoryKey::Vr);
        let c = catalog.add_experience(CategoryKey::Vr);

        assert!(catalog.reorder(CategoryKey::Vr, &a, &c));

        let ids: Vec<_> = catalog
            .category(CategoryKey::Vr)
            .experiences
            .iter()
            .map(|exp| exp.id.clone())
            .collect();
        assert_eq!(ids, vec![b.clone(), c.clone(), a.clone()]);

        let mut sorted = ids.clone();
        sorted.sort();
        let mut expected = vec![a.clone(), b.clone(), c.clone()];
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_reorder_noop_cases() {
        let mut catalog = Catalog::new();
        let a = catalog.add_experience(CategoryKey::Ar);
        let b = catalog.add_experience(CategoryKey::Ar);
        let other = catalog.add_experience(CategoryKey::Vr);

        assert!(!catalog.reorder(CategoryKey::Ar, &a, &a));
        assert!(!catalog.reorder(CategoryKey::Ar, &a, "missing00"));
        // Ids from a different category do not move anything
        assert!(!catalog.reorder(CategoryKey::Ar, &a, &other));
        assert_eq!(catalog.category(CategoryKey::Ar).experiences[0].id, a);
        assert_eq!(catalog.category(CategoryKey::Ar).experiences[1].id, b);
    }
}
