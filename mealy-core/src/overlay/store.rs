//! The overlay cache itself.
//!
//! The backend persists recipes, meal plans, and accounts, but not
//! recipe images, per-slot nutrition, or ratings captured before the
//! ratings endpoint existed. Those live here, as JSON maps in namespaced
//! storage keys. Reads are tolerant: a missing or unparsable namespace
//! is an empty map. Writes are fire-and-forget: a failure is logged and
//! swallowed, never surfaced as an operation failure.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::backend::{FileBackend, StorageBackend};
use super::keys::{recipe_key_candidates, slot_key};
use crate::models::{RatingEntry, SlotNutrition};

/// Recipe images, keyed by recipe name or stringified id.
pub const IMAGES_NAMESPACE: &str = "mealy_recipe_images";
/// Per-slot nutrition, keyed by `day|time`.
pub const NUTRITION_NAMESPACE: &str = "mealy_meal_nutrition";
/// Locally captured ratings, keyed by stringified recipe id.
pub const RATINGS_NAMESPACE: &str = "mealy_recipe_ratings";

/// Client-side cache of the fields the backend does not store.
pub struct OverlayStore {
    backend: Box<dyn StorageBackend>,
}

impl OverlayStore {
    /// Opens the overlay cache on the filesystem under `data_dir`.
    pub fn open(data_dir: PathBuf) -> Self {
        Self {
            backend: Box::new(FileBackend::new(data_dir)),
        }
    }

    /// Builds an overlay cache over any backend. Tests use the
    /// in-memory one.
    pub fn with_backend(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Reads a namespace as a JSON map. Missing or corrupt data is an
    /// empty map, never an error.
    pub fn read_map<T: DeserializeOwned>(&self, namespace: &str) -> HashMap<String, T> {
        let Some(raw) = self.backend.get(namespace) else {
            return HashMap::new();
        };
        match serde_json::from_str(&raw) {
            Ok(map) => map,
            Err(e) => {
                warn!(namespace, error = %e, "discarding unreadable overlay data");
                HashMap::new()
            }
        }
    }

    /// Writes a namespace as a JSON map. Failures are logged, not
    /// returned; the entry is simply absent on the next read.
    pub fn write_map<T: Serialize>(&self, namespace: &str, map: &HashMap<String, T>) {
        let raw = match serde_json::to_string(map) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(namespace, error = %e, "failed to encode overlay data");
                return;
            }
        };
        if let Err(e) = self.backend.set(namespace, &raw) {
            warn!(namespace, error = %e, "failed to persist overlay data");
        }
    }

    // --- images ---

    /// Stores an encoded image payload under `key` (the recipe name at
    /// creation time, before an id exists).
    pub fn store_image(&self, key: &str, data_url: &str) {
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        let mut images: HashMap<String, String> = self.read_map(IMAGES_NAMESPACE);
        images.insert(key.to_string(), data_url.to_string());
        self.write_map(IMAGES_NAMESPACE, &images);
    }

    /// Looks up a recipe image by name, falling back to the stringified
    /// id. A name hit is mirrored under the id key so id-based lookups
    /// succeed once the record is known by id (migration on read).
    pub fn image_for(&self, name: &str, id: Option<&str>) -> Option<String> {
        let mut images: HashMap<String, String> = self.read_map(IMAGES_NAMESPACE);
        for key in recipe_key_candidates(name, id) {
            let Some(data_url) = images.get(&key).cloned() else {
                continue;
            };
            if key == name.trim() {
                if let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) {
                    if !images.contains_key(id) {
                        images.insert(id.to_string(), data_url.clone());
                        self.write_map(IMAGES_NAMESPACE, &images);
                    }
                }
            }
            return Some(data_url);
        }
        None
    }

    /// Drops every image entry reachable from this recipe's keys.
    /// Best-effort cleanup when a recipe is deleted.
    pub fn remove_image(&self, name: &str, id: Option<&str>) {
        let mut images: HashMap<String, String> = self.read_map(IMAGES_NAMESPACE);
        let mut changed = false;
        for key in recipe_key_candidates(name, id) {
            changed |= images.remove(&key).is_some();
        }
        if changed {
            self.write_map(IMAGES_NAMESPACE, &images);
        }
    }

    // --- slot nutrition ---

    /// Overlay nutrition for one calendar slot.
    pub fn nutrition_for_slot(&self, day: &str, time: &str) -> Option<SlotNutrition> {
        let map: HashMap<String, SlotNutrition> = self.read_map(NUTRITION_NAMESPACE);
        map.get(&slot_key(day, time)).cloned()
    }

    /// Writes the overlay nutrition record for a slot, replacing any
    /// previous record for the same (day, time).
    pub fn put_slot_nutrition(&self, day: &str, time: &str, record: SlotNutrition) {
        let mut map: HashMap<String, SlotNutrition> = self.read_map(NUTRITION_NAMESPACE);
        map.insert(slot_key(day, time), record);
        self.write_map(NUTRITION_NAMESPACE, &map);
    }

    /// Removes the overlay record for a slot. Returns whether one
    /// existed.
    pub fn remove_slot_nutrition(&self, day: &str, time: &str) -> bool {
        let mut map: HashMap<String, SlotNutrition> = self.read_map(NUTRITION_NAMESPACE);
        let removed = map.remove(&slot_key(day, time)).is_some();
        if removed {
            self.write_map(NUTRITION_NAMESPACE, &map);
        }
        removed
    }

    /// Finds overlay nutrition for a recipe by scanning slot records:
    /// first by recipe id, then by recipe name.
    pub fn nutrition_for_recipe(&self, name: &str, id: Option<&str>) -> Option<SlotNutrition> {
        let map: HashMap<String, SlotNutrition> = self.read_map(NUTRITION_NAMESPACE);
        if let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) {
            if let Some(record) = map.values().find(|r| r.recipe_id.as_deref() == Some(id)) {
                return Some(record.clone());
            }
        }
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        map.values().find(|r| r.recipe_name == name).cloned()
    }

    // --- legacy local ratings ---

    /// Locally captured ratings for a recipe, oldest first.
    pub fn ratings_for(&self, recipe_id: &str) -> Vec<RatingEntry> {
        let map: HashMap<String, Vec<RatingEntry>> = self.read_map(RATINGS_NAMESPACE);
        map.get(recipe_id).cloned().unwrap_or_default()
    }

    /// Appends a rating to the local map for a recipe.
    pub fn add_rating(&self, recipe_id: &str, entry: RatingEntry) {
        let mut map: HashMap<String, Vec<RatingEntry>> = self.read_map(RATINGS_NAMESPACE);
        map.entry(recipe_id.to_string()).or_default().push(entry);
        self.write_map(RATINGS_NAMESPACE, &map);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutritionFacts;
    use crate::overlay::backend::MemoryBackend;
    use tempfile::TempDir;

    fn memory_store() -> OverlayStore {
        OverlayStore::with_backend(Box::new(MemoryBackend::new()))
    }

    #[test]
    fn test_read_missing_namespace_is_empty() {
        let store = memory_store();
        let map: HashMap<String, String> = store.read_map(IMAGES_NAMESPACE);
        assert!(map.is_empty());
    }

    #[test]
    fn test_read_corrupt_namespace_is_empty() {
        let backend = MemoryBackend::new();
        backend.set(IMAGES_NAMESPACE, "{not json").unwrap();
        let store = OverlayStore::with_backend(Box::new(backend));
        let map: HashMap<String, String> = store.read_map(IMAGES_NAMESPACE);
        assert!(map.is_empty());
    }

    #[test]
    fn test_write_then_read_last_write_wins() {
        let store = memory_store();
        store.store_image("Soup", "data:image/jpeg;base64,AAAA");
        store.store_image("Soup", "data:image/jpeg;base64,BBBB");
        assert_eq!(
            store.image_for("Soup", None).as_deref(),
            Some("data:image/jpeg;base64,BBBB")
        );
    }

    #[test]
    fn test_image_lookup_name_then_id_migration() {
        let store = memory_store();
        store.store_image("Soup", "data:image/jpeg;base64,AAAA");

        // Name hit with a known id mirrors the entry under the id key.
        let hit = store.image_for("Soup", Some("42"));
        assert_eq!(hit.as_deref(), Some("data:image/jpeg;base64,AAAA"));

        let images: HashMap<String, String> = store.read_map(IMAGES_NAMESPACE);
        assert_eq!(images.get("Soup"), images.get("42"));
        assert_eq!(images.len(), 2);

        // A later lookup that only knows the id still succeeds.
        let by_id = store.image_for("Renamed Soup", Some("42"));
        assert_eq!(by_id.as_deref(), Some("data:image/jpeg;base64,AAAA"));
    }

    #[test]
    fn test_image_migration_does_not_clobber_id_entry() {
        let store = memory_store();
        store.store_image("Soup", "data:image/jpeg;base64,NAME");
        store.store_image("42", "data:image/jpeg;base64,ID");

        assert_eq!(
            store.image_for("Soup", Some("42")).as_deref(),
            Some("data:image/jpeg;base64,NAME")
        );
        let images: HashMap<String, String> = store.read_map(IMAGES_NAMESPACE);
        assert_eq!(images.get("42").map(String::as_str), Some("data:image/jpeg;base64,ID"));
    }

    #[test]
    fn test_shared_name_aliases_to_one_image() {
        // Two recipes with the same display name share one image entry.
        // Known limitation of name-keyed overlay data.
        let store = memory_store();
        store.store_image("Pasta", "data:image/jpeg;base64,FIRST");
        store.store_image("Pasta", "data:image/jpeg;base64,SECOND");

        assert_eq!(
            store.image_for("Pasta", Some("1")).as_deref(),
            Some("data:image/jpeg;base64,SECOND")
        );
        assert_eq!(
            store.image_for("Pasta", Some("2")).as_deref(),
            Some("data:image/jpeg;base64,SECOND")
        );
    }

    #[test]
    fn test_remove_image_clears_all_keys() {
        let store = memory_store();
        store.store_image("Soup", "data:image/jpeg;base64,AAAA");
        store.image_for("Soup", Some("42"));

        store.remove_image("Soup", Some("42"));
        assert!(store.image_for("Soup", Some("42")).is_none());
        let images: HashMap<String, String> = store.read_map(IMAGES_NAMESPACE);
        assert!(images.is_empty());
    }

    #[test]
    fn test_slot_nutrition_roundtrip_and_replace() {
        let store = memory_store();
        let first = SlotNutrition::new(Some("1".into()), "Pasta", NutritionFacts::new(650.0, 32.0, 70.0, 18.0));
        let second = SlotNutrition::new(Some("2".into()), "Salad", NutritionFacts::new(320.0, 12.0, 20.0, 9.0));

        store.put_slot_nutrition("2026-05-01", "12:00", first);
        store.put_slot_nutrition("2026-05-01", "12:00", second.clone());

        let map: HashMap<String, SlotNutrition> = store.read_map(NUTRITION_NAMESPACE);
        assert_eq!(map.len(), 1);
        assert_eq!(store.nutrition_for_slot("2026-05-01", "12:00"), Some(second));
    }

    #[test]
    fn test_remove_slot_nutrition() {
        let store = memory_store();
        let record = SlotNutrition::new(None, "Soup", NutritionFacts::default());
        store.put_slot_nutrition("2026-05-01", "18:30", record);

        assert!(store.remove_slot_nutrition("2026-05-01", "18:30"));
        assert!(!store.remove_slot_nutrition("2026-05-01", "18:30"));
        assert!(store.nutrition_for_slot("2026-05-01", "18:30").is_none());
    }

    #[test]
    fn test_nutrition_for_recipe_prefers_id_over_name() {
        let store = memory_store();
        store.put_slot_nutrition(
            "2026-05-01",
            "12:00",
            SlotNutrition::new(Some("1".into()), "Pasta", NutritionFacts::new(650.0, 0.0, 0.0, 0.0)),
        );
        store.put_slot_nutrition(
            "2026-05-02",
            "12:00",
            SlotNutrition::new(Some("2".into()), "Pasta", NutritionFacts::new(500.0, 0.0, 0.0, 0.0)),
        );

        let by_id = store.nutrition_for_recipe("Pasta", Some("2")).unwrap();
        assert_eq!(by_id.facts.calories, 500.0);

        let by_name = store.nutrition_for_recipe("Pasta", None).unwrap();
        assert_eq!(by_name.recipe_name, "Pasta");
    }

    #[test]
    fn test_ratings_append_and_order() {
        let store = memory_store();
        store.add_rating("7", RatingEntry::new(5, "great"));
        store.add_rating("7", RatingEntry::new(3, "fine"));

        let ratings = store.ratings_for("7");
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings[0].stars, 5);
        assert_eq!(ratings[1].stars, 3);
        assert!(store.ratings_for("8").is_empty());
    }

    #[test]
    fn test_file_backed_store_persists_across_opens() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = OverlayStore::open(temp_dir.path().to_path_buf());
            store.store_image("Soup", "data:image/jpeg;base64,AAAA");
        }
        let store = OverlayStore::open(temp_dir.path().to_path_buf());
        assert_eq!(
            store.image_for("Soup", None).as_deref(),
            Some("data:image/jpeg;base64,AAAA")
        );
    }
}
