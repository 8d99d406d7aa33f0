//! Client-side overlay cache for fields the backend does not persist:
//! recipe images, per-slot nutrition, and pre-endpoint ratings.

mod backend;
mod keys;
mod store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend, StorageError};
pub use keys::{
    is_valid_day, is_valid_time, recipe_key_candidates, slot_key, SLOT_KEY_SEPARATOR,
};
pub use store::{OverlayStore, IMAGES_NAMESPACE, NUTRITION_NAMESPACE, RATINGS_NAMESPACE};
