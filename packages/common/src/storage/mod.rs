mod error;
mod payload;
mod photo;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use payload::{decode_image_payload, strip_data_url};
pub use photo::{DEFAULT_EXTENSION, PhotoRole, PhotoStem, photo_extension};
pub use traits::{PhotoStore, SavedPhotos};
