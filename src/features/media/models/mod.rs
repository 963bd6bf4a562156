mod media_file;

pub use media_file::{MediaFile, MediaKind, MAX_MEDIA_SIZE};
