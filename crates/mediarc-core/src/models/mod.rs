pub mod media;
pub mod query;

pub use media::{Deleted, MediaKind, MediaRecord, VariantMap, VariantName, VariantSet};
pub use query::{MediaPage, MediaQuery};
