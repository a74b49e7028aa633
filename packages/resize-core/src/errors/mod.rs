mod types;

pub use types::{KeyError, ResolveError, StorageError, StorageResult, TransformError};
