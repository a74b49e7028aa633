pub mod constants;
pub mod errors;
pub mod key;
pub mod resolver;
pub mod response;
pub mod storage;
pub mod transform;
pub mod validation;

// 公開API
pub use constants::{
    BAD_REQUEST_BODY, DEFAULT_QUALITY, MAX_KEY_LENGTH, MAX_OUTPUT_PIXELS, NOT_FOUND_BODY,
};
pub use errors::{KeyError, ResolveError, StorageError, StorageResult, TransformError};
pub use key::{parse_key, Extension, FitMode, KeyDescriptor, ParsedKey};
pub use resolver::{derivative_put, Resolution, Resolver};
pub use response::{Response, Status};
pub use storage::{ObjectMetadata, ObjectStore, PutObject, S3ObjectStore, StoredObject};
pub use transform::{
    apply_orientation, decode_image, encode_image, plan_resize, read_orientation, resize_image,
    CropBox, ImageTransformer, Orientation, OutputFormat, ResizePlan, TransformParams,
    Transformed, Transformer,
};
pub use validation::{decode_key, parse_dimension};
