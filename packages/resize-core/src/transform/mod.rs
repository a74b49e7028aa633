pub mod decode;
pub mod dimensions;
pub mod encode;
pub mod orientation;
pub mod params;
pub mod pipeline;
pub mod resize;

pub use decode::decode_image;
pub use dimensions::{calculate_contain_dimensions, plan_resize, CropBox, ResizePlan};
pub use encode::encode_image;
pub use orientation::{apply_orientation, read_orientation, Orientation};
pub use params::{OutputFormat, TransformParams};
pub use pipeline::{ImageTransformer, Transformed, Transformer};
pub use resize::resize_image;
