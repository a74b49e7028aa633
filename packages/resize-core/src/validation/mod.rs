pub mod key;
pub mod params;

pub use key::decode_key;
pub use params::parse_dimension;
