//! DXT compressed texture decoding for xnb content
//!
//! supports the `DXT1`, `DXT3` and `DXT5` surface formats (BC1, BC2, BC3)
//! and decodes them into linear RGBA8 pixels
//!
pub mod error;
pub mod reader;
mod texture;

pub use error::Error;
pub use texture::*;
