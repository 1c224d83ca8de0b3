pub mod dxt;
mod format;
#[allow(clippy::module_inception)]
mod texture;

pub use format::*;
pub use texture::*;
