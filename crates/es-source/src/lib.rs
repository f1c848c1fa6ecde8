/// Image decoding and block sampling for edgescii.

pub mod image;
pub mod resize;

pub use crate::image::load_image;
pub use resize::{Resizer, downsample, grid_dimensions};
