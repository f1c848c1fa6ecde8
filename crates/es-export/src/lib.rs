pub mod builtin;
pub mod compositor;
/// Raster output for edgescii.
///
/// Glyph rasterizers (TrueType or built-in), the block compositor and the
/// PNG encoder.
pub mod encode;
pub mod rasterizer;

pub use builtin::BuiltinRasterizer;
pub use compositor::{compose, render_canvas};
pub use encode::save_png;
pub use rasterizer::{FontRasterizer, load_rasterizer};
