/// Configuration, types, and shared structures for edgescii.
///
/// This crate contains the pixel containers, the glyph ramp and stroke
/// tables, the error taxonomy and the configuration logic shared across
/// the edgescii workspace.

pub mod charset;
pub mod color;
pub mod config;
pub mod direction;
pub mod error;
pub mod frame;
pub mod traits;

pub use charset::{GlyphRamp, StrokeSet};
pub use config::PipelineConfig;
pub use direction::DirectionBin;
pub use error::CoreError;
pub use frame::{Canvas, FrameBuffer, GlyphCell, GlyphGrid};
