pub mod blur;
pub mod classify;
/// Glyph selection engine for edgescii.
///
/// Turns a source image into a grid of glyph cells: block sampling,
/// difference-of-Gaussians edge field, per-block direction vote and
/// luminance tone mapping.
pub mod edge;
pub mod luminance;
pub mod mapper;
pub mod pipeline;
pub mod plane;

pub use classify::BlockClassification;
pub use edge::GradientField;
pub use mapper::GlyphMapper;
pub use pipeline::render_grid;
pub use plane::Plane;
