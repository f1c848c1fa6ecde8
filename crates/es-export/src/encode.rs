use std::path::Path;

use es_core::error::CoreError;
use es_core::frame::Canvas;
use image::RgbaImage;

/// Écrit la toile sur disque. Le format suit l'extension (PNG par défaut).
///
/// # Errors
/// Returns `CoreError::Encode` if the buffer is inconsistent or the file
/// cannot be written.
///
/// # Example
/// ```no_run
/// use es_core::frame::Canvas;
/// use es_export::encode::save_png;
/// use std::path::Path;
/// let canvas = Canvas::new(8, 8, [3, 46, 58, 255]);
/// save_png(&canvas, Path::new("ascii_art_output.png")).unwrap();
/// ```
pub fn save_png(canvas: &Canvas, path: &Path) -> Result<(), CoreError> {
    let encode_err = |reason: String| CoreError::Encode {
        path: path.display().to_string(),
        reason,
    };
    let img = RgbaImage::from_raw(canvas.width, canvas.height, canvas.data.clone())
        .ok_or_else(|| encode_err("taille du buffer incohérente".into()))?;
    img.save(path).map_err(|e| encode_err(e.to_string()))?;
    log::info!("Image écrite : {} ({}×{})", path.display(), canvas.width, canvas.height);
    Ok(())
}
