use thiserror::Error;

/// Errors originating from the core pipeline and its I/O boundary.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Source image too small for the requested block size.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Input image could not be read or decoded.
    #[error("Impossible de décoder {path} : {reason}")]
    Decode {
        /// Path of the input file.
        path: String,
        /// Underlying decoder message.
        reason: String,
    },

    /// Output image could not be encoded or written.
    #[error("Impossible d'écrire {path} : {reason}")]
    Encode {
        /// Path of the output file.
        path: String,
        /// Underlying encoder message.
        reason: String,
    },

    /// The resampler rejected its buffers.
    #[error("Redimensionnement impossible : {0}")]
    Resize(String),

    /// Font file missing or unreadable. Recovered by the built-in glyph set.
    #[error("Police indisponible : {0}")]
    FontUnavailable(String),
}
