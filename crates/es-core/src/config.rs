use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::charset::{GlyphRamp, RAMP_DEFAULT, STROKES_DEFAULT, StrokeSet};
use crate::error::CoreError;

/// Difference-of-Gaussians binarization level, on the 8-bit scale.
pub const DOG_THRESHOLD: u8 = 200;

/// Default block edge in source pixels.
pub const DEFAULT_PIXEL_SIZE: u32 = 8;

/// Default canvas background (RGBA).
pub const DEFAULT_BACKGROUND: [u8; 4] = [3, 46, 58, 255];

/// Default TrueType font looked up for glyph rendering.
pub const DEFAULT_FONT: &str = "Courier_New.ttf";

/// Configuration complète d'un rendu.
///
/// Chargée depuis TOML via [`parse_config`]. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use es_core::config::PipelineConfig;
/// let config = PipelineConfig::default();
/// assert_eq!(config.pixel_size, 8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    // === Échantillonnage ===
    /// Côté d'un bloc en pixels source (> 0).
    pub pixel_size: u32,

    // === Contours ===
    /// Activer les traits directionnels sur les contours.
    pub edge_detection: bool,
    /// Sigma du flou étroit (> 0, < sigma2).
    pub sigma1: f32,
    /// Sigma du flou large.
    pub sigma2: f32,
    /// Magnitude moyenne au-delà de laquelle un bloc devient un trait.
    pub edge_threshold: f32,

    // === Glyphes ===
    /// Rampe du plus clair au plus dense.
    pub ramp: String,
    /// Inverser la rampe (pour fond clair).
    pub invert_ramp: bool,
    /// Traits pour 0°, 45°, 90°, 135°.
    pub strokes: String,

    // === Rendu ===
    /// Couleur fixe des glyphes. `None` = couleur du bloc.
    pub glyph_fill: Option<[u8; 3]>,
    /// Couleur de fond RGBA.
    pub background: [u8; 4],
    /// Police TrueType. Repli sur le jeu intégré si introuvable.
    pub font_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pixel_size: DEFAULT_PIXEL_SIZE,
            edge_detection: false,
            sigma1: 0.5,
            sigma2: 1.0,
            edge_threshold: 5200.0,
            ramp: RAMP_DEFAULT.to_string(),
            invert_ramp: false,
            strokes: STROKES_DEFAULT.to_string(),
            glyph_fill: None,
            background: DEFAULT_BACKGROUND,
            font_path: PathBuf::from(DEFAULT_FONT),
        }
    }
}

impl PipelineConfig {
    /// Check every value the pipeline relies on.
    ///
    /// # Errors
    /// Returns `CoreError::Config` naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.pixel_size == 0 {
            return Err(CoreError::Config("pixel_size doit être > 0".into()));
        }
        if !self.sigma1.is_finite() || !self.sigma2.is_finite() {
            return Err(CoreError::Config("sigma1/sigma2 doivent être finis".into()));
        }
        if self.sigma1 <= 0.0 {
            return Err(CoreError::Config(format!(
                "sigma1 doit être > 0, reçu {}",
                self.sigma1
            )));
        }
        if self.sigma1 >= self.sigma2 {
            return Err(CoreError::Config(format!(
                "sigma1 ({}) doit être < sigma2 ({})",
                self.sigma1, self.sigma2
            )));
        }
        if self.edge_threshold.is_nan() {
            return Err(CoreError::Config("edge_threshold est NaN".into()));
        }
        self.glyph_ramp()?;
        self.stroke_set()?;
        Ok(())
    }

    /// Build the glyph ramp, honoring `invert_ramp`.
    ///
    /// # Errors
    /// Returns `Config` if the ramp is too short.
    pub fn glyph_ramp(&self) -> Result<GlyphRamp, CoreError> {
        GlyphRamp::new(&self.ramp, self.invert_ramp)
    }

    /// Build the direction→stroke binding.
    ///
    /// # Errors
    /// Returns `Config` unless `strokes` holds exactly 4 glyphs.
    pub fn stroke_set(&self) -> Result<StrokeSet, CoreError> {
        StrokeSet::new(&self.strokes)
    }

    /// Every glyph a run can draw, ramp first, without duplicates.
    ///
    /// # Example
    /// ```
    /// use es_core::config::PipelineConfig;
    /// let config = PipelineConfig { ramp: " |#".into(), ..PipelineConfig::default() };
    /// assert_eq!(config.glyph_set(), vec![' ', '|', '#', '/', '_', '\\']);
    /// ```
    #[must_use]
    pub fn glyph_set(&self) -> Vec<char> {
        let mut glyphs: Vec<char> = Vec::new();
        for ch in self.ramp.chars().chain(self.strokes.chars()) {
            if !glyphs.contains(&ch) {
                glyphs.push(ch);
            }
        }
        glyphs
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    pipeline: Option<PipelineSection>,
    render: Option<RenderSection>,
}

/// Pipeline section, all fields optional for partial override.
#[derive(Deserialize)]
struct PipelineSection {
    pixel_size: Option<u32>,
    edge_detection: Option<bool>,
    sigma1: Option<f32>,
    sigma2: Option<f32>,
    edge_threshold: Option<f32>,
    ramp: Option<String>,
    invert_ramp: Option<bool>,
    strokes: Option<String>,
}

/// Render section, all fields optional.
#[derive(Deserialize)]
struct RenderSection {
    glyph_fill: Option<[u8; 3]>,
    background: Option<[u8; 4]>,
    font_path: Option<PathBuf>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if the merged
/// configuration does not validate.
///
/// # Example
/// ```no_run
/// use es_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Erreur de configuration dans {}", path.display()))?;
    log::debug!("Config chargée depuis {}", path.display());
    Ok(config)
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error on TOML syntax errors or invalid merged values.
///
/// # Example
/// ```
/// use es_core::config::parse_config;
/// let config = parse_config("[pipeline]\npixel_size = 12\n").unwrap();
/// assert_eq!(config.pixel_size, 12);
/// assert_eq!(config.sigma2, 1.0);
/// ```
pub fn parse_config(content: &str) -> Result<PipelineConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;
    let mut config = PipelineConfig::default();

    if let Some(p) = file.pipeline {
        if let Some(v) = p.pixel_size {
            config.pixel_size = v;
        }
        if let Some(v) = p.edge_detection {
            config.edge_detection = v;
        }
        if let Some(v) = p.sigma1 {
            config.sigma1 = v;
        }
        if let Some(v) = p.sigma2 {
            config.sigma2 = v;
        }
        if let Some(v) = p.edge_threshold {
            config.edge_threshold = v;
        }
        if let Some(v) = p.ramp {
            config.ramp = v;
        }
        if let Some(v) = p.invert_ramp {
            config.invert_ramp = v;
        }
        if let Some(v) = p.strokes {
            config.strokes = v;
        }
    }

    if let Some(r) = file.render {
        if r.glyph_fill.is_some() {
            config.glyph_fill = r.glyph_fill;
        }
        if let Some(v) = r.background {
            config.background = v;
        }
        if let Some(v) = r.font_path {
            config.font_path = v;
        }
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_pixel_size() {
        let config = PipelineConfig {
            pixel_size: 0,
            ..PipelineConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_inverted_sigmas() {
        let config = PipelineConfig {
            sigma1: 1.0,
            sigma2: 1.0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
        let config = PipelineConfig {
            sigma1: 0.0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_strokes() {
        let config = PipelineConfig {
            strokes: "|/".into(),
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn glyph_set_covers_ramp_and_strokes() {
        let glyphs = PipelineConfig::default().glyph_set();
        assert_eq!(glyphs.len(), 15);
        assert_eq!(glyphs[0], ' ');
        assert_eq!(glyphs[14], '\\');
    }

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn partial_sections_merge() {
        let text = r#"
[pipeline]
edge_detection = true
edge_threshold = 3000.0
ramp = " .:#@"

[render]
glyph_fill = [255, 255, 255]
background = [0, 0, 0, 255]
"#;
        let config = parse_config(text).unwrap();
        assert!(config.edge_detection);
        assert_eq!(config.edge_threshold, 3000.0);
        assert_eq!(config.ramp, " .:#@");
        assert_eq!(config.glyph_fill, Some([255, 255, 255]));
        assert_eq!(config.background, [0, 0, 0, 255]);
        assert_eq!(config.pixel_size, DEFAULT_PIXEL_SIZE);
    }

    #[test]
    fn shipped_default_file_matches_defaults() {
        let text = include_str!("../../../config/default.toml");
        assert_eq!(parse_config(text).unwrap(), PipelineConfig::default());
    }

    #[test]
    fn invalid_merge_is_an_error() {
        assert!(parse_config("[pipeline]\nsigma1 = 2.0\n").is_err());
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pipeline]\npixel_size = 4").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.pixel_size, 4);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Path::new("/definitely/not/here.toml")).is_err());
    }
}
