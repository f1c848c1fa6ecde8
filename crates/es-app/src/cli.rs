use std::path::PathBuf;

use clap::Parser;
use es_core::color::{parse_rgb, parse_rgba};
use es_core::config::PipelineConfig;

/// edgescii : images en art ASCII rendu, avec traits sur les contours.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    pub input: PathBuf,

    /// Image de sortie.
    #[arg(short, long, default_value = "ascii_art_output.png")]
    pub output: PathBuf,

    /// Côté d'un bloc en pixels source.
    #[arg(short, long)]
    pub pixel_size: Option<u32>,

    /// Sigma du flou étroit (DoG).
    #[arg(long)]
    pub sigma1: Option<f32>,

    /// Sigma du flou large (DoG).
    #[arg(long)]
    pub sigma2: Option<f32>,

    /// Activer les traits directionnels sur les contours.
    #[arg(short, long, default_value_t = false, overrides_with = "no_edge_detection")]
    pub edge_detection: bool,

    /// Désactiver les traits, même si le fichier de config les active.
    #[arg(long, default_value_t = false, overrides_with = "edge_detection")]
    pub no_edge_detection: bool,

    /// Magnitude moyenne au-delà de laquelle un bloc devient un trait.
    #[arg(long)]
    pub edge_threshold: Option<f32>,

    /// Police TrueType. Repli sur le jeu intégré si introuvable.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Couleur fixe des glyphes, "R,G,B".
    #[arg(long, value_parser = parse_fill)]
    pub fill: Option<[u8; 3]>,

    /// Couleur de chaque bloc, ignore la couleur fixe du fichier de config.
    #[arg(long, default_value_t = false, conflicts_with = "fill")]
    pub no_fill: bool,

    /// Couleur de fond, "R,G,B,A".
    #[arg(long, value_parser = parse_background)]
    pub background: Option<[u8; 4]>,

    /// Rampe de glyphes, du plus clair au plus dense.
    #[arg(long)]
    pub ramp: Option<String>,

    /// Traits pour 0°, 45°, 90°, 135°, exactement 4 caractères.
    #[arg(long)]
    pub strokes: Option<String>,

    /// Inverser la rampe (pour fond clair).
    #[arg(long, default_value_t = false, overrides_with = "no_invert")]
    pub invert: bool,

    /// Rampe dans l'ordre d'origine, même si le fichier de config l'inverse.
    #[arg(long, default_value_t = false, overrides_with = "invert")]
    pub no_invert: bool,

    /// Fichier de configuration TOML.
    #[arg(short, long, default_value = "edgescii.toml")]
    pub config: PathBuf,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

fn parse_fill(s: &str) -> Result<[u8; 3], String> {
    parse_rgb(s).ok_or_else(|| format!("couleur attendue au format R,G,B, reçu {s:?}"))
}

fn parse_background(s: &str) -> Result<[u8; 4], String> {
    parse_rgba(s).ok_or_else(|| format!("couleur attendue au format R,G,B,A, reçu {s:?}"))
}

impl Cli {
    /// Apply command-line values over a loaded configuration.
    ///
    /// An absent option keeps the file value. Each switch has a `--no-…`
    /// counterpart; the last one given wins.
    pub fn apply_overrides(&self, config: &mut PipelineConfig) {
        if let Some(v) = self.pixel_size {
            config.pixel_size = v;
        }
        if let Some(v) = self.sigma1 {
            config.sigma1 = v;
        }
        if let Some(v) = self.sigma2 {
            config.sigma2 = v;
        }
        if self.edge_detection {
            config.edge_detection = true;
        } else if self.no_edge_detection {
            config.edge_detection = false;
        }
        if let Some(v) = self.edge_threshold {
            config.edge_threshold = v;
        }
        if let Some(ref v) = self.font {
            config.font_path.clone_from(v);
        }
        if self.fill.is_some() {
            config.glyph_fill = self.fill;
        } else if self.no_fill {
            config.glyph_fill = None;
        }
        if let Some(v) = self.background {
            config.background = v;
        }
        if let Some(ref v) = self.ramp {
            config.ramp.clone_from(v);
        }
        if let Some(ref v) = self.strokes {
            config.strokes.clone_from(v);
        }
        if self.invert {
            config.invert_ramp = true;
        } else if self.no_invert {
            config.invert_ramp = false;
        }
    }
}
