use anyhow::{Context, Result};
use clap::Parser;
use es_core::config::PipelineConfig;

pub mod cli;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config, puis les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    // 4. Décoder la source
    let image = es_source::load_image(&cli.input)?;

    // 5. Police (repli non fatal sur le jeu intégré)
    let raster =
        es_export::load_rasterizer(&config.font_path, config.pixel_size, &config.glyph_set());

    // 6. Rendu + écriture
    let canvas = es_export::render_canvas(&image, &config, raster.as_ref())
        .with_context(|| format!("Rendu impossible pour {}", cli.input.display()))?;
    es_export::save_png(&canvas, &cli.output)?;

    println!("ASCII art saved to {}", cli.output.display());
    Ok(())
}

fn resolve_config(cli: &cli::Cli) -> Result<PipelineConfig> {
    if cli.config.exists() {
        es_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::io::Write;

    fn cli_with_config(path: &std::path::Path) -> cli::Cli {
        let args: [OsString; 4] = [
            "edgescii".into(),
            "in.png".into(),
            "--config".into(),
            path.as_os_str().to_os_string(),
        ];
        cli::Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn missing_config_uses_defaults() {
        let cli = cli_with_config(std::path::Path::new("/definitely/not/edgescii.toml"));
        assert_eq!(resolve_config(&cli).unwrap(), PipelineConfig::default());
    }

    #[test]
    fn config_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pipeline]\nedge_detection = true\npixel_size = 6").unwrap();
        let config = resolve_config(&cli_with_config(file.path())).unwrap();
        assert!(config.edge_detection);
        assert_eq!(config.pixel_size, 6);
    }

    #[test]
    fn broken_config_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[pipeline\npixel_size = ").unwrap();
        assert!(resolve_config(&cli_with_config(file.path())).is_err());
    }
}
