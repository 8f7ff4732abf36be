//! Minimal image viewer: pick a picture from the current directory and display it.
//! Built with Rust + egui (eframe)

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod catalog;
mod config;
mod error;
mod image_loader;
mod viewer;

use std::path::PathBuf;

use eframe::egui;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use app::ImageViewerApp;
use catalog::Catalog;
use config::Config;
use error::Result;
use viewer::Viewer;

/// Log filter from `RUST_LOG` directives, `info` when none are given.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

fn main() -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .init();

    let config = Config::load();

    // The listing is taken once, before any window exists.
    let dir = PathBuf::from(".");
    let catalog = Catalog::scan(dir, &config).inspect_err(|err| error!(%err, "cannot start"))?;
    info!(
        dir = %catalog.dir().display(),
        entries = catalog.len(),
        target = ?config.target_size,
        resize_filter = config.resize_filter.as_str(),
        texture_filter = config.texture_filter.as_str(),
        "found images"
    );

    let viewer = Viewer::new(catalog, &config);
    let app = ImageViewerApp::new(viewer, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.window_title.clone())
            .with_inner_size(config.window_size),
        ..Default::default()
    };

    eframe::run_native(
        &config.window_title,
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_filter_defaults_to_info() {
        assert_eq!(log_filter("").max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn bare_level_is_not_overridden() {
        assert_eq!(log_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter("warn").max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn target_directive_is_kept() {
        let filter = log_filter("image_viewer::viewer=trace");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
        assert!(filter.to_string().contains("image_viewer::viewer=trace"));
    }
}
