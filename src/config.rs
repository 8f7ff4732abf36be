//! Configuration module for the viewer's few tunables.
//! Defaults reproduce the stock behavior; an optional INI file can override them.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use directories::ProjectDirs;
use image::imageops::FilterType;
use thiserror::Error;
use tracing::{debug, warn};

#[cfg(test)]
const DEFAULT_CONFIG_INI: &str = include_str!("../config.ini");

/// Largest accepted `target_width`/`target_height`. The GPU limit is applied
/// separately at display time.
pub const MAX_TARGET_SIDE: u32 = 8192;

/// A filter name that matched no known filter
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown filter '{0}'")]
pub struct UnknownFilter(pub String);

/// Resampling used when resizing to the target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFilter {
    Nearest,
    Triangle,
    /// Bicubic; the default
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ImageFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Triangle => "triangle",
            Self::CatmullRom => "catmullrom",
            Self::Gaussian => "gaussian",
            Self::Lanczos3 => "lanczos3",
        }
    }

    pub fn to_image_filter(&self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl FromStr for ImageFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "nearest" | "nn" => Self::Nearest,
            "triangle" | "bilinear" => Self::Triangle,
            "catmullrom" | "catmull-rom" | "bicubic" => Self::CatmullRom,
            "gaussian" => Self::Gaussian,
            "lanczos" | "lanczos3" => Self::Lanczos3,
            _ => return Err(UnknownFilter(s.trim().to_string())),
        })
    }
}

/// How the uploaded texture is sampled when drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
}

impl TextureFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Linear => "linear",
        }
    }

    pub fn to_egui_options(&self) -> egui::TextureOptions {
        match self {
            Self::Nearest => egui::TextureOptions::NEAREST,
            Self::Linear => egui::TextureOptions::LINEAR,
        }
    }
}

impl FromStr for TextureFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nearest" | "sharp" => Ok(Self::Nearest),
            "linear" | "smooth" => Ok(Self::Linear),
            _ => Err(UnknownFilter(s.trim().to_string())),
        }
    }
}

/// Viewer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Title of the main window
    pub window_title: String,
    /// Initial inner window size in points
    pub window_size: [f32; 2],
    /// Case-sensitive file name suffixes offered in the selector
    pub extensions: Vec<String>,
    /// Exact size every displayed image is resized to (aspect ratio is not kept)
    pub target_size: [u32; 2],
    pub resize_filter: ImageFilter,
    pub texture_filter: TextureFilter,
    /// Natural-order sort instead of directory enumeration order
    pub sort_entries: bool,
    /// Show a control that re-reads the directory
    pub allow_refresh: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_title: "Image Viewer".to_string(),
            window_size: [440.0, 520.0],
            extensions: vec![".jpg".to_string(), ".png".to_string()],
            target_size: [400, 400],
            resize_filter: ImageFilter::CatmullRom,
            texture_filter: TextureFilter::Linear,
            sort_entries: false,
            allow_refresh: false,
        }
    }
}

impl Config {
    /// Settings file path, if the platform has a config directory.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "image-viewer").map(|dirs| dirs.config_dir().join("config.ini"))
    }

    /// Load configuration from the settings file, falling back to defaults.
    /// The file is never created or rewritten.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(path = %path.display(), "loaded config file");
                Self::parse_ini(&content)
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "unreadable config file, using defaults");
                Self::default()
            }
        }
    }

    /// Parse INI content into Config. Unknown keys and bad values are skipped.
    pub fn parse_ini(content: &str) -> Self {
        let mut config = Self::default();
        let mut in_settings_section = false;

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let section = &line[1..line.len() - 1];
                in_settings_section = section.eq_ignore_ascii_case("settings");
                continue;
            }

            if !in_settings_section {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim().to_lowercase();
                let value = value.trim();
                if !config.apply(&key, value) {
                    warn!(key = %key, value = %value, "ignoring config entry");
                }
            }
        }

        config
    }

    /// Apply one `key = value` pair. Returns false if it was not understood.
    fn apply(&mut self, key: &str, value: &str) -> bool {
        match key {
            "window_title" if !value.is_empty() => {
                self.window_title = value.to_string();
                true
            }
            "window_width" => set_positive_f32(&mut self.window_size[0], value),
            "window_height" => set_positive_f32(&mut self.window_size[1], value),
            "extensions" => {
                let extensions = parse_list(value);
                if extensions.is_empty() {
                    return false;
                }
                self.extensions = extensions;
                true
            }
            "target_width" => set_target_side(&mut self.target_size[0], value),
            "target_height" => set_target_side(&mut self.target_size[1], value),
            "resize_filter" => set_parsed(&mut self.resize_filter, value),
            "texture_filter" => set_parsed(&mut self.texture_filter, value),
            "sort_entries" => set_bool(&mut self.sort_entries, value),
            "allow_refresh" => set_bool(&mut self.allow_refresh, value),
            _ => false,
        }
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn set_bool(slot: &mut bool, value: &str) -> bool {
    parse_bool(value).map(|b| *slot = b).is_some()
}

fn set_parsed<T: FromStr>(slot: &mut T, value: &str) -> bool {
    value.parse().map(|v| *slot = v).is_ok()
}

/// Target sides must be in `1..=MAX_TARGET_SIDE`.
fn set_target_side(slot: &mut u32, value: &str) -> bool {
    match value.parse::<u32>() {
        Ok(v) if (1..=MAX_TARGET_SIDE).contains(&v) => {
            *slot = v;
            true
        }
        _ => false,
    }
}

fn set_positive_f32(slot: &mut f32, value: &str) -> bool {
    match value.parse::<f32>() {
        Ok(v) if v.is_finite() && v > 0.0 => {
            *slot = v;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_matches_defaults() {
        assert_eq!(Config::parse_ini(DEFAULT_CONFIG_INI), Config::default());
    }

    #[test]
    fn defaults_are_stock_behavior() {
        let config = Config::default();
        assert_eq!(config.window_title, "Image Viewer");
        assert_eq!(config.extensions, vec![".jpg", ".png"]);
        assert_eq!(config.target_size, [400, 400]);
        assert!(!config.sort_entries);
        assert!(!config.allow_refresh);
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::parse_ini(
            "[Settings]\n\
             target_width = 320\n\
             target_height = 200\n\
             extensions = .gif,.jpeg , .png\n\
             resize_filter = Lanczos3\n\
             texture_filter = nearest\n\
             sort_entries = yes\n\
             allow_refresh = on\n",
        );
        assert_eq!(config.target_size, [320, 200]);
        assert_eq!(config.extensions, vec![".gif", ".jpeg", ".png"]);
        assert_eq!(config.resize_filter, ImageFilter::Lanczos3);
        assert_eq!(config.texture_filter, TextureFilter::Nearest);
        assert!(config.sort_entries);
        assert!(config.allow_refresh);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = Config::parse_ini(
            "[settings]\n\
             target_width = 0\n\
             target_height = -3\n\
             extensions = ,\n\
             resize_filter = blurry\n\
             sort_entries = maybe\n\
             unknown_key = 1\n",
        );
        assert_eq!(config, Config::default());
    }

    #[test]
    fn keys_outside_settings_are_ignored() {
        let config = Config::parse_ini("target_width = 10\n[Other]\ntarget_height = 10\n");
        assert_eq!(config.target_size, [400, 400]);
    }

    #[test]
    fn filter_names_parse() {
        for filter in [
            ImageFilter::Nearest,
            ImageFilter::Triangle,
            ImageFilter::CatmullRom,
            ImageFilter::Gaussian,
            ImageFilter::Lanczos3,
        ] {
            assert_eq!(filter.as_str().parse::<ImageFilter>(), Ok(filter));
        }
        assert_eq!(" Bicubic ".parse::<ImageFilter>(), Ok(ImageFilter::CatmullRom));
        assert_eq!("smooth".parse::<TextureFilter>(), Ok(TextureFilter::Linear));
        assert_eq!(
            "blurry".parse::<TextureFilter>(),
            Err(UnknownFilter("blurry".to_string()))
        );
    }

    #[test]
    fn oversized_target_is_rejected() {
        let config = Config::parse_ini(
            "[Settings]\n\
             target_width = 4294967295\n\
             target_height = 8193\n",
        );
        assert_eq!(config.target_size, [400, 400]);

        let config = Config::parse_ini(&format!(
            "[Settings]\ntarget_width = {MAX_TARGET_SIDE}\ntarget_height = 1\n"
        ));
        assert_eq!(config.target_size, [MAX_TARGET_SIDE, 1]);
    }
}
