//! Viewer controller: owns the catalog, the current selection and the display surface.
//! The UI reads and writes viewer state only through [`Viewer`].

use image::imageops::FilterType;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{Result, ViewerError};
use crate::image_loader::{load_resized, Bitmap};

/// Region that shows the bound bitmap. Binding a new bitmap drops the old one.
#[derive(Debug, Default)]
pub struct DisplaySurface {
    bitmap: Option<Bitmap>,
    /// Bumped on every bind so the UI knows when to re-upload the texture
    generation: u64,
}

impl DisplaySurface {
    pub fn bind(&mut self, bitmap: Bitmap) -> &Bitmap {
        self.generation += 1;
        self.bitmap.insert(bitmap)
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub struct Viewer {
    catalog: Catalog,
    /// Always one of `catalog.entries()`
    selection: String,
    surface: DisplaySurface,
    target_size: [u32; 2],
    /// Largest texture side the renderer accepts, once known
    max_texture_side: Option<u32>,
    filter: FilterType,
}

impl Viewer {
    /// Start with the first catalog entry selected and an empty surface.
    pub fn new(catalog: Catalog, config: &Config) -> Self {
        let selection = catalog.first().to_string();
        Self {
            catalog,
            selection,
            surface: DisplaySurface::default(),
            target_size: config.target_size,
            max_texture_side: None,
            filter: config.resize_filter.to_image_filter(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &str {
        &self.selection
    }

    pub fn surface(&self) -> &DisplaySurface {
        &self.surface
    }

    /// Cap displayed bitmaps to what the renderer can upload.
    pub fn set_max_texture_side(&mut self, side: usize) {
        let side = u32::try_from(side).unwrap_or(u32::MAX).max(1);
        if self.max_texture_side != Some(side) {
            debug!(side, "max texture side");
            self.max_texture_side = Some(side);
        }
    }

    /// Target size after the renderer limit. Each side is clamped on its own.
    pub fn display_size(&self) -> [u32; 2] {
        let limit = self.max_texture_side.unwrap_or(u32::MAX);
        self.target_size.map(|side| side.min(limit))
    }

    /// Change the selection. Names outside the catalog are rejected.
    pub fn select(&mut self, name: &str) -> Result<()> {
        if !self.catalog.contains(name) {
            return Err(ViewerError::UnknownEntry(name.to_string()));
        }
        if self.selection != name {
            debug!(from = %self.selection, to = %name, "selection changed");
            self.selection = name.to_string();
        }
        Ok(())
    }

    /// Decode the selected file, resize it and bind it to the surface.
    ///
    /// On failure the surface keeps whatever it showed before.
    pub fn display(&mut self) -> Result<&Bitmap> {
        let path = self.catalog.path_of(&self.selection);
        let [width, height] = self.display_size();
        let bitmap = load_resized(&path, width, height, self.filter)?;

        info!(
            file = %self.selection,
            original = %format!("{}x{}", bitmap.original_width, bitmap.original_height),
            shown = %format!("{}x{}", bitmap.width, bitmap.height),
            "displaying image"
        );
        Ok(self.surface.bind(bitmap))
    }

    /// Re-list the directory, keeping the selection if it is still there.
    pub fn refresh(&mut self) -> Result<()> {
        self.catalog.refresh()?;
        if !self.catalog.contains(&self.selection) {
            let first = self.catalog.first().to_string();
            debug!(from = %self.selection, to = %first, "selection no longer listed");
            self.selection = first;
        }
        Ok(())
    }
}
