//! One-shot listing of the image files in a directory.

use std::fs::{self, DirEntry};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Result, ViewerError};

/// File names in `dir` whose names end in one of the configured suffixes.
///
/// The listing is taken once by [`Catalog::scan`] and only changes through an
/// explicit [`Catalog::refresh`]. It is never empty.
#[derive(Debug, Clone)]
pub struct Catalog {
    dir: PathBuf,
    extensions: Vec<String>,
    sort: bool,
    entries: Vec<String>,
}

impl Catalog {
    /// List `dir`, failing with [`ViewerError::EmptyDirectory`] if nothing matches.
    pub fn scan(dir: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        let dir = dir.into();
        let entries = list_matching(&dir, &config.extensions, config.sort_entries)?;
        if entries.is_empty() {
            return Err(ViewerError::EmptyDirectory { dir });
        }

        Ok(Self {
            dir,
            extensions: config.extensions.clone(),
            sort: config.sort_entries,
            entries,
        })
    }

    /// Re-list the directory. An empty result leaves the catalog unchanged.
    pub fn refresh(&mut self) -> Result<()> {
        let entries = list_matching(&self.dir, &self.extensions, self.sort)?;
        if entries.is_empty() {
            warn!(dir = %self.dir.display(), "refresh found no images, keeping previous list");
            return Err(ViewerError::EmptyDirectory {
                dir: self.dir.clone(),
            });
        }
        debug!(before = self.entries.len(), after = entries.len(), "catalog refreshed");
        self.entries = entries;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First entry in listing order.
    pub fn first(&self) -> &str {
        // `scan` and `refresh` never store an empty list
        &self.entries[0]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e == name)
    }

    /// Full path of an entry.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

/// Check a file name against case-sensitive suffixes.
pub fn has_suffix(name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}

fn list_matching(dir: &Path, extensions: &[String], sort: bool) -> Result<Vec<String>> {
    let read_dir = fs::read_dir(dir).map_err(|source| ViewerError::ReadDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut entries: Vec<String> = read_dir
        .filter_map(|entry| entry_name(dir, entry))
        .filter(|name| has_suffix(name, extensions))
        .collect();

    if sort {
        entries.sort_by(|a, b| natord::compare(a, b));
    }

    Ok(entries)
}

/// Name of a listed entry. Unreadable entries are logged and skipped, as are
/// non UTF-8 names, which the selector cannot show.
fn entry_name(dir: &Path, entry: io::Result<DirEntry>) -> Option<String> {
    match entry {
        Ok(entry) => entry
            .file_name()
            .into_string()
            .map_err(|name| debug!(?name, "skipping non UTF-8 file name"))
            .ok(),
        Err(err) => {
            warn!(dir = %dir.display(), %err, "skipping unreadable directory entry");
            None
        }
    }
}
