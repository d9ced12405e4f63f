//! Persisting rendered documents.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::builder::PdfBuilder;
use crate::error::{ComposeError, Result};
use crate::model::Document;

/// Timestamp format used in generated file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Renders documents and writes them to disk.
///
/// Writes are not atomic: a failure while writing can leave a truncated file.
#[derive(Clone, Debug, Default)]
pub struct DocumentWriter {
    builder: PdfBuilder,
    create_dirs: bool,
}

impl DocumentWriter {
    /// Creates a writer that renders with `builder`.
    pub fn new(builder: PdfBuilder) -> Self {
        Self {
            builder,
            create_dirs: false,
        }
    }

    /// Creates missing parent directories before writing when set.
    pub fn with_create_dirs(mut self, create_dirs: bool) -> Self {
        self.create_dirs = create_dirs;
        self
    }

    /// Returns the PDF builder used for rendering.
    pub fn builder(&self) -> &PdfBuilder {
        &self.builder
    }

    /// Renders `document` and writes it to `path`, returning the path written.
    ///
    /// The parent directory is checked before anything is rendered, so an
    /// unusable destination fails fast and leaves no file behind.
    pub fn save(&self, document: &Document, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        self.prepare_parent(path)?;

        let rendered = self.builder.render(document)?;
        fs::write(path, &rendered.bytes).map_err(|source| ComposeError::io(path, source))?;

        log::info!(
            "saved {} ({} bytes)",
            path.display(),
            rendered.bytes.len()
        );
        Ok(path.to_path_buf())
    }

    fn prepare_parent(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => return Ok(()),
        };
        if parent.is_dir() {
            return Ok(());
        }
        if !self.create_dirs {
            return Err(ComposeError::io(
                path,
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("output directory {} does not exist", parent.display()),
                ),
            ));
        }
        fs::create_dir_all(parent).map_err(|source| ComposeError::io(parent, source))?;
        log::info!("created output directory {}", parent.display());
        Ok(())
    }
}

/// Returns `<dir>/<stem>_YYYYMMDD_HHMMSS.pdf` for the current local time.
pub fn timestamped_path(dir: impl AsRef<Path>, stem: &str) -> PathBuf {
    timestamped_path_at(dir, stem, Local::now().naive_local())
}

/// Returns `<dir>/<stem>_YYYYMMDD_HHMMSS.pdf` for `at`.
pub fn timestamped_path_at(dir: impl AsRef<Path>, stem: &str, at: NaiveDateTime) -> PathBuf {
    dir.as_ref()
        .join(format!("{stem}_{}.pdf", at.format(TIMESTAMP_FORMAT)))
}
