//! Scoped on-disk harness source.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::TempPath;
use thiserror::Error;

const FILE_PREFIX: &str = "main.";
const FILE_SUFFIX: &str = ".go";

/// Failure to materialize the harness source.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to create temporary file in {}", dir.display())]
    Create {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A uniquely named `main.*.go` file, deleted when dropped.
#[derive(Debug)]
pub struct HarnessFile {
    path: TempPath,
}

impl HarnessFile {
    /// Write `source` to a new temporary file in `dir`.
    ///
    /// If writing fails the partially written file is removed before the
    /// error is returned.
    pub fn create(dir: &Path, source: &str) -> Result<Self, HarnessError> {
        Self::create_with(dir, |file| file.write_all(source.as_bytes()))
    }

    fn create_with<F>(dir: &Path, write: F) -> Result<Self, HarnessError>
    where
        F: FnOnce(&mut File) -> io::Result<()>,
    {
        let mut file = tempfile::Builder::new()
            .prefix(FILE_PREFIX)
            .suffix(FILE_SUFFIX)
            .tempfile_in(dir)
            .map_err(|source| HarnessError::Create {
                dir: dir.to_path_buf(),
                source,
            })?;

        let written = write(file.as_file_mut()).and_then(|()| file.as_file().sync_all());
        if let Err(source) = written {
            return Err(HarnessError::Write {
                path: file.path().to_path_buf(),
                source,
            });
        }

        tracing::debug!("Wrote harness to {}", file.path().display());

        Ok(HarnessFile {
            path: file.into_temp_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file now, reporting any error.
    pub fn remove(self) -> io::Result<()> {
        self.path.close()
    }
}
