use crate::common::{Error, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Local "save as" for exported bytes.
pub trait DownloadSink: Send + Sync {
    /// Store `bytes` under `filename`, returning where they ended up.
    fn save(&self, bytes: &[u8], filename: &str) -> Result<PathBuf>;
}

/// Saves downloads into a directory.
///
/// Bytes are first written to a transient file in the target directory and
/// then renamed over `filename`, so a reader never sees a half-written file.
/// On any failure the transient file is removed.
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectoryDownloads {
    fn save(&self, bytes: &[u8], filename: &str) -> Result<PathBuf> {
        let name = Path::new(filename);
        if filename.is_empty() || name.file_name() != Some(name.as_os_str()) {
            return Err(Error::Download(format!("invalid file name {filename:?}")));
        }
        let target = self.dir.join(name);

        let mut transient = NamedTempFile::new_in(&self.dir)
            .map_err(|e| Error::Download(format!("{}: {}", self.dir.display(), e)))?;
        transient
            .write_all(bytes)
            .and_then(|_| transient.as_file().sync_all())
            .map_err(|e| Error::Download(format!("{}: {}", target.display(), e)))?;
        transient.persist(&target)?;

        Ok(target)
    }
}
