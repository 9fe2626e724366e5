//! Local staging of spooled object bodies, and their hand-off into the
//! caller-visible artifact area.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A StagedFile is the exclusive handle to a spool location for one in-flight
/// download.  The path does not exist when handed out; the downloader creates
/// and fills it.  Dropping the handle discards whatever was written, so a
/// failed invocation leaves nothing behind.
pub struct StagedFile {
    dir: TempDir,
    path: PathBuf,
}

impl StagedFile {
    /// The spool path.  Guaranteed not to exist at creation time.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A TempFileProvider stages spooled content locally and commits completed
/// content into the durable artifact area, returning an opaque URI for the
/// caller.  Implemented as a trait to allow fake versions for testing.
pub trait TempFileProvider: 'static + Sync + Send {
    /// Acquire a fresh spool location.  `prefix` and `suffix` decorate the
    /// name the committed artifact will eventually carry.
    fn create(&self, prefix: &str, suffix: &str) -> io::Result<StagedFile>;

    /// Durably register completed spooled content, consuming the handle.
    /// Returns the URI addressing the committed artifact.
    fn commit(&self, staged: StagedFile) -> io::Result<String>;
}

/// Filesystem implementation of [`TempFileProvider`]: spools under
/// `<root>/spool` and commits into `<root>/artifacts`.
pub struct StagingArea {
    spool_root: PathBuf,
    artifact_dir: PathBuf,
}

impl StagingArea {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        let root = root.into();
        Self {
            spool_root: root.join("spool"),
            artifact_dir: root.join("artifacts"),
        }
    }

    /// Directory into which committed artifacts land.
    pub fn artifact_dir(&self) -> &Path {
        &self.artifact_dir
    }
}

impl TempFileProvider for StagingArea {
    fn create(&self, prefix: &str, suffix: &str) -> io::Result<StagedFile> {
        std::fs::create_dir_all(&self.spool_root)?;
        // each invocation gets its own uniquely-named directory; the unique
        // name is reused as the committed artifact name
        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(suffix)
            .tempdir_in(&self.spool_root)?;
        let path = dir.path().join("spool");
        Ok(StagedFile { dir, path })
    }

    fn commit(&self, staged: StagedFile) -> io::Result<String> {
        std::fs::create_dir_all(&self.artifact_dir)?;
        let name = staged
            .dir
            .path()
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "staging directory has no name"))?
            .to_owned();
        let dest = self.artifact_dir.join(name);
        std::fs::rename(&staged.path, &dest)?;
        // staged drops here, removing the now-empty spool directory
        Ok(format!("file://{}", dest.display()))
    }
}
