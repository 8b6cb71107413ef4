//! Delivery targets for finished packages.

use crate::inspect::PackageReport;
use crate::package::Package;
use deck_core::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Something that accepts finished packages: a download, a file, a buffer.
pub trait PackageSink {
    /// Check that the sink can accept a package at all.
    ///
    /// Called before anything is generated.
    fn ensure_ready(&self) -> Result<()> {
        Ok(())
    }

    /// Hand over a finished package.
    fn deliver(&mut self, package: &Package) -> Result<()>;
}

impl<S: PackageSink + ?Sized> PackageSink for &mut S {
    fn ensure_ready(&self) -> Result<()> {
        (**self).ensure_ready()
    }

    fn deliver(&mut self, package: &Package) -> Result<()> {
        (**self).deliver(package)
    }
}

/// Keeps delivered packages in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    packages: Vec<Package>,
    unavailable: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that reports itself unavailable with `reason`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            packages: Vec::new(),
            unavailable: Some(reason.into()),
        }
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Remove and return the most recently delivered package.
    pub fn take_last(&mut self) -> Option<Package> {
        self.packages.pop()
    }
}

impl PackageSink for MemorySink {
    fn ensure_ready(&self) -> Result<()> {
        match &self.unavailable {
            Some(reason) => Err(Error::SinkUnavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn deliver(&mut self, package: &Package) -> Result<()> {
        self.packages.push(package.clone());
        Ok(())
    }
}

/// Writes packages into a directory, named by [`Package::filename`].
///
/// Bytes go to a temporary `.part` file first and are renamed into place,
/// so a failed write never leaves a truncated `.pptx` behind.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in delivery order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn delivery_error(package: &Package, err: impl std::fmt::Display) -> Error {
        Error::Delivery {
            filename: package.filename().to_string(),
            reason: err.to_string(),
        }
    }
}

impl PackageSink for FileSink {
    fn ensure_ready(&self) -> Result<()> {
        let metadata = fs::metadata(&self.dir).map_err(|e| {
            Error::SinkUnavailable(format!("output directory {}: {}", self.dir.display(), e))
        })?;

        if !metadata.is_dir() {
            return Err(Error::SinkUnavailable(format!(
                "{} is not a directory",
                self.dir.display()
            )));
        }
        Ok(())
    }

    fn deliver(&mut self, package: &Package) -> Result<()> {
        // Only a bare file name, so the package lands directly inside `dir`.
        let name = Path::new(package.filename());
        if name.file_name() != Some(name.as_os_str()) {
            return Err(Self::delivery_error(package, "filename must not contain a path"));
        }

        let path = self.dir.join(package.filename());
        let partial = self.dir.join(format!("{}.part", package.filename()));

        if let Err(e) = fs::write(&partial, package.bytes()) {
            let _ = fs::remove_file(&partial);
            return Err(Self::delivery_error(package, e));
        }
        if let Err(e) = fs::rename(&partial, &path) {
            let _ = fs::remove_file(&partial);
            return Err(Self::delivery_error(package, e));
        }

        log::debug!("Wrote {} bytes to {}", package.len(), path.display());
        self.written.push(path);
        Ok(())
    }
}

/// Reads each package back and checks its integrity before passing it on.
#[derive(Debug)]
pub struct VerifyingSink<S> {
    inner: S,
}

impl<S: PackageSink> VerifyingSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: PackageSink> PackageSink for VerifyingSink<S> {
    fn ensure_ready(&self) -> Result<()> {
        self.inner.ensure_ready()
    }

    fn deliver(&mut self, package: &Package) -> Result<()> {
        let report = PackageReport::read(package.bytes())?;
        report.check_integrity()?;
        log::debug!(
            "Verified {} ({} entries, {} slides)",
            package.filename(),
            report.entries.len(),
            report.slides.len()
        );
        self.inner.deliver(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::PackageBuilder;
    use deck_core::{ExportOptions, Slide};

    fn package() -> Package {
        PackageBuilder::new(ExportOptions::new().with_filename("out"))
            .build(&[Slide::new().with_text("hi")])
            .unwrap()
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        sink.ensure_ready().unwrap();
        sink.deliver(&package()).unwrap();
        assert_eq!(sink.take_last().unwrap().filename(), "out.pptx");
        assert!(sink.take_last().is_none());
    }

    #[test]
    fn test_file_sink_writes_package() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path());
        sink.ensure_ready().unwrap();

        let package = package();
        sink.deliver(&package).unwrap();

        let path = dir.path().join("out.pptx");
        assert_eq!(sink.written(), &[path.clone()]);
        assert_eq!(fs::read(&path).unwrap(), package.bytes());
        assert!(!dir.path().join("out.pptx.part").exists());
    }

    #[test]
    fn test_file_sink_missing_dir_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("missing"));
        assert!(matches!(sink.ensure_ready(), Err(Error::SinkUnavailable(_))));
    }

    #[test]
    fn test_file_sink_file_path_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();
        let sink = FileSink::new(&file);
        assert!(matches!(sink.ensure_ready(), Err(Error::SinkUnavailable(_))));
    }

    #[test]
    fn test_file_sink_write_failure_is_delivery_error() {
        let dir = tempfile::tempdir().unwrap();
        // Ready check passes, then the directory disappears before delivery.
        let target = dir.path().join("gone");
        fs::create_dir(&target).unwrap();
        let mut sink = FileSink::new(&target);
        sink.ensure_ready().unwrap();
        fs::remove_dir(&target).unwrap();

        let err = sink.deliver(&package()).unwrap_err();
        assert!(matches!(err, Error::Delivery { ref filename, .. } if filename == "out.pptx"));
    }

    #[test]
    fn test_file_sink_rejects_filenames_with_paths() {
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("out");
        fs::create_dir(&out).unwrap();
        let mut sink = FileSink::new(&out);

        let absolute = root.path().join("abs").display().to_string();
        for name in ["../escaped", "nested/deck", absolute.as_str()] {
            let package = PackageBuilder::new(ExportOptions::new().with_filename(name))
                .build(&[Slide::new()])
                .unwrap();
            let err = sink.deliver(&package).unwrap_err();
            assert!(matches!(err, Error::Delivery { .. }), "{} was accepted", name);
        }

        assert!(sink.written().is_empty());
        assert!(!root.path().join("escaped.pptx").exists());
        assert!(!root.path().join("abs.pptx").exists());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn test_verifying_sink_passes_valid_packages() {
        let mut sink = VerifyingSink::new(MemorySink::new());
        sink.deliver(&package()).unwrap();
        assert_eq!(sink.into_inner().packages().len(), 1);
    }

    #[test]
    fn test_verifying_sink_rejects_corrupt_packages() {
        let mut sink = VerifyingSink::new(MemorySink::new());
        let corrupt = Package::new("bad.pptx", b"PK\x03\x04 not really a zip".to_vec());
        assert!(sink.deliver(&corrupt).is_err());
        assert!(sink.into_inner().packages().is_empty());
    }
}
