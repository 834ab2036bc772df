use crate::ReviewError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory layout for one review run.
///
/// Holds the captured build logs, a staged copy of the extracted sources for
/// inspection during the review, and the final report. Subdirectories are
/// created lazily on [`initialize`](Self::initialize).
#[derive(Debug, Clone)]
pub struct Workdir {
    root: PathBuf,
}

impl Workdir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[inline]
    pub fn build_dir(&self) -> PathBuf {
        self.root.join("build")
    }

    #[inline]
    pub fn sources_dir(&self) -> PathBuf {
        self.root.join("sources")
    }

    #[inline]
    pub fn report_path(&self) -> PathBuf {
        self.root.join("review.txt")
    }

    #[inline]
    pub fn lock_file(&self) -> PathBuf {
        self.root.join(".lock")
    }

    pub fn initialize(&self) -> Result<(), ReviewError> {
        fs::create_dir_all(self.build_dir())?;
        fs::create_dir_all(self.sources_dir())?;
        Ok(())
    }
}

/// Recursively copy a directory tree, returning the number of files copied.
///
/// Used to stage the extracted archive members into the working directory so
/// the reviewer can inspect them while answering checklist items.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, ReviewError> {
    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(std::io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .unwrap_or_else(|_| entry.path());
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        let workdir = Workdir::new(dir.path().join("review"));
        workdir.initialize().unwrap();
        assert!(workdir.build_dir().is_dir());
        assert!(workdir.sources_dir().is_dir());
    }

    #[test]
    fn initialize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let workdir = Workdir::new(dir.path());
        workdir.initialize().unwrap();
        workdir.initialize().unwrap();
    }

    #[test]
    fn copy_tree_preserves_structure() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("foo.spec"), "Name: foo\n").unwrap();
        fs::write(src.join("nested").join("0001-fix.patch"), "--- a\n").unwrap();

        let copied = copy_tree(&src, &dst).unwrap();
        assert_eq!(copied, 2);
        assert_eq!(
            fs::read_to_string(dst.join("foo.spec")).unwrap(),
            "Name: foo\n"
        );
        assert!(dst.join("nested").join("0001-fix.patch").is_file());
    }

    #[test]
    fn copy_tree_of_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(copy_tree(&dir.path().join("absent"), &dir.path().join("dst")).is_err());
    }
}
