use crate::BuildError;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;
use walkdir::WalkDir;

/// Unpack a source archive into `scratch_root` and return the directory
/// holding the extracted member tree.
///
/// Runs `rpm2cpio` to dump the payload, then `cpio -idmu` inside the tree
/// directory. The scratch root is expected to be a temporary directory owned
/// by the caller, which removes it on exit.
pub fn unpack_archive(archive: &Path, scratch_root: &Path) -> Result<PathBuf, BuildError> {
    fs::create_dir_all(scratch_root)?;
    let payload = scratch_root.join("payload.cpio");
    let tree = scratch_root.join("tree");

    debug!("dumping payload of {}", archive.display());
    let status = Command::new("rpm2cpio")
        .arg(archive)
        .stdin(Stdio::null())
        .stdout(Stdio::from(File::create(&payload)?))
        .stderr(Stdio::null())
        .status()?;
    if !status.success() {
        return Err(BuildError::ExtractFailed(format!(
            "rpm2cpio exited with {status} for {}",
            archive.display()
        )));
    }

    fs::create_dir_all(&tree)?;
    let status = Command::new("cpio")
        .args(["-idmu", "--quiet"])
        .current_dir(&tree)
        .stdin(Stdio::from(File::open(&payload)?))
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    if !status.success() {
        return Err(BuildError::ExtractFailed(format!(
            "cpio exited with {status} for {}",
            archive.display()
        )));
    }

    Ok(tree)
}

/// List the non-directory members of an extracted tree as relative paths,
/// in a stable (sorted) walk order.
pub fn list_members(tree: &Path) -> Result<Vec<String>, BuildError> {
    let mut members = Vec::new();
    for entry in WalkDir::new(tree).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(tree)
            .unwrap_or_else(|_| entry.path());
        members.push(relative.to_string_lossy().into_owned());
    }
    Ok(members)
}
