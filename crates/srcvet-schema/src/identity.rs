use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("archive name '{0}' does not decompose into <name>-<version>-<release>.src.<ext>")]
    IdentityParse(String),
    #[error("expected exactly one spec file candidate named '{expected}', found {found}")]
    AmbiguousSpec { expected: String, found: usize },
}

/// Name-version-release identity of a source package, derived once from the
/// archive's file name and immutable afterward.
///
/// `release` may itself contain dot-separated segments (e.g. a distribution
/// tag such as `3.fc20`) and is never split further.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PackageIdentity {
    pub name: String,
    pub version: String,
    pub release: String,
}

impl PackageIdentity {
    /// The full NVR triple as a single display string.
    pub fn nvr(&self) -> String {
        format!("{}-{}-{}", self.name, self.version, self.release)
    }

    /// The expected spec file member name, `<name>.spec`.
    pub fn spec_file_name(&self) -> String {
        format!("{}.spec", self.name)
    }
}

/// Parse a source archive file name of the form `<name>-<version>-<release>.src.<ext>`.
///
/// Splits on the last two hyphens so that hyphenated package names survive
/// intact, and keeps embedded dots in the release segment untouched.
pub fn parse_identity(file_name: &str) -> Result<PackageIdentity, MetadataError> {
    let base = file_name.rsplit('/').next().unwrap_or(file_name);

    let err = || MetadataError::IdentityParse(base.to_owned());

    let marker = base.rfind(".src.").ok_or_else(err)?;
    if base[marker + ".src.".len()..].is_empty() {
        return Err(err());
    }
    let nvr = &base[..marker];

    let mut fields = nvr.rsplitn(3, '-');
    let release = fields.next().ok_or_else(err)?;
    let version = fields.next().ok_or_else(err)?;
    let name = fields.next().ok_or_else(err)?;

    if name.is_empty() || version.is_empty() || release.is_empty() {
        return Err(err());
    }

    Ok(PackageIdentity {
        name: name.to_owned(),
        version: version.to_owned(),
        release: release.to_owned(),
    })
}
