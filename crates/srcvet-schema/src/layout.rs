use crate::identity::{MetadataError, PackageIdentity};
use serde::Serialize;

/// Classification of an archive's non-directory members.
///
/// Every member lands in exactly one of {spec, patch, source}; the partition
/// is total and non-overlapping. `sources` and `patches` keep the order in
/// which members were supplied.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ExtractedLayout {
    pub spec_file: String,
    pub sources: Vec<String>,
    pub patches: Vec<String>,
}

/// Classify archive members against a package identity.
///
/// Leading path components are stripped before matching. A member equal to
/// `<name>.spec` is the spec file (exactly one required), a `.patch` suffix
/// marks a patch, everything else is a source.
pub fn classify_members(
    identity: &PackageIdentity,
    members: &[String],
) -> Result<ExtractedLayout, MetadataError> {
    let spec_name = identity.spec_file_name();

    let mut spec_candidates = Vec::new();
    let mut sources = Vec::new();
    let mut patches = Vec::new();

    for member in members {
        let base = member.rsplit('/').next().unwrap_or(member);
        if base == spec_name {
            spec_candidates.push(base.to_owned());
        } else if base.ends_with(".patch") {
            patches.push(base.to_owned());
        } else {
            sources.push(base.to_owned());
        }
    }

    if spec_candidates.len() != 1 {
        return Err(MetadataError::AmbiguousSpec {
            expected: spec_name,
            found: spec_candidates.len(),
        });
    }

    Ok(ExtractedLayout {
        spec_file: spec_candidates.remove(0),
        sources,
        patches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::parse_identity;

    fn foo() -> PackageIdentity {
        parse_identity("foo-1.2-3.fc20.src.rpm").unwrap()
    }

    fn members(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn classifies_spec_source_and_patch() {
        let layout = classify_members(
            &foo(),
            &members(&["foo.spec", "foo-1.2.tar.gz", "0001-fix.patch"]),
        )
        .unwrap();
        assert_eq!(layout.spec_file, "foo.spec");
        assert_eq!(layout.sources, vec!["foo-1.2.tar.gz"]);
        assert_eq!(layout.patches, vec!["0001-fix.patch"]);
    }

    #[test]
    fn partition_is_total() {
        let input = members(&[
            "foo.spec",
            "foo-1.2.tar.gz",
            "extra-data.bin",
            "0001-fix.patch",
            "0002-more.patch",
        ]);
        let layout = classify_members(&foo(), &input).unwrap();
        assert_eq!(
            1 + layout.sources.len() + layout.patches.len(),
            input.len(),
            "every member must land in exactly one bucket"
        );
    }

    #[test]
    fn strips_leading_paths_before_matching() {
        let layout = classify_members(
            &foo(),
            &members(&["pkg/foo.spec", "pkg/foo-1.2.tar.gz", "pkg/0001-fix.patch"]),
        )
        .unwrap();
        assert_eq!(layout.spec_file, "foo.spec");
        assert_eq!(layout.patches, vec!["0001-fix.patch"]);
    }

    #[test]
    fn missing_spec_is_an_error() {
        let err = classify_members(&foo(), &members(&["foo-1.2.tar.gz"])).unwrap_err();
        match err {
            MetadataError::AmbiguousSpec { found, .. } => assert_eq!(found, 0),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_spec_is_an_error() {
        let err = classify_members(&foo(), &members(&["foo.spec", "sub/foo.spec"])).unwrap_err();
        match err {
            MetadataError::AmbiguousSpec { found, .. } => assert_eq!(found, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn other_package_spec_is_a_source() {
        let layout = classify_members(&foo(), &members(&["foo.spec", "bar.spec"])).unwrap();
        assert_eq!(layout.sources, vec!["bar.spec"]);
    }

    #[test]
    fn source_order_is_preserved() {
        let layout = classify_members(
            &foo(),
            &members(&["z.tar.gz", "foo.spec", "a.tar.gz", "m.tar.gz"]),
        )
        .unwrap();
        assert_eq!(layout.sources, vec!["z.tar.gz", "a.tar.gz", "m.tar.gz"]);
    }

    #[test]
    fn empty_sources_and_patches_are_allowed() {
        let layout = classify_members(&foo(), &members(&["foo.spec"])).unwrap();
        assert!(layout.sources.is_empty());
        assert!(layout.patches.is_empty());
    }
}
