use std::fmt;
use std::process::Command;

/// A missing prerequisite with actionable install instructions.
#[derive(Debug)]
pub struct MissingPrereq {
    pub name: &'static str,
    pub purpose: &'static str,
    pub install_hint: &'static str,
}

impl fmt::Display for MissingPrereq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  - {}: {} (install: {})",
            self.name, self.purpose, self.install_hint
        )
    }
}

fn command_exists(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Check the external tools a review run needs. Chroot and scratch tooling
/// is only required when the corresponding targets were requested.
/// Returns a list of missing items; empty means all prerequisites are met.
pub fn check_review_prereqs(chroot: bool, scratch: bool) -> Vec<MissingPrereq> {
    let mut missing = Vec::new();

    if !command_exists("rpm2cpio") {
        missing.push(MissingPrereq {
            name: "rpm2cpio",
            purpose: "dumping the source archive payload",
            install_hint: "dnf install rpm | apt install rpm2cpio",
        });
    }

    if !command_exists("cpio") {
        missing.push(MissingPrereq {
            name: "cpio",
            purpose: "unpacking the archive payload",
            install_hint: "dnf install cpio | apt install cpio",
        });
    }

    if !command_exists("rpmbuild") {
        missing.push(MissingPrereq {
            name: "rpmbuild",
            purpose: "local rebuild of the source package",
            install_hint: "dnf install rpm-build | apt install rpm",
        });
    }

    if chroot && !command_exists("mock") {
        missing.push(MissingPrereq {
            name: "mock",
            purpose: "chroot builds in isolated buildroots",
            install_hint: "dnf install mock",
        });
    }

    if scratch && !command_exists("koji") {
        missing.push(MissingPrereq {
            name: "koji",
            purpose: "remote scratch builds",
            install_hint: "dnf install koji",
        });
    }

    missing
}

pub fn format_missing(missing: &[MissingPrereq]) -> String {
    use std::fmt::Write as _;
    let mut msg = String::from("missing prerequisites:\n");
    for m in missing {
        let _ = writeln!(msg, "{m}");
    }
    msg.push_str("\nsrcvet shells out to these tools to unpack and build source packages.");
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_missing_lists_each_item() {
        let missing = vec![
            MissingPrereq {
                name: "mock",
                purpose: "chroot builds",
                install_hint: "dnf install mock",
            },
            MissingPrereq {
                name: "koji",
                purpose: "scratch builds",
                install_hint: "dnf install koji",
            },
        ];
        let msg = format_missing(&missing);
        assert!(msg.contains("mock"));
        assert!(msg.contains("koji"));
        assert!(msg.contains("missing prerequisites"));
    }

    #[test]
    fn optional_tools_are_skipped_when_not_requested() {
        // With both backend groups disabled, the check never reports mock or
        // koji, whatever the host has installed.
        let missing = check_review_prereqs(false, false);
        assert!(missing.iter().all(|m| m.name != "mock" && m.name != "koji"));
    }

    #[test]
    fn command_exists_detects_a_shell() {
        assert!(command_exists("sh"));
        assert!(!command_exists("srcvet-no-such-tool"));
    }
}
