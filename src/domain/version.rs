//! Version tag normalization and change classification

use colored::Colorize;
use semver::Version;
use std::cmp::Ordering;

/// Prefix every go.mod version carries
pub const VERSION_PREFIX: char = 'v';

/// Normalize a release tag to go.mod's `v`-prefixed convention
///
/// `1.2.3` becomes `v1.2.3`; `v1.2.3` is returned unchanged.
pub fn normalize_tag(tag: &str) -> String {
    let tag = tag.trim();
    if tag.starts_with(VERSION_PREFIX) {
        tag.to_string()
    } else {
        format!("{}{}", VERSION_PREFIX, tag)
    }
}

/// Parse a `v`-prefixed go.mod version as semver
pub(crate) fn parse_go_version(version: &str) -> Option<Version> {
    version
        .strip_prefix(VERSION_PREFIX)
        .and_then(|v| Version::parse(v).ok())
}

/// How a pin moved between two versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChange {
    /// No previous pin existed
    New,
    /// Major version change (breaking)
    Major,
    /// Minor version change (features)
    Minor,
    /// Patch or prerelease change
    Patch,
    /// The latest release is older than the current pin
    Downgrade,
    /// Either side is not valid semver
    Unknown,
}

impl VersionChange {
    /// Determine the change type between two versions
    pub fn between(old: Option<&str>, new: &str) -> Self {
        let Some(old) = old else {
            return VersionChange::New;
        };

        match (parse_go_version(old), parse_go_version(new)) {
            (Some(old), Some(new)) => {
                if new.cmp_precedence(&old) == Ordering::Less {
                    VersionChange::Downgrade
                } else if new.major != old.major {
                    VersionChange::Major
                } else if new.minor != old.minor {
                    VersionChange::Minor
                } else {
                    VersionChange::Patch
                }
            }
            _ => VersionChange::Unknown,
        }
    }

    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            VersionChange::New => "new",
            VersionChange::Major => "major",
            VersionChange::Minor => "minor",
            VersionChange::Patch => "patch",
            VersionChange::Downgrade => "downgrade",
            VersionChange::Unknown => "?",
        }
    }

    /// Get the display label with color
    pub fn colored_label(&self) -> String {
        match self {
            VersionChange::New => self.label().cyan().to_string(),
            VersionChange::Major => self.label().red().bold().to_string(),
            VersionChange::Minor => self.label().yellow().to_string(),
            VersionChange::Patch => self.label().green().to_string(),
            VersionChange::Downgrade => self.label().magenta().to_string(),
            VersionChange::Unknown => self.label().dimmed().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_prefix() {
        assert_eq!(normalize_tag("1.2.3"), "v1.2.3");
    }

    #[test]
    fn test_normalize_keeps_prefix() {
        assert_eq!(normalize_tag("v1.2.3"), "v1.2.3");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        assert_eq!(normalize_tag(" 2.0.0\n"), "v2.0.0");
    }

    #[test]
    fn test_parse_go_version() {
        assert!(parse_go_version("v1.2.3").is_some());
        assert!(parse_go_version("v2.0.0+incompatible").is_some());
        assert!(parse_go_version("v0.0.0-20240101000000-abcdef123456").is_some());
        assert!(parse_go_version("1.2.3").is_none());
        assert!(parse_go_version("v1.2").is_none());
    }

    #[test]
    fn test_change_between() {
        assert_eq!(VersionChange::between(None, "v1.0.0"), VersionChange::New);
        assert_eq!(
            VersionChange::between(Some("v1.0.0"), "v2.0.0"),
            VersionChange::Major
        );
        assert_eq!(
            VersionChange::between(Some("v2.0.0"), "v2.1.0"),
            VersionChange::Minor
        );
        assert_eq!(
            VersionChange::between(Some("v2.1.0"), "v2.1.4"),
            VersionChange::Patch
        );
        assert_eq!(
            VersionChange::between(Some("v2.1.4"), "v2.1.0"),
            VersionChange::Downgrade
        );
        assert_eq!(
            VersionChange::between(Some("latest"), "v2.1.0"),
            VersionChange::Unknown
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(VersionChange::Major.label(), "major");
        assert_eq!(VersionChange::Unknown.label(), "?");
    }
}
