// backupmanager/src/utils/version.rs
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Known `(major, minor)` breakpoints and their compatibility suffix,
/// ascending. The last entry is the newest dialect.
const SUFFIX_BREAKPOINTS: &[((u64, u64), &str)] = &[((3, 1), "31"), ((4, 0), "40")];

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| {
        Regex::new(r"^v?(\d+)\.(\d+)(?:\.(\d+))?(?:-[0-9A-Za-z.\-]+)?(?:\+[0-9A-Za-z.\-]+)?$")
            .expect("valid version regex")
    });

fn newest_suffix() -> &'static str {
    SUFFIX_BREAKPOINTS.last().map_or("", |(_, code)| *code)
}

fn major_minor(version: &str) -> Option<(u64, u64)> {
    let caps = VERSION_RE.captures(version.trim())?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    Some((major, minor))
}

/// Maps a tool version such as `v4.0.8` to its compatibility suffix.
///
/// Unknown or unparseable versions resolve to the newest known suffix so
/// that uncatalogued releases keep working.
pub fn suffix(version: &str) -> &'static str {
    let Some(parsed) = major_minor(version) else {
        warn!(version, "unparseable tool version, using newest known dialect");
        return newest_suffix();
    };

    match SUFFIX_BREAKPOINTS.iter().find(|(breakpoint, _)| *breakpoint == parsed) {
        Some((_, code)) => *code,
        None => {
            warn!(version, "unsupported tool version, using newest known dialect");
            newest_suffix()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_breakpoint_maps_to_its_code() {
        assert_eq!(suffix("v3.1.2"), "31");
        assert_eq!(suffix("v4.0.8"), "40");
        assert_eq!(suffix("3.1.0"), "31");
    }

    #[test]
    fn test_unsupported_version_defaults_to_newest() {
        assert_eq!(suffix("v1.2.3"), "40");
        assert_eq!(suffix("v5.4.0"), "40");
    }

    #[test]
    fn test_invalid_and_dirty_versions_default_to_newest() {
        assert_eq!(suffix("v4.0.x"), "40");
        assert_eq!(suffix("v4.0.0-20200909"), "40");
        assert_eq!(suffix("latest"), "40");
        assert_eq!(suffix(""), "40");
    }

    #[test]
    fn test_qualifiers_do_not_hide_older_breakpoint() {
        assert_eq!(suffix("v3.1.0-beta.2+build7"), "31");
        assert_eq!(suffix("v3.1"), "31");
    }

    #[test]
    fn test_malformed_patch_on_older_breakpoint_defaults_to_newest() {
        assert_eq!(suffix("v3.1.x"), "40");
        assert_eq!(suffix("v3.1.2.3"), "40");
        assert_eq!(suffix("v3.1.-"), "40");
    }
}
