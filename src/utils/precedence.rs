// backupmanager/src/utils/precedence.rs
use tracing::debug;

/// Which level supplied a resolved value set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecedenceLevel {
    Primary,
    Secondary,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub level: PrecedenceLevel,
    pub values: Vec<&'a str>,
}

/// Picks the first non-empty of `primary`, `secondary` and `default`.
///
/// Levels are never concatenated: a winning level is returned whole and the
/// others are ignored.
pub fn resolve_precedence<'a, P, S>(
    what: &str,
    primary: &'a [P],
    secondary: &'a [S],
    default: &'a [&'a str],
) -> Resolved<'a>
where
    P: AsRef<str>,
    S: AsRef<str>,
{
    let resolved = if !primary.is_empty() {
        Resolved {
            level: PrecedenceLevel::Primary,
            values: primary.iter().map(|value| value.as_ref()).collect(),
        }
    } else if !secondary.is_empty() {
        Resolved {
            level: PrecedenceLevel::Secondary,
            values: secondary.iter().map(|value| value.as_ref()).collect(),
        }
    } else {
        Resolved { level: PrecedenceLevel::Default, values: default.to_vec() }
    };

    debug!(what, level = ?resolved.level, count = resolved.values.len(), "resolved by precedence");
    resolved
}
