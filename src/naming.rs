//! Amplicon number inference from structured primer names.
//!
//! Most published schemes name primers `[prefix_]<number>[...]_<LEFT|RIGHT>[...]`,
//! e.g. `nCoV-2019_14_LEFT`, `SARS-CoV-2_400_7_RIGHT_1` or `MN908947.3_3_LEFT_alt`.
//! The number identifies the amplicon and the prefix (if shared by every primer)
//! names the scheme.
//!
//! # Examples
//! ```
//! use ampscheme::naming::{parse_amplicon_name, PrimerRole};
//! let n = parse_amplicon_name("nCoV-2019_14_LEFT_alt").unwrap();
//! assert_eq!(n.prefix.as_deref(), Some("nCoV-2019"));
//! assert_eq!(n.number, 14);
//! assert_eq!(n.role, PrimerRole::Left);
//! ```
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Result, SchemeError};

/// Logical role of a primer inside its amplicon, taken from the name suffix.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PrimerRole {
    /// `L` or `LEFT`.
    Left,
    /// `R` or `RIGHT`.
    Right,
}

/// The parts of a primer name that matter for grouping.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AmpliconName {
    /// Text before the amplicon number without its trailing `_`; `None` when empty.
    pub prefix: Option<String>,
    pub number: u32,
    pub role: PrimerRole,
}

fn amplicon_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<prefix>(?:.*_)*)(?P<num>\d+).*_(?P<role>L(?:EFT)?|R(?:IGHT)?)")
            .expect("amplicon name pattern is valid")
    })
}

/// Split a primer name into prefix, amplicon number and role.
///
/// The pattern is anchored at the start of the name only, so trailing
/// decorations after the role token (`_alt`, `_1`, ...) are accepted.
pub fn parse_amplicon_name(name: &str) -> Result<AmpliconName> {
    let unrecognized = || SchemeError::UnrecognizedName(name.to_string());
    let caps = amplicon_pattern().captures(name).ok_or_else(unrecognized)?;

    let prefix = caps
        .name("prefix")
        .map(|m| m.as_str().strip_suffix('_').unwrap_or(m.as_str()))
        .filter(|p| !p.is_empty())
        .map(str::to_string);
    let number = caps["num"].parse::<u32>().map_err(|_| unrecognized())?;
    let role = if caps["role"].starts_with('L') { PrimerRole::Left } else { PrimerRole::Right };

    Ok(AmpliconName { prefix, number, role })
}
