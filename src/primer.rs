//! Core types for **primers** and the identifiers they are parsed with.
//!
//! A [`Primer`] is a single primer interval as it appears on one line of a
//! primer scheme BED file. The reference and pool columns are not stored on
//! the primer itself: they belong to the amplicon the primer is grouped into
//! and travel alongside the primer in a [`PrimerEntry`] until grouping.
use core::fmt;
use core::str::FromStr;

/// Orientation of a primer relative to the reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Strand {
    /// `+` strand (left primer).
    Forward,
    /// `-` strand (right primer).
    Reverse,
}

impl Strand {
    /// The BED strand symbol (`+` or `-`).
    pub fn symbol(self) -> &'static str {
        match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.symbol()) }
}

impl FromStr for Strand {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            other => Err(format!("invalid strand '{other}' (expected '+' or '-')")),
        }
    }
}

/// A single primer interval (0-based, half-open as in BED).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Primer {
    /// Start coordinate (BED column 2).
    pub start: u64,
    /// End coordinate (BED column 3).
    pub end: u64,
    /// Primer name (BED column 4), e.g. `"nCoV-2019_1_LEFT"`.
    pub name: String,
    /// Strand (BED column 6).
    pub strand: Strand,
}

impl Primer {
    pub fn new(start: u64, end: u64, name: impl Into<String>, strand: Strand) -> Self {
        Primer { start, end, name: name.into(), strand }
    }

    pub fn is_forward(&self) -> bool { self.strand == Strand::Forward }

    pub fn is_reverse(&self) -> bool { self.strand == Strand::Reverse }
}

/// One parsed primer scheme line: the primer plus the reference and pool it was listed under.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrimerEntry {
    pub primer: Primer,
    /// Reference sequence name (BED column 1).
    pub reference: String,
    /// Primer pool (BED column 5).
    pub pool: String,
}
