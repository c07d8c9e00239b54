//! Error type for scheme parsing, grouping and geometry.
//!
//! Every variant is fatal: a conversion either completes or produces no output.
use crate::primer::Strand;

pub type Result<T, E = SchemeError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum SchemeError {
    /// Too few fields, a non-integer coordinate or an unknown strand symbol.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    /// Primer name does not follow the `[prefix_]<number>..._<LEFT|RIGHT>` convention.
    #[error("{0} does not match expected amplicon name format")]
    UnrecognizedName(String),

    /// Primer name absent from the amplicon info mapping.
    #[error("BED file primer: \"{0}\" not listed in amplicon info!")]
    UnmappedPrimer(String),

    #[error("primer {primer} is on reference {found}, but amplicon {amplicon} is on {expected}")]
    ReferenceMismatch { primer: String, amplicon: u32, expected: String, found: String },

    #[error("primer {primer} is in pool {found}, but amplicon {amplicon} is in pool {expected}")]
    PoolMismatch { primer: String, amplicon: u32, expected: String, found: String },

    /// Geometry query on an amplicon without any primer on the required strand.
    #[error("amplicon {amplicon} has no primer on the {strand} strand")]
    EmptySelection { amplicon: u32, strand: Strand },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
