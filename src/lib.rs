#![forbid(unsafe_code)]
//! # ampscheme
//!
//! Conversion of **amplicon sequencing primer schemes** (primer BED files as
//! published for ARTIC-style tiled PCR panels) into the derived files that
//! downstream tools expect.
//!
//! ## Highlights
//! - 🧬 **Two grouping strategies**: amplicon numbers inferred from primer names
//!   (`nCoV-2019_14_LEFT`), or taken from an explicit amplicon info table.
//! - 🪆 **Nested primers**: outer/inner primer selection for amplicons with several
//!   forward or reverse primers.
//! - 🛑 **All-or-nothing**: every malformed line, unknown primer name or
//!   reference/pool disagreement is a typed [`SchemeError`] naming the culprit.
//!
//! ## Outputs
//! - sanitized primer BED (`ivar-bed`)
//! - insert BED, one interval per amplicon between the innermost primers (`cojac-insert-bed`)
//! - amplicon info, primer names grouped per amplicon (`amplicon-info`)
//! - BEDPE, every forward/reverse primer pair per amplicon (`bedpe`)
//!
//! ## Examples
//! ```rust
//! let bed = "ref1\t100\t120\tscheme_1_LEFT\tpool1\t+\nref1\t200\t220\tscheme_1_RIGHT\tpool1\t-\n";
//! let scheme = ampscheme::Scheme::infer_from_primer_bed(bed.as_bytes()).unwrap();
//! assert_eq!(scheme.name(), Some("scheme"));
//!
//! let mut out = Vec::new();
//! ampscheme::output::write_insert_bed(&scheme, &mut out).unwrap();
//! assert_eq!(out, b"ref1\t120\t200\tscheme_INSERT_1\tpool1\t+\n");
//! ```

pub mod primer;
pub mod error;
pub mod bed;
pub mod naming;
pub mod amplicon;
pub mod scheme;
pub mod output;
pub mod summary;
pub mod convert;

pub use amplicon::Amplicon;
pub use error::{Result, SchemeError};
pub use output::{OutputFormat, ReportMode};
pub use primer::{Primer, PrimerEntry, Strand};
pub use scheme::Scheme;

/// Crate version string (from `CARGO_PKG_VERSION`).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convenience: parse a primer BED held in memory, grouping by primer names.
pub fn infer_scheme_from_str(bed: &str) -> Result<Scheme> {
    Scheme::infer_from_primer_bed(bed.as_bytes())
}
