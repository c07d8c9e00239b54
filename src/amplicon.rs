//! Amplicons: primers grouped under one amplicon number, plus boundary geometry.
//!
//! An amplicon may be formed by nested primers (several forward and/or
//! several reverse primers). The geometry queries pick the outermost and
//! innermost primer on each side:
//!
//! ```text
//!  outer_forward   inner_forward                inner_reverse   outer_reverse
//!  >>>>>>>>          >>>>>>>>                       <<<<<<<<        <<<<<<<<
//!                           |<------ insert ------->|
//! ```
use crate::error::{Result, SchemeError};
use crate::primer::{Primer, PrimerEntry, Strand};

/// Primers of one amplicon, all on the same reference and in the same pool.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Amplicon {
    id: u32,
    reference: String,
    pool: String,
    primers: Vec<Primer>,
}

impl Amplicon {
    /// Start a new amplicon from its first primer; the entry fixes reference and pool.
    pub fn new(id: u32, entry: PrimerEntry) -> Self {
        Amplicon { id, reference: entry.reference, pool: entry.pool, primers: vec![entry.primer] }
    }

    /// Append a primer, rejecting it if it disagrees on reference or pool.
    pub fn push(&mut self, entry: PrimerEntry) -> Result<()> {
        if entry.reference != self.reference {
            return Err(SchemeError::ReferenceMismatch {
                primer: entry.primer.name,
                amplicon: self.id,
                expected: self.reference.clone(),
                found: entry.reference,
            });
        }
        if entry.pool != self.pool {
            return Err(SchemeError::PoolMismatch {
                primer: entry.primer.name,
                amplicon: self.id,
                expected: self.pool.clone(),
                found: entry.pool,
            });
        }
        self.primers.push(entry.primer);
        Ok(())
    }

    pub fn id(&self) -> u32 { self.id }

    pub fn reference(&self) -> &str { &self.reference }

    pub fn pool(&self) -> &str { &self.pool }

    /// Primers in the order they were appended.
    pub fn primers(&self) -> &[Primer] { &self.primers }

    pub fn forward_primers(&self) -> impl Iterator<Item = &Primer> {
        self.primers.iter().filter(|p| p.is_forward())
    }

    pub fn reverse_primers(&self) -> impl Iterator<Item = &Primer> {
        self.primers.iter().filter(|p| p.is_reverse())
    }

    fn empty(&self, strand: Strand) -> SchemeError {
        SchemeError::EmptySelection { amplicon: self.id, strand }
    }

    /// Forward primer with the smallest start; the first one wins ties.
    pub fn outer_forward(&self) -> Result<&Primer> {
        self.forward_primers()
            .reduce(|best, p| if p.start < best.start { p } else { best })
            .ok_or_else(|| self.empty(Strand::Forward))
    }

    /// Reverse primer with the largest end; the first one wins ties.
    pub fn outer_reverse(&self) -> Result<&Primer> {
        self.reverse_primers()
            .reduce(|best, p| if p.end > best.end { p } else { best })
            .ok_or_else(|| self.empty(Strand::Reverse))
    }

    /// Forward primer with the largest start; the first one wins ties.
    pub fn inner_forward(&self) -> Result<&Primer> {
        self.forward_primers()
            .reduce(|best, p| if p.start > best.start { p } else { best })
            .ok_or_else(|| self.empty(Strand::Forward))
    }

    /// Reverse primer with the smallest end; the first one wins ties.
    pub fn inner_reverse(&self) -> Result<&Primer> {
        self.reverse_primers()
            .reduce(|best, p| if p.end < best.end { p } else { best })
            .ok_or_else(|| self.empty(Strand::Reverse))
    }

    /// Region between the two innermost primers as `(inner_forward.end, inner_reverse.start)`.
    pub fn insert(&self) -> Result<(u64, u64)> {
        Ok((self.inner_forward()?.end, self.inner_reverse()?.start))
    }
}
