//! The primer [`Scheme`]: amplicons keyed by amplicon number.
//!
//! A scheme is built once by one of two grouping strategies and is read-only afterwards:
//! - [`Scheme::infer_from_primer_bed`] derives amplicon numbers (and the scheme
//!   name) from structured primer names, see [`crate::naming`];
//! - [`Scheme::from_primers_and_amplicons`] takes the grouping from an amplicon
//!   info table, for schemes whose primer names carry no amplicon number.
//!
//! Amplicons are stored in the order they are first seen in the BED input.
//! [`Scheme::amplicons`] iterates in that order; [`Scheme::amplicons_by_id`]
//! iterates by ascending amplicon number.
use std::collections::{BTreeSet, HashMap};
use std::io::Read;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::amplicon::Amplicon;
use crate::bed::{read_amplicon_groups, PrimerBedReader};
use crate::error::{Result, SchemeError};
use crate::naming::parse_amplicon_name;
use crate::primer::PrimerEntry;

#[derive(Clone, Debug, Default)]
pub struct Scheme {
    amplicons: IndexMap<u32, Amplicon>,
    name: Option<String>,
}

impl Scheme {
    pub fn new(amplicons: IndexMap<u32, Amplicon>, name: Option<String>) -> Self {
        Scheme { amplicons, name }
    }

    /// Group the primers of a BED stream by the amplicon number in their names.
    pub fn infer_from_primer_bed<R: Read>(bed: R) -> Result<Self> {
        Self::infer_from_entries(PrimerBedReader::new(bed))
    }

    /// Name-inference grouping over already parsed entries.
    ///
    /// The scheme name is set only if every primer carries the same non-empty prefix.
    pub fn infer_from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<PrimerEntry>>,
    {
        let mut amplicons = IndexMap::new();
        let mut prefixes_seen: BTreeSet<Option<String>> = BTreeSet::new();

        for entry in entries {
            let entry = entry?;
            let parsed = parse_amplicon_name(&entry.primer.name)?;
            prefixes_seen.insert(parsed.prefix);
            add_to_amplicon(&mut amplicons, parsed.number, entry)?;
        }

        log::debug!(
            "inferred {} amplicon(s) with {} distinct name prefix(es)",
            amplicons.len(),
            prefixes_seen.len()
        );
        let name = match prefixes_seen.len() {
            1 => prefixes_seen.pop_first().flatten(),
            _ => None,
        };
        Ok(Scheme::new(amplicons, name))
    }

    /// Group the primers of a BED stream using an amplicon info table.
    pub fn from_primers_and_amplicons<B: Read, A: Read>(
        bed: B,
        amplicon_info: A,
        scheme_name: Option<String>,
    ) -> Result<Self> {
        let mapping = amplicon_mapping(read_amplicon_groups(amplicon_info)?);
        Self::from_entries_with_mapping(PrimerBedReader::new(bed), &mapping, scheme_name)
    }

    /// Explicit-mapping grouping over already parsed entries.
    pub fn from_entries_with_mapping<I>(
        entries: I,
        mapping: &HashMap<String, u32>,
        scheme_name: Option<String>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = Result<PrimerEntry>>,
    {
        let mut amplicons = IndexMap::new();
        for entry in entries {
            let entry = entry?;
            let id = *mapping
                .get(&entry.primer.name)
                .ok_or_else(|| SchemeError::UnmappedPrimer(entry.primer.name.clone()))?;
            add_to_amplicon(&mut amplicons, id, entry)?;
        }
        log::debug!("grouped primers into {} amplicon(s) from amplicon info", amplicons.len());
        Ok(Scheme::new(amplicons, scheme_name))
    }

    /// Replace the scheme name used to prefix generated insert/amplicon names.
    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn name(&self) -> Option<&str> { self.name.as_deref() }

    pub fn len(&self) -> usize { self.amplicons.len() }

    pub fn is_empty(&self) -> bool { self.amplicons.is_empty() }

    pub fn amplicon(&self, id: u32) -> Option<&Amplicon> { self.amplicons.get(&id) }

    /// Amplicons in the order they were first seen in the BED input.
    pub fn amplicons(&self) -> impl Iterator<Item = &Amplicon> { self.amplicons.values() }

    /// Amplicons by ascending amplicon number.
    pub fn amplicons_by_id(&self) -> Vec<&Amplicon> {
        let mut v: Vec<&Amplicon> = self.amplicons.values().collect();
        v.sort_by_key(|a| a.id());
        v
    }

    pub fn primer_count(&self) -> usize {
        self.amplicons.values().map(|a| a.primers().len()).sum()
    }

    /// `{scheme}_INSERT_{id}` or `INSERT_{id}`.
    pub fn insert_name(&self, id: u32) -> String { self.generated_name("INSERT", id) }

    /// `{scheme}_AMPLICON_{id}` or `AMPLICON_{id}`.
    pub fn amplicon_name(&self, id: u32) -> String { self.generated_name("AMPLICON", id) }

    fn generated_name(&self, kind: &str, id: u32) -> String {
        match &self.name {
            Some(name) => format!("{name}_{kind}_{id}"),
            None => format!("{kind}_{id}"),
        }
    }
}

fn add_to_amplicon(amplicons: &mut IndexMap<u32, Amplicon>, id: u32, entry: PrimerEntry) -> Result<()> {
    match amplicons.entry(id) {
        Entry::Occupied(o) => o.into_mut().push(entry)?,
        Entry::Vacant(v) => {
            v.insert(Amplicon::new(id, entry));
        }
    }
    Ok(())
}

/// Number amplicon info groups from 1 and map every primer name to its amplicon.
///
/// A name listed more than once maps to the last amplicon it appears in.
pub fn amplicon_mapping(groups: Vec<Vec<String>>) -> HashMap<String, u32> {
    let mut mapping = HashMap::new();
    for (id, names) in (1u32..).zip(groups) {
        for name in names {
            if let Some(previous) = mapping.insert(name.clone(), id) {
                log::warn!("primer {name} listed for amplicon {previous} and {id}; using {id}");
            }
        }
    }
    mapping
}

#[cfg(test)]
mod infer_tests {
    use super::*;
    use crate::primer::Strand;

    const ARTIC_LIKE: &str = "\
MN908947.3\t30\t54\tnCoV-2019_1_LEFT\t1\t+
MN908947.3\t385\t410\tnCoV-2019_1_RIGHT\t1\t-
MN908947.3\t320\t342\tnCoV-2019_2_LEFT\t2\t+
MN908947.3\t704\t726\tnCoV-2019_2_RIGHT\t2\t-
MN908947.3\t642\t664\tnCoV-2019_3_LEFT\t1\t+
MN908947.3\t1004\t1028\tnCoV-2019_3_RIGHT\t1\t-
MN908947.3\t1000\t1024\tnCoV-2019_3_RIGHT_alt\t1\t-
";

    #[test]
    fn groups_by_number_and_infers_name() {
        let s = Scheme::infer_from_primer_bed(ARTIC_LIKE.as_bytes()).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.name(), Some("nCoV-2019"));
        assert_eq!(s.primer_count(), 7);
        let a3 = s.amplicon(3).unwrap();
        assert_eq!(a3.primers().len(), 3);
        assert_eq!(a3.pool(), "1");
        assert_eq!(a3.reference(), "MN908947.3");
    }

    #[test]
    fn single_amplicon_with_scheme_prefix() {
        let bed = "ref1\t100\t120\tscheme_1_LEFT\tpool1\t+\nref1\t200\t220\tscheme_1_RIGHT\tpool1\t-\n";
        let s = Scheme::infer_from_primer_bed(bed.as_bytes()).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.name(), Some("scheme"));
        assert_eq!(s.insert_name(1), "scheme_INSERT_1");
        assert_eq!(s.amplicon(1).unwrap().insert().unwrap(), (120, 200));
    }

    #[test]
    fn grouping_is_independent_of_line_order() {
        let forward = Scheme::infer_from_primer_bed(ARTIC_LIKE.as_bytes()).unwrap();
        let reversed_text: String = ARTIC_LIKE.lines().rev().map(|l| format!("{l}\n")).collect();
        let reversed = Scheme::infer_from_primer_bed(reversed_text.as_bytes()).unwrap();

        assert_eq!(forward.name(), reversed.name());
        assert_eq!(forward.len(), reversed.len());
        for a in forward.amplicons() {
            let b = reversed.amplicon(a.id()).unwrap();
            let mut x: Vec<_> = a.primers().to_vec();
            let mut y: Vec<_> = b.primers().to_vec();
            x.sort_by(|p, q| p.name.cmp(&q.name));
            y.sort_by(|p, q| p.name.cmp(&q.name));
            assert_eq!(x, y);
            assert_eq!((a.reference(), a.pool()), (b.reference(), b.pool()));
        }
    }

    #[test]
    fn storage_order_is_first_appearance() {
        let bed = "r\t500\t520\tx_7_LEFT\tp\t+\nr\t10\t30\tx_2_LEFT\tp\t+\nr\t600\t620\tx_7_RIGHT\tp\t-\n";
        let s = Scheme::infer_from_primer_bed(bed.as_bytes()).unwrap();
        let stored: Vec<u32> = s.amplicons().map(|a| a.id()).collect();
        let sorted: Vec<u32> = s.amplicons_by_id().iter().map(|a| a.id()).collect();
        assert_eq!(stored, vec![7, 2]);
        assert_eq!(sorted, vec![2, 7]);
    }

    #[test]
    fn mixed_or_missing_prefixes_leave_name_unset() {
        let mixed = "r\t1\t2\ta_1_LEFT\tp\t+\nr\t5\t6\tb_1_RIGHT\tp\t-\n";
        assert_eq!(Scheme::infer_from_primer_bed(mixed.as_bytes()).unwrap().name(), None);

        let partial = "r\t1\t2\ta_1_LEFT\tp\t+\nr\t5\t6\t1_RIGHT\tp\t-\n";
        assert_eq!(Scheme::infer_from_primer_bed(partial.as_bytes()).unwrap().name(), None);

        let none = "r\t1\t2\t1_LEFT\tp\t+\nr\t5\t6\t1_RIGHT\tp\t-\n";
        let s = Scheme::infer_from_primer_bed(none.as_bytes()).unwrap();
        assert_eq!(s.name(), None);
        assert_eq!(s.insert_name(1), "INSERT_1");
        assert_eq!(s.amplicon_name(1), "AMPLICON_1");
    }

    #[test]
    fn unrecognized_name_aborts() {
        let bed = "r\t1\t2\ta_1_LEFT\tp\t+\nr\t5\t6\tmystery\tp\t-\n";
        match Scheme::infer_from_primer_bed(bed.as_bytes()) {
            Err(SchemeError::UnrecognizedName(n)) => assert_eq!(n, "mystery"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn mismatched_reference_or_pool_is_not_merged() {
        let bed = "r1\t1\t2\ta_1_LEFT\tp\t+\nr2\t5\t6\ta_1_RIGHT\tp\t-\n";
        assert!(matches!(
            Scheme::infer_from_primer_bed(bed.as_bytes()),
            Err(SchemeError::ReferenceMismatch { amplicon: 1, .. })
        ));
        let bed = "r\t1\t2\ta_1_LEFT\t1\t+\nr\t5\t6\ta_1_RIGHT\t2\t-\n";
        match Scheme::infer_from_primer_bed(bed.as_bytes()) {
            Err(SchemeError::PoolMismatch { primer, .. }) => assert_eq!(primer, "a_1_RIGHT"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn empty_input_gives_empty_scheme() {
        let s = Scheme::infer_from_primer_bed("# nothing here\n".as_bytes()).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.name(), None);
    }

    #[test]
    fn primers_keep_their_strand() {
        let s = Scheme::infer_from_primer_bed(ARTIC_LIKE.as_bytes()).unwrap();
        let a1 = s.amplicon(1).unwrap();
        assert_eq!(a1.forward_primers().count(), 1);
        assert_eq!(a1.reverse_primers().next().unwrap().strand, Strand::Reverse);
    }
}
