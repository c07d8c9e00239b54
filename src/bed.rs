//! Readers for **primer scheme BED** files and **amplicon info** tables.
//!
//! ### Primer scheme BED
//! Tab-delimited, one primer per line, columns (0-based):
//! `reference, start, end, name, pool, strand`. Blank lines and lines starting
//! with `#` are skipped; additional columns beyond the sixth are ignored.
//! Malformed lines are reported with their physical (1-based) line number,
//! counting skipped comment and blank lines.
//!
//! ### Amplicon info
//! Tab-delimited, one amplicon per line listing the names of all primers that
//! belong to it. Amplicons are numbered from 1 in file order. Read with `csv`
//! with quoting disabled, so primer names are taken verbatim.
//!
//! ### Example
//! ```
//! use ampscheme::bed::PrimerBedReader;
//! let bed = "ref1\t100\t120\tscheme_1_LEFT\tpool1\t+\n";
//! let entries: Vec<_> = PrimerBedReader::new(bed.as_bytes()).collect::<Result<_, _>>().unwrap();
//! assert_eq!(entries[0].primer.name, "scheme_1_LEFT");
//! ```
use std::io::{BufRead, BufReader, Lines, Read};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{Result, SchemeError};
use crate::primer::{Primer, PrimerEntry, Strand};

/// Minimum number of columns in a primer scheme line.
pub const PRIMER_BED_FIELDS: usize = 6;

/// Lazy, single-pass reader yielding one [`PrimerEntry`] per primer line.
pub struct PrimerBedReader<R: Read> {
    lines: Lines<BufReader<R>>,
    line_no: u64,
}

impl<R: Read> PrimerBedReader<R> {
    pub fn new(rdr: R) -> Self {
        PrimerBedReader { lines: BufReader::new(rdr).lines(), line_no: 0 }
    }
}

impl<R: Read> Iterator for PrimerBedReader<R> {
    type Item = Result<PrimerEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(l) => l,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            return Some(parse_primer_record(self.line_no, &fields));
        }
    }
}

fn parse_coordinate(line: u64, raw: &str, what: &str) -> Result<u64> {
    raw.trim().parse::<u64>().map_err(|_| SchemeError::MalformedRecord {
        line,
        reason: format!("{what} '{raw}' is not a non-negative integer"),
    })
}

/// Parse the tab-separated fields of one non-blank, non-comment primer scheme line.
pub fn parse_primer_record(line: u64, fields: &[&str]) -> Result<PrimerEntry> {
    if fields.len() < PRIMER_BED_FIELDS {
        return Err(SchemeError::MalformedRecord {
            line,
            reason: format!(
                "expected at least {PRIMER_BED_FIELDS} tab-separated fields, found {}",
                fields.len()
            ),
        });
    }
    let start = parse_coordinate(line, fields[1], "start")?;
    let end = parse_coordinate(line, fields[2], "end")?;
    let strand = fields[5]
        .trim()
        .parse::<Strand>()
        .map_err(|reason| SchemeError::MalformedRecord { line, reason })?;

    Ok(PrimerEntry {
        primer: Primer::new(start, end, fields[3], strand),
        reference: fields[0].to_string(),
        pool: fields[4].to_string(),
    })
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|f| f.trim().is_empty())
}

/// A `#` comment once leading whitespace and empty cells are ignored.
fn is_comment(record: &StringRecord) -> bool {
    record.iter().find(|f| !f.is_empty()).is_some_and(|f| f.starts_with('#'))
}

/// Read an amplicon info table into one group of primer names per amplicon, in file order.
///
/// Empty cells are dropped; lines that are blank or start with `#` (after
/// trimming) do not count as amplicons.
pub fn read_amplicon_groups<R: Read>(rdr: R) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(rdr);

    let mut groups = Vec::new();
    for rec in reader.records() {
        let r = rec?;
        if is_blank(&r) || is_comment(&r) {
            continue;
        }
        let names: Vec<String> = r.iter().filter(|f| !f.is_empty()).map(str::to_string).collect();
        groups.push(names);
    }
    Ok(groups)
}
