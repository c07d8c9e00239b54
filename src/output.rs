//! Writers for everything that can be derived from a [`Scheme`].
//!
//! | format             | one line per | content                                                    |
//! |--------------------|--------------|------------------------------------------------------------|
//! | `ivar-bed`         | primer       | sanitized primer BED, sorted by reference and coordinates  |
//! | `cojac-insert-bed` | amplicon     | insert between innermost primers, by amplicon number       |
//! | `amplicon-info`    | amplicon     | tab-joined primer names, in amplicon storage order         |
//! | `bedpe`            | primer pair  | every forward x reverse primer combination of an amplicon  |
//!
//! Writers only read the scheme. Geometry errors surface as
//! [`SchemeError::EmptySelection`]; callers wanting all-or-nothing output
//! should render into a buffer first (as [`crate::convert::run_convert`] does).
use core::fmt;
use core::str::FromStr;
use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::amplicon::Amplicon;
use crate::error::Result;
use crate::primer::{Primer, Strand};
use crate::scheme::Scheme;

/// Placeholder score written in the sanitized primer BED.
pub const SANITIZED_SCORE: &str = "60";

/// Output file type.
#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Sanitized primer BED (as consumed by iVar).
    IvarBed,
    /// One insert interval per amplicon (as consumed by COJAC).
    CojacInsertBed,
    /// Primer names grouped per amplicon.
    AmpliconInfo,
    /// Forward/reverse primer pairs per amplicon.
    Bedpe,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::IvarBed => "ivar-bed",
            OutputFormat::CojacInsertBed => "cojac-insert-bed",
            OutputFormat::AmpliconInfo => "amplicon-info",
            OutputFormat::Bedpe => "bedpe",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for OutputFormat {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ivar-bed" => Ok(Self::IvarBed),
            "cojac-insert-bed" => Ok(Self::CojacInsertBed),
            "amplicon-info" => Ok(Self::AmpliconInfo),
            "bedpe" => Ok(Self::Bedpe),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Which primers of a nested amplicon to list in the amplicon info output.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum ReportMode {
    /// Every primer, in the order they were read.
    #[default]
    Full,
    /// Innermost forward and reverse primer.
    Inner,
    /// Outermost forward and reverse primer.
    Outer,
}

impl ReportMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportMode::Full => "full",
            ReportMode::Inner => "inner",
            ReportMode::Outer => "outer",
        }
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ReportMode {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "inner" => Ok(Self::Inner),
            "outer" => Ok(Self::Outer),
            other => Err(format!("Unknown report mode: {}", other)),
        }
    }
}

fn tsv_writer<W: Write>(out: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out)
}

/// Write every primer once, sorted by `(reference, start, end)`, with a fixed score column.
pub fn write_sanitized_bed<W: Write>(scheme: &Scheme, out: W) -> Result<()> {
    let mut records: Vec<(&str, &Primer)> = scheme
        .amplicons()
        .flat_map(|a| a.primers().iter().map(move |p| (a.reference(), p)))
        .collect();
    records.sort_by(|(ra, a), (rb, b)| (*ra, a.start, a.end).cmp(&(*rb, b.start, b.end)));

    let mut wtr = tsv_writer(out);
    for (reference, p) in records {
        wtr.write_record([
            reference,
            p.start.to_string().as_str(),
            p.end.to_string().as_str(),
            p.name.as_str(),
            SANITIZED_SCORE,
            p.strand.symbol(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write one insert interval per amplicon, by ascending amplicon number.
pub fn write_insert_bed<W: Write>(scheme: &Scheme, out: W) -> Result<()> {
    let mut wtr = tsv_writer(out);
    for a in scheme.amplicons_by_id() {
        let (start, end) = a.insert()?;
        wtr.write_record([
            a.reference(),
            start.to_string().as_str(),
            end.to_string().as_str(),
            scheme.insert_name(a.id()).as_str(),
            a.pool(),
            Strand::Forward.symbol(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn reported_primers(a: &Amplicon, mode: ReportMode) -> Result<Vec<&Primer>> {
    Ok(match mode {
        ReportMode::Full => a.primers().iter().collect(),
        ReportMode::Outer => vec![a.outer_forward()?, a.outer_reverse()?],
        ReportMode::Inner => vec![a.inner_forward()?, a.inner_reverse()?],
    })
}

/// Write the primer names of each amplicon on one line, in amplicon storage order.
pub fn write_amplicon_info<W: Write>(scheme: &Scheme, out: W, mode: ReportMode) -> Result<()> {
    let mut wtr = tsv_writer(out);
    for a in scheme.amplicons() {
        let names = reported_primers(a, mode)?.into_iter().map(|p| p.name.as_str());
        wtr.write_record(names)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write one BEDPE line per forward x reverse primer combination of every amplicon.
///
/// Primers are ordered by `(start, end)` within an amplicon and amplicons by
/// `(reference, first start, last end)`. The pair index restarts at 0 for each amplicon.
pub fn write_bedpe<W: Write>(scheme: &Scheme, out: W) -> Result<()> {
    let mut amplicons: Vec<(&Amplicon, Vec<&Primer>)> = scheme
        .amplicons()
        .map(|a| {
            let mut primers: Vec<&Primer> = a.primers().iter().collect();
            primers.sort_by_key(|p| (p.start, p.end));
            (a, primers)
        })
        .collect();
    amplicons.sort_by(|(a, pa), (b, pb)| bedpe_order(a, pa).cmp(&bedpe_order(b, pb)));

    let mut wtr = tsv_writer(out);
    for (a, primers) in amplicons {
        let name = scheme.amplicon_name(a.id());
        let mut idx = 0usize;
        for f in primers.iter().filter(|p| p.is_forward()) {
            for r in primers.iter().filter(|p| p.is_reverse()) {
                wtr.write_record([
                    a.reference(),
                    f.start.to_string().as_str(),
                    f.end.to_string().as_str(),
                    a.reference(),
                    r.start.to_string().as_str(),
                    r.end.to_string().as_str(),
                    name.as_str(),
                    idx.to_string().as_str(),
                    f.strand.symbol(),
                    r.strand.symbol(),
                    a.pool(),
                ])?;
                idx += 1;
            }
        }
        if idx == 0 {
            log::warn!("{name} has no forward/reverse primer pair; nothing written");
        }
    }
    wtr.flush()?;
    Ok(())
}

fn bedpe_order<'a>(a: &'a Amplicon, sorted: &[&Primer]) -> (&'a str, u64, u64) {
    let first = sorted.first().map_or(0, |p| p.start);
    let last = sorted.last().map_or(0, |p| p.end);
    (a.reference(), first, last)
}

/// Write `scheme` in the requested format. `mode` only applies to [`OutputFormat::AmpliconInfo`].
pub fn write_output<W: Write>(scheme: &Scheme, format: OutputFormat, mode: ReportMode, out: W) -> Result<()> {
    match format {
        OutputFormat::IvarBed => write_sanitized_bed(scheme, out),
        OutputFormat::CojacInsertBed => write_insert_bed(scheme, out),
        OutputFormat::AmpliconInfo => write_amplicon_info(scheme, out, mode),
        OutputFormat::Bedpe => write_bedpe(scheme, out),
    }
}

#[cfg(test)]
mod output_tests {
    use super::*;
    use crate::bed::PrimerBedReader;
    use crate::error::SchemeError;

    fn render(scheme: &Scheme, format: OutputFormat, mode: ReportMode) -> String {
        let mut buf = Vec::new();
        write_output(scheme, format, mode, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn infer(bed: &str) -> Scheme {
        Scheme::infer_from_primer_bed(bed.as_bytes()).unwrap()
    }

    const NESTED: &str = "\
r\t30\t50\tn_1_LEFT_c\tp1\t+
r\t190\t210\tn_1_RIGHT_b\tp1\t-
r\t10\t30\tn_1_LEFT_a\tp1\t+
r\t180\t200\tn_1_RIGHT_a\tp1\t-
r\t20\t40\tn_1_LEFT_b\tp1\t+
";

    #[test]
    fn insert_bed_matches_worked_example() {
        let s = infer("ref1\t100\t120\tscheme_1_LEFT\tpool1\t+\nref1\t200\t220\tscheme_1_RIGHT\tpool1\t-\n");
        assert_eq!(
            render(&s, OutputFormat::CojacInsertBed, ReportMode::Full),
            "ref1\t120\t200\tscheme_INSERT_1\tpool1\t+\n"
        );
    }

    #[test]
    fn insert_bed_is_by_amplicon_number_and_idempotent() {
        let s = infer("r\t500\t520\t7_LEFT\tb\t+\nr\t600\t620\t7_RIGHT\tb\t-\nr\t10\t30\t2_LEFT\ta\t+\nr\t90\t110\t2_RIGHT\ta\t-\n");
        let first = render(&s, OutputFormat::CojacInsertBed, ReportMode::Full);
        assert_eq!(first, "r\t30\t90\tINSERT_2\ta\t+\nr\t520\t600\tINSERT_7\tb\t+\n");
        assert_eq!(first, render(&s, OutputFormat::CojacInsertBed, ReportMode::Full));
    }

    #[test]
    fn insert_bed_uses_innermost_primers() {
        let s = infer(NESTED);
        assert_eq!(
            render(&s, OutputFormat::CojacInsertBed, ReportMode::Full),
            "r\t50\t180\tn_INSERT_1\tp1\t+\n"
        );
    }

    #[test]
    fn sanitized_bed_sorts_globally_and_sets_score() {
        let s = infer("chrB\t5\t25\tx_2_LEFT\tp\t+\nchrA\t300\t320\tx_1_RIGHT\tp\t-\nchrB\t80\t100\tx_2_RIGHT\tp\t-\nchrA\t10\t30\tx_1_LEFT\tp\t+\n");
        assert_eq!(
            render(&s, OutputFormat::IvarBed, ReportMode::Full),
            "chrA\t10\t30\tx_1_LEFT\t60\t+\n\
             chrA\t300\t320\tx_1_RIGHT\t60\t-\n\
             chrB\t5\t25\tx_2_LEFT\t60\t+\n\
             chrB\t80\t100\tx_2_RIGHT\t60\t-\n"
        );
    }

    #[test]
    fn sanitized_bed_keeps_storage_order_on_ties() {
        let s = infer("r\t10\t30\tx_5_LEFT_b\tp\t+\nr\t10\t30\tx_3_LEFT\tp\t+\nr\t10\t30\tx_5_LEFT_a\tp\t+\n");
        assert_eq!(
            render(&s, OutputFormat::IvarBed, ReportMode::Full),
            "r\t10\t30\tx_5_LEFT_b\t60\t+\n\
             r\t10\t30\tx_5_LEFT_a\t60\t+\n\
             r\t10\t30\tx_3_LEFT\t60\t+\n"
        );
    }

    #[test]
    fn sanitized_bed_reads_back_to_the_same_primers() {
        let s = infer(NESTED);
        let text = render(&s, OutputFormat::IvarBed, ReportMode::Full);
        let mut reread: Vec<Primer> = PrimerBedReader::new(text.as_bytes())
            .map(|e| e.unwrap().primer)
            .collect();
        let mut original: Vec<Primer> = s.amplicons().flat_map(|a| a.primers().to_vec()).collect();
        reread.sort_by(|a, b| a.name.cmp(&b.name));
        original.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(reread, original);
    }

    #[test]
    fn amplicon_info_modes() {
        let s = infer(NESTED);
        assert_eq!(
            render(&s, OutputFormat::AmpliconInfo, ReportMode::Full),
            "n_1_LEFT_c\tn_1_RIGHT_b\tn_1_LEFT_a\tn_1_RIGHT_a\tn_1_LEFT_b\n"
        );
        assert_eq!(render(&s, OutputFormat::AmpliconInfo, ReportMode::Outer), "n_1_LEFT_a\tn_1_RIGHT_b\n");
        assert_eq!(render(&s, OutputFormat::AmpliconInfo, ReportMode::Inner), "n_1_LEFT_c\tn_1_RIGHT_a\n");
    }

    #[test]
    fn amplicon_info_follows_storage_order() {
        let s = infer("r\t500\t520\tx_7_LEFT\tp\t+\nr\t10\t30\tx_2_LEFT\tp\t+\nr\t600\t620\tx_7_RIGHT\tp\t-\nr\t90\t110\tx_2_RIGHT\tp\t-\n");
        assert_eq!(
            render(&s, OutputFormat::AmpliconInfo, ReportMode::Full),
            "x_7_LEFT\tx_7_RIGHT\nx_2_LEFT\tx_2_RIGHT\n"
        );
    }

    #[test]
    fn outer_mode_on_unpaired_amplicon_fails() {
        let s = infer("r\t10\t30\tx_1_LEFT\tp\t+\n");
        let mut buf = Vec::new();
        assert!(matches!(
            write_amplicon_info(&s, &mut buf, ReportMode::Outer),
            Err(SchemeError::EmptySelection { amplicon: 1, strand: Strand::Reverse })
        ));
        assert!(write_amplicon_info(&s, &mut buf, ReportMode::Full).is_ok());
        assert!(write_insert_bed(&s, Vec::new()).is_err());
    }

    #[test]
    fn bedpe_enumerates_every_forward_reverse_pair() {
        let s = infer("r\t10\t30\tx_1_LEFT_a\tp1\t+\nr\t200\t220\tx_1_RIGHT\tp1\t-\nr\t5\t25\tx_1_LEFT_b\tp1\t+\n");
        assert_eq!(
            render(&s, OutputFormat::Bedpe, ReportMode::Full),
            "r\t5\t25\tr\t200\t220\tx_AMPLICON_1\t0\t+\t-\tp1\n\
             r\t10\t30\tr\t200\t220\tx_AMPLICON_1\t1\t+\t-\tp1\n"
        );
    }

    #[test]
    fn bedpe_orders_amplicons_by_reference_and_position() {
        let s = infer(
            "chr2\t10\t30\t1_LEFT\tp\t+\nchr2\t90\t110\t1_RIGHT\tp\t-\n\
             chr1\t500\t520\t2_LEFT\tp\t+\nchr1\t600\t620\t2_RIGHT\tp\t-\n\
             chr1\t50\t70\t3_LEFT\tp\t+\nchr1\t150\t170\t3_RIGHT\tp\t-\n",
        );
        let names: Vec<String> = render(&s, OutputFormat::Bedpe, ReportMode::Full)
            .lines()
            .map(|l| l.split('\t').nth(6).unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["AMPLICON_3", "AMPLICON_2", "AMPLICON_1"]);
    }

    #[test]
    fn format_and_mode_names_round_trip() {
        for f in [OutputFormat::IvarBed, OutputFormat::CojacInsertBed, OutputFormat::AmpliconInfo, OutputFormat::Bedpe] {
            assert_eq!(f.to_string().parse::<OutputFormat>().unwrap(), f);
        }
        assert_eq!("OUTER".parse::<ReportMode>().unwrap(), ReportMode::Outer);
        assert_eq!(ReportMode::default(), ReportMode::Full);
        assert!("wide".parse::<ReportMode>().is_err());
    }
}
