//! File-level driver: load a scheme from disk and write one converted output.
//!
//! Conversion is all-or-nothing. The scheme is built and the output rendered
//! into memory first; the output file is only created once both succeeded.
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::output::{write_output, OutputFormat, ReportMode};
use crate::scheme::Scheme;

/// Input file type. Only primer scheme BED is supported.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum InputFormat {
    #[default]
    Bed,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str("bed") }
}

/// Everything `ampscheme convert` needs.
#[derive(Clone, Debug)]
pub struct ConvertOpts {
    pub input: PathBuf,
    /// Output path; `-` writes to stdout.
    pub output: PathBuf,
    pub to: OutputFormat,
    /// Amplicon info table; switches grouping from name inference to explicit mapping.
    pub amplicon_info: Option<PathBuf>,
    pub report: ReportMode,
    /// Overrides (or, with `amplicon_info`, supplies) the scheme name.
    pub scheme_name: Option<String>,
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let f = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    Ok(BufReader::new(f))
}

/// Build a scheme from a primer BED and an optional amplicon info table.
pub fn load_scheme(input: &Path, amplicon_info: Option<&Path>, scheme_name: Option<String>) -> anyhow::Result<Scheme> {
    let bed = open(input)?;
    let scheme = match amplicon_info {
        Some(info_path) => {
            let info = open(info_path)?;
            Scheme::from_primers_and_amplicons(bed, info, scheme_name)
                .with_context(|| format!("grouping {} by {}", input.display(), info_path.display()))?
        }
        None => {
            let scheme = Scheme::infer_from_primer_bed(bed)
                .with_context(|| format!("inferring amplicons from {}", input.display()))?;
            match scheme_name {
                Some(name) => scheme.with_name(Some(name)),
                None => scheme,
            }
        }
    };
    log::info!(
        "{}: {} primers in {} amplicons (scheme name: {})",
        input.display(),
        scheme.primer_count(),
        scheme.len(),
        scheme.name().unwrap_or("-")
    );
    Ok(scheme)
}

/// Render `scheme` fully into memory in the requested format.
pub fn render(scheme: &Scheme, to: OutputFormat, report: ReportMode) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_output(scheme, to, report, &mut buf).with_context(|| format!("writing {to} output"))?;
    Ok(buf)
}

pub fn run_convert(opts: &ConvertOpts) -> anyhow::Result<()> {
    let scheme = load_scheme(&opts.input, opts.amplicon_info.as_deref(), opts.scheme_name.clone())?;
    let rendered = render(&scheme, opts.to, opts.report)?;

    if opts.output.as_os_str() == "-" {
        std::io::stdout().lock().write_all(&rendered)?;
    } else {
        let mut f = File::create(&opts.output)
            .with_context(|| format!("cannot create {}", opts.output.display()))?;
        f.write_all(&rendered)?;
    }
    log::info!("wrote {} ({}, {} bytes)", opts.output.display(), opts.to, rendered.len());
    Ok(())
}
