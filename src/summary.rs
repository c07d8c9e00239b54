//! Per-amplicon overview of a scheme as a polars `DataFrame`.
//!
//! Used by `ampscheme describe`. Unlike the output writers this never fails on
//! an amplicon that lacks a forward or reverse primer: its geometry columns are null.
use polars::prelude::*;

use crate::scheme::Scheme;

/// One row per amplicon, by ascending amplicon number.
pub fn summary_frame(scheme: &Scheme) -> PolarsResult<DataFrame> {
    let amplicons = scheme.amplicons_by_id();

    let names: Vec<String> = amplicons.iter().map(|a| scheme.amplicon_name(a.id())).collect();
    let ids: Vec<u32> = amplicons.iter().map(|a| a.id()).collect();
    let refs: Vec<String> = amplicons.iter().map(|a| a.reference().to_string()).collect();
    let pools: Vec<String> = amplicons.iter().map(|a| a.pool().to_string()).collect();
    let n_primers: Vec<u32> = amplicons.iter().map(|a| a.primers().len() as u32).collect();
    let n_forward: Vec<u32> = amplicons.iter().map(|a| a.forward_primers().count() as u32).collect();
    let n_reverse: Vec<u32> = amplicons.iter().map(|a| a.reverse_primers().count() as u32).collect();
    let starts: Vec<Option<u64>> = amplicons.iter().map(|a| a.outer_forward().ok().map(|p| p.start)).collect();
    let ends: Vec<Option<u64>> = amplicons.iter().map(|a| a.outer_reverse().ok().map(|p| p.end)).collect();
    let inserts: Vec<Option<(u64, u64)>> = amplicons.iter().map(|a| a.insert().ok()).collect();
    let lengths: Vec<Option<u64>> = starts
        .iter()
        .zip(&ends)
        .map(|(s, e)| match (s, e) {
            (Some(s), Some(e)) => Some(e.saturating_sub(*s)),
            _ => None,
        })
        .collect();

    df!(
        "amplicon"     => names,
        "id"           => ids,
        "reference"    => refs,
        "pool"         => pools,
        "n_primers"    => n_primers,
        "n_forward"    => n_forward,
        "n_reverse"    => n_reverse,
        "start"        => starts,
        "end"          => ends,
        "insert_start" => inserts.iter().map(|i| i.map(|(s, _)| s)).collect::<Vec<_>>(),
        "insert_end"   => inserts.iter().map(|i| i.map(|(_, e)| e)).collect::<Vec<_>>(),
        "length"       => lengths,
    )
}

/// Configure polars' pretty-printer to show every row and column untruncated.
pub fn configure_table_display() {
    std::env::set_var("POLARS_FMT_TABLE_FORMATTING", "UTF8_FULL");
    std::env::set_var("POLARS_FMT_MAX_COLS", "100000");
    std::env::set_var("POLARS_FMT_MAX_ROWS", "1000000");
    std::env::set_var("POLARS_FMT_STR_LEN", "100000");
    std::env::set_var("POLARS_TABLE_WIDTH", "65535");
}
