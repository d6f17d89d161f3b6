use std::fs;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use binpat_core::{EncodeOptions, RunSummary, run};

use crate::cli::Cli;

pub fn run_encode(cli: &Cli) -> Result<RunSummary> {
    let options = EncodeOptions::new(cli.skip)
        .with_delimiter(cli.delimiter)
        .with_comment(cli.comment);
    let span = info_span!("encode", skip = cli.skip);
    let _guard = span.enter();
    info!(
        input = %cli.input.display(),
        output = %cli.output.display(),
        skip = %options.skip,
        "generating binary patterns"
    );

    let summary = run(&cli.input, &cli.output, &options)
        .with_context(|| format!("encode {}", cli.input.display()))?;

    if let Some(path) = &cli.domains_out {
        let json = summary.domains.to_json().context("serialize domains")?;
        fs::write(path, json).with_context(|| format!("write domains: {}", path.display()))?;
        info!(path = %path.display(), "domains written");
    }
    Ok(summary)
}
