//! Two-pass encoding pipeline.
//!
//! The pipeline runs these stages in order over the same input:
//! 1. **Pass 1**: extract every pattern and build the per-column domains
//! 2. **Freeze**: the domains become an immutable [`DomainSet`]
//! 3. **Pass 2**: extract every record again and write its one-hot encoding
//!
//! Options are passed explicitly to both passes and the domain set is the
//! only state carried from the first pass to the second.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, info_span, trace, warn};

use crate::domain::{DomainBuilder, DomainSet};
use crate::encode::PatternWriter;
use crate::error::{BinpatError, Result};
use crate::options::EncodeOptions;
use crate::record::{Extracted, extract, split_line};

/// Counters collected while writing encoded records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodeStats {
    /// Records written.
    pub records: u64,
    /// Bits per encoded record.
    pub width: usize,
    /// Records whose encoding has no bit set.
    pub all_zero: u64,
    /// Column values that were missing from their domain.
    pub unmatched: u64,
}

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub domains: DomainSet,
    pub stats: EncodeStats,
}

/// Run `visit` on every extracted record with its 1-based line number.
///
/// Lines are read as raw bytes. Every line is a record, blank ones included,
/// except lines starting with the comment byte when one is set; those are
/// skipped but still counted.
fn for_each_record<R, F>(reader: R, options: &EncodeOptions, mut visit: F) -> Result<()>
where
    R: Read,
    F: FnMut(u64, &Extracted<'_>) -> Result<()>,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut line = 0u64;
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| BinpatError::Read { source })?;
        if read == 0 {
            return Ok(());
        }
        line += 1;
        if is_comment(&buf, options.comment) {
            continue;
        }
        let fields = split_line(&buf, options.delimiter);
        visit(line, &extract(&fields, options.skip))?;
    }
}

fn is_comment(line: &[u8], comment: Option<u8>) -> bool {
    comment.is_some_and(|marker| line.first() == Some(&marker))
}

/// Pass 1: collect the domains of every pattern column.
pub fn build_domains<R: Read>(reader: R, options: &EncodeOptions) -> Result<DomainSet> {
    let mut builder = DomainBuilder::new();
    for_each_record(reader, options, |line, extracted| {
        trace!(line, fields = extracted.fields, "observe pattern");
        builder.observe(line, extracted)
    })?;
    let domains = builder.finish();
    if domains.records() == 0 {
        warn!("input contains no records");
    }
    for (column, domain) in domains.domains().iter().enumerate() {
        debug!(column, values = ?domain.values_lossy(), "collected domain");
    }
    Ok(domains)
}

/// Pass 2: encode every record against frozen domains.
pub fn encode_records<R: Read, W: Write>(
    reader: R,
    writer: W,
    domains: &DomainSet,
    options: &EncodeOptions,
) -> Result<EncodeStats> {
    let mut out = PatternWriter::new(writer, options.delimiter);
    let mut stats = EncodeStats {
        width: domains.width(),
        ..EncodeStats::default()
    };
    let expected = domains.pattern_len();
    for_each_record(reader, options, |line, extracted| {
        let label = extracted.label.ok_or(BinpatError::MissingLabel {
            line,
            fields: extracted.fields,
        })?;
        if extracted.pattern.len() != expected {
            return Err(BinpatError::PatternLengthMismatch {
                line,
                expected,
                actual: extracted.pattern.len(),
            });
        }
        let encoded = domains.encode(&extracted.pattern);
        if encoded.unmatched > 0 {
            warn!(
                line,
                unmatched = encoded.unmatched,
                "value not seen in first pass, column left at zero"
            );
            stats.unmatched += encoded.unmatched as u64;
        }
        if encoded.is_all_zero() {
            stats.all_zero += 1;
        }
        out.write_record(label, &encoded)
    })?;
    stats.records = out.written();
    out.finish()?;
    Ok(stats)
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| BinpatError::OpenInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Pass 1 over a file.
pub fn build_domains_from_path(input: &Path, options: &EncodeOptions) -> Result<DomainSet> {
    let span = info_span!("pass1", input = %input.display(), skip = options.skip.as_signed());
    let _guard = span.enter();
    let start = Instant::now();
    let domains = build_domains(open_input(input)?, options)?;
    info!(
        records = domains.records(),
        pattern_len = domains.pattern_len(),
        width = domains.width(),
        duration_ms = start.elapsed().as_millis(),
        "domains collected"
    );
    Ok(domains)
}

/// Pass 2 over a file, creating `output`.
pub fn encode_file(
    input: &Path,
    output: &Path,
    domains: &DomainSet,
    options: &EncodeOptions,
) -> Result<EncodeStats> {
    let span = info_span!("pass2", input = %input.display(), output = %output.display());
    let _guard = span.enter();
    let start = Instant::now();
    let reader = open_input(input)?;
    let file = File::create(output).map_err(|source| BinpatError::CreateOutput {
        path: output.to_path_buf(),
        source,
    })?;
    let stats = encode_records(reader, BufWriter::new(file), domains, options)?;
    if stats.all_zero > 0 {
        warn!(
            all_zero = stats.all_zero,
            "some encoded patterns have no bit set"
        );
    }
    info!(
        records = stats.records,
        width = stats.width,
        duration_ms = start.elapsed().as_millis(),
        "patterns written"
    );
    Ok(stats)
}

/// Run both passes: collect domains from `input`, then encode it into `output`.
///
/// The output file is only created once the first pass has succeeded.
pub fn run(input: &Path, output: &Path, options: &EncodeOptions) -> Result<RunSummary> {
    let domains = build_domains_from_path(input, options)?;
    let stats = encode_file(input, output, &domains, options)?;
    Ok(RunSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        domains,
        stats,
    })
}
