//! Binary pattern generation for categorical datasets.
//!
//! Converts delimited records of categorical attributes into fixed-width
//! one-hot bit vectors, the input format of binary pattern classifiers such
//! as ART1 networks.
//!
//! # How it works
//!
//! - **Pass 1** reads every record, drops the skipped columns and collects the
//!   distinct values of each remaining column in first-seen order.
//! - **Pass 2** reads the same records again and writes, for each one, its
//!   label followed by one bit per known value of every column.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use binpat_core::{EncodeOptions, run};
//!
//! let options = EncodeOptions::new(1);
//! let summary = run(Path::new("mushrooms.csv"), Path::new("mushrooms.bin"), &options).unwrap();
//! println!(
//!     "{} records, {} bits per pattern",
//!     summary.stats.records,
//!     summary.domains.width()
//! );
//! ```
//!
//! # Known limitations
//!
//! - The label is always a single raw token (the first one for a positive
//!   skip, the second-to-last otherwise), whatever the number of skipped
//!   columns.
//! - `skip == 0` produces empty patterns and zero-width encodings.

pub mod domain;
pub mod encode;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod record;

pub use domain::{Domain, DomainBuilder, DomainSet, DomainValue};
pub use encode::{EncodedPattern, PatternWriter, parse_encoded_line};
pub use error::{BinpatError, Result};
pub use options::{EncodeOptions, SkipRule, parse_single_byte};
pub use pipeline::{
    EncodeStats, RunSummary, build_domains, build_domains_from_path, encode_file, encode_records,
    run,
};
pub use record::{Extracted, extract, extract_line, split_line};
