//! Log capture through a log file.

use std::fs;

use binpat_cli::logging::{LogConfig, LogFormat, init_logging};
use binpat_core::{EncodeOptions, run};
use tracing::level_filters::LevelFilter;

#[test]
fn json_log_file_records_both_passes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.bin");
    let log = dir.path().join("run.log");
    fs::write(&input, "p,x,s\ne,y,s\n").expect("write input");

    let config = LogConfig::default()
        .with_level(LevelFilter::INFO)
        .with_env_filter(false)
        .with_format(LogFormat::Json)
        .with_log_file(Some(log.clone()));
    init_logging(&config).expect("init logging");

    run(&input, &output, &EncodeOptions::new(1)).expect("run");

    let logs = fs::read_to_string(&log).expect("read log");
    let lines: Vec<&str> = logs.lines().collect();
    assert!(lines.iter().any(|line| line.contains("domains collected") && line.contains("pass1")));
    assert!(lines.iter().any(|line| line.contains("patterns written") && line.contains("pass2")));
    assert!(!logs.contains('\u{1b}'));
}
