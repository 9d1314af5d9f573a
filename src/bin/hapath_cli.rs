use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{value_parser, Arg, Command};
use indicatif::{ProgressBar, ProgressStyle};

use hapath_rs::{classify_fasta, AnchorKind, LocatorConfig};
use hapath_rs::locate::{DEFAULT_GAP_EXTEND, DEFAULT_GAP_OPEN, DEFAULT_MIN_SCORE};

fn spinner(color: &str, msg: &'static str) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template(&format!("{{spinner:.{color}}} {{msg}}"))?,
    );
    spinner.set_message(msg);
    Ok(spinner)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = Command::new("hapath-rs")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Classify influenza HA sequences as high or low pathogenic from the HA1/HA2 cleavage site")
        .arg(
            Arg::new("fa")
                .short('f')
                .long("fa")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .required(true)
                .help("FASTA file with the HA segment (.gz accepted)"),
        )
        .arg(
            Arg::new("tbl")
                .short('t')
                .long("tbl")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("NCBI feature table giving the HA2 start"),
        )
        .arg(
            Arg::new("ha2-start")
                .long("ha2-start")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("First base of HA2 (1-based); overrides --tbl"),
        )
        .arg(
            Arg::new("anchor")
                .long("anchor")
                .value_name("KIND")
                .help("Locator anchor: nucleotide or protein")
                .default_value("nucleotide"),
        )
        .arg(
            Arg::new("min-score")
                .long("min-score")
                .value_name("N")
                .value_parser(value_parser!(i32))
                .help("Minimum locator alignment score"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Output file (default: stdout)"),
        )
        .get_matches();

    let Some(fasta_path) = matches.get_one::<PathBuf>("fa") else {
        return Err("--fa is required".into());
    };
    let table_path = matches.get_one::<PathBuf>("tbl");

    let ha2_start = match matches.get_one::<usize>("ha2-start") {
        Some(0) => return Err("--ha2-start is 1-based and must be at least 1".into()),
        Some(&n) => Some(n - 1),
        None => None,
    };

    let anchor: AnchorKind = matches
        .get_one::<String>("anchor")
        .map(|s| s.parse())
        .transpose()?
        .unwrap_or_default();
    let min_score = matches
        .get_one::<i32>("min-score")
        .copied()
        .unwrap_or(DEFAULT_MIN_SCORE);
    let locator = LocatorConfig::new(anchor, min_score, DEFAULT_GAP_OPEN, DEFAULT_GAP_EXTEND)?;

    // 1. Classify
    let progress = spinner("green", "Classifying HA sequences...")?;
    let results = classify_fasta(fasta_path, table_path.map(PathBuf::as_path), ha2_start, locator)?;
    progress.finish_with_message(format!(
        "Classified {} sequence(s): {} high path, {} low path, {} indeterminate.",
        results.rows.len(),
        results.high_path_count(),
        results.low_path_count(),
        results.indeterminate_count()
    ));

    // 2. Write the report
    let report = results.get_report();
    match matches.get_one::<PathBuf>("output") {
        Some(path) => {
            let progress = spinner("yellow", "Writing report...")?;
            fs::write(path, report)?;
            progress.finish_with_message(format!("Report written to {}.", path.display()));
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(report.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
