use crate::cli::RunArgs;
use crate::config::Config;
use crate::logging;
use formdetails_kernel::Pipeline;
use formdetails_store::{BatchReport, FileOutcome};
use serde::Serialize;
use std::path::Path;

pub const RULE_WIDTH: usize = 60;

pub fn load_config_or_exit(args: &RunArgs, append_file: Option<&str>) -> Config {
    let config = Config::load(args.config.as_deref().map(Path::new)).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
    config.with_overrides(args, append_file)
}

pub fn init_logging_or_exit(config: &Config, pipelines: &[Pipeline], args: &RunArgs) {
    logging::init(config, pipelines, !args.no_log_file).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });
}

pub fn rule() {
    println!("{}", "=".repeat(RULE_WIDTH));
}

pub fn print_json_or_exit<T: Serialize + ?Sized>(payload: &T, label: &str) {
    let rendered = serde_json::to_string_pretty(payload).unwrap_or_else(|err| {
        eprintln!("error: failed to render {label} json: {err}");
        std::process::exit(1);
    });
    println!("{rendered}");
}

pub fn print_report(report: &BatchReport) {
    println!("  pipeline: {}", report.pipeline);
    println!("  input dir: {}", report.input_dir);
    println!("  output dir: {}", report.output_dir);
    println!(
        "  processed: {}/{} (skipped {}, failed {})",
        report.processed, report.discovered, report.skipped, report.failed
    );
    for file in &report.files {
        match &file.outcome {
            FileOutcome::Written { .. } => {}
            FileOutcome::Skipped { reason } => println!("    - skipped {}: {reason}", file.file),
            FileOutcome::Failed { reason } => println!("    - failed {}: {reason}", file.file),
        }
    }
}
