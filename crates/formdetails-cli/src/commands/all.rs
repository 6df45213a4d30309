//! Merge then normalize. A merge abort does not prevent the normalize step.

use crate::cli::RunArgs;
use crate::commands::{merge, normalize};
use crate::support::{
    init_logging_or_exit, load_config_or_exit, print_json_or_exit, print_report, rule,
};
use formdetails_kernel::Pipeline;
use formdetails_store::{BatchError, BatchReport};
use serde_json::{Value, json};

fn step_payload(result: &Result<BatchReport, BatchError>) -> Value {
    match result {
        Ok(report) => serde_json::to_value(report)
            .unwrap_or_else(|e| json!({"error": format!("failed to render report: {e}")})),
        Err(err) => json!({"error": err.to_string()}),
    }
}

pub fn run(args: RunArgs, append_file: Option<String>) {
    let config = load_config_or_exit(&args, append_file.as_deref());
    init_logging_or_exit(&config, &[Pipeline::Merge, Pipeline::Normalize], &args);

    if !args.json {
        println!("formdetails all");
        rule();
        println!("Step 1: merge");
        merge::print_intro(&config);
    }
    let merged = merge::execute(&config);
    if !args.json {
        match &merged {
            Ok(report) => print_report(report),
            Err(err) => eprintln!("error: {err}"),
        }
        println!();
        println!("Step 2: normalize");
        normalize::print_intro(&config);
    }
    let normalized = normalize::execute(&config);

    let aborted = merged.is_err() || normalized.is_err();
    if args.json {
        print_json_or_exit(
            &json!({
                "merge": step_payload(&merged),
                "normalize": step_payload(&normalized),
            }),
            "all report",
        );
    } else {
        match &normalized {
            Ok(report) => print_report(report),
            Err(err) => eprintln!("error: {err}"),
        }
        rule();
        if !aborted {
            println!(
                "All steps complete. Results are in {}.",
                config.output_dir.display()
            );
        }
    }

    if aborted {
        std::process::exit(1);
    }
}
