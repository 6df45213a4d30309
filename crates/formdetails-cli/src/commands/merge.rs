use crate::cli::RunArgs;
use crate::config::Config;
use crate::logging::TracingReporter;
use crate::support::{
    init_logging_or_exit, load_config_or_exit, print_json_or_exit, print_report, rule,
};
use formdetails_kernel::Pipeline;
use formdetails_store::{BatchError, BatchPaths, BatchReport, run_merge};

pub fn execute(config: &Config) -> Result<BatchReport, BatchError> {
    let paths = BatchPaths::new(&config.input_dir, &config.output_dir);
    let mut reporter = TracingReporter::new(Pipeline::Merge);
    run_merge(&paths, &config.append_file, &mut reporter)
}

pub fn print_intro(config: &Config) {
    println!(
        "Merging {} into the formFields of every document in {}",
        config.append_file.display(),
        config.input_dir.display()
    );
}

pub fn run(args: RunArgs, append_file: Option<String>) {
    let config = load_config_or_exit(&args, append_file.as_deref());
    init_logging_or_exit(&config, &[Pipeline::Merge], &args);

    if !args.json {
        println!("formdetails merge");
        rule();
        print_intro(&config);
        rule();
    }

    let report = execute(&config).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if args.json {
        print_json_or_exit(&report, "merge report");
        return;
    }
    print_report(&report);
    rule();
    println!(
        "Merge complete. Results are in {}.",
        config.output_dir.display()
    );
}
