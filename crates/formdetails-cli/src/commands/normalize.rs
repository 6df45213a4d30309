use crate::cli::RunArgs;
use crate::config::Config;
use crate::logging::TracingReporter;
use crate::support::{
    init_logging_or_exit, load_config_or_exit, print_json_or_exit, print_report, rule,
};
use formdetails_kernel::Pipeline;
use formdetails_store::{BatchError, BatchPaths, BatchReport, run_normalize};

pub fn execute(config: &Config) -> Result<BatchReport, BatchError> {
    let paths = BatchPaths::new(&config.input_dir, &config.output_dir);
    let mut reporter = TracingReporter::new(Pipeline::Normalize);
    run_normalize(&paths, &mut reporter)
}

pub fn print_intro(config: &Config) {
    println!(
        "Normalizing every document in {} into the canonical form-detail shape",
        config.input_dir.display()
    );
}

pub fn run(args: RunArgs) {
    let config = load_config_or_exit(&args, None);
    init_logging_or_exit(&config, &[Pipeline::Normalize], &args);

    if !args.json {
        println!("formdetails normalize");
        rule();
        print_intro(&config);
        rule();
    }

    let report = execute(&config).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    if args.json {
        print_json_or_exit(&report, "normalize report");
        return;
    }
    print_report(&report);
    rule();
    println!(
        "Normalize complete. Results are in {}.",
        config.output_dir.display()
    );
}
