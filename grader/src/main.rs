use anyhow::{Context, Result, bail};
use common::config::GraderConfig;
use common::logger::init_logger;
use grader::run;
use grader::settings::GradingSettings;

fn main() -> Result<()> {
    // Load configuration and initialize logging
    let config = GraderConfig::global().clone();
    let _log_guard = init_logger(
        &config.log_dir,
        &config.log_file,
        &config.log_level,
        config.log_to_stdout,
    );

    let settings = GradingSettings::from_config(&config);
    tracing::info!(lab = %settings.lab_name, student = %settings.student_id, "grading started");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let report = runtime.block_on(run(&settings));

    println!("{}", report.outcome.summary_line());

    if !report.write_failures.is_empty() {
        for failure in &report.write_failures {
            eprintln!("{:#}", failure);
        }
        bail!("{} artifact(s) could not be written", report.write_failures.len());
    }
    Ok(())
}
