use std::path::{Path, PathBuf};

use colored::Colorize;
use inquire::Select;
use log::info;

use crate::bundle;
use crate::classifier::{LineCleaner, RestartPolicy};
use crate::config::types::Config;
use crate::error::{Result, TriageError};
use crate::patterns::PatternLibrary;
use crate::report::{self, Reporter};

/// Run the full triage pipeline for one namespace snapshot.
pub fn handle_triage(
    bundle_path: PathBuf,
    namespace: Option<String>,
    patterns_file: Option<PathBuf>,
    json: bool,
    no_report_file: bool,
    config: &Config,
) -> Result<()> {
    let library = match &patterns_file {
        Some(path) => PatternLibrary::builtin().with_log_patterns_from(path)?,
        None => PatternLibrary::builtin(),
    };

    let namespace = match namespace {
        Some(namespace) => namespace,
        None => select_namespace(&bundle_path)?,
    };
    let ns_path = bundle::namespace_path(&bundle_path, &namespace);
    if !ns_path.is_dir() {
        return Err(TriageError::BundleLayout(format!(
            "namespace snapshot {} does not exist",
            ns_path.display()
        )));
    }
    info!("processing logs on {}", ns_path.display());

    let cleaner = LineCleaner::new(config.cleaner.clone());
    let restarts = RestartPolicy::new(config.restart_thresholds.clone());
    let time_format = &config.report.output_timestamp_format;

    let mut classification =
        bundle::pods::classify_pods(&ns_path, &library.pod_status, &restarts)?;
    bundle::describe::scan_describe(
        &ns_path,
        &mut classification.errored,
        &library.describe,
        &cleaner,
    );
    bundle::logs::scan_errored_pods(
        &mut classification.errored,
        &library.logs,
        &cleaner,
        time_format,
    );
    let aggregator = bundle::logs::scan_healthy_pods(
        &classification.healthy,
        &library.logs,
        &cleaner,
        time_format,
    );

    if json {
        println!(
            "{}",
            report::render_json(
                &namespace,
                &classification,
                &aggregator,
                config.report.max_files_to_show,
            )?
        );
        return Ok(());
    }

    let mut reporter = if no_report_file {
        Reporter::console_only()
    } else {
        Reporter::with_file(&config.report.output_folder, &namespace)?
    };

    reporter.emit_styled(
        &format!("Namespace: {}", namespace.bold()),
        &format!("Namespace: {namespace}"),
    );
    reporter.emit(&format!(
        "Pods with errors: {} | Pods without status-level errors: {}",
        classification.errored.len(),
        classification.healthy.len()
    ));

    for pod in &classification.errored {
        report::render_pod_report(&mut reporter, pod);
    }
    report::render_namespace_summary(&mut reporter, &aggregator, config.report.max_files_to_show);

    let artifact = report::write_all_errors(&config.report.output_folder, &classification.errored)?;
    println!("\nError details written to {}", artifact.display());
    if let Some(path) = reporter.path() {
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn select_namespace(bundle_path: &Path) -> Result<String> {
    let mut options = bundle::namespaces(bundle_path)?;
    if options.len() == 1 {
        let only = options.remove(0);
        info!("only one namespace snapshot available, using {only}");
        return Ok(only);
    }
    Ok(Select::new("Select a namespace snapshot:", options).prompt()?)
}
