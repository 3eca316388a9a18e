use anyhow::Result;
use serde_json::json;

use super::output::Output;
use crate::parallel::RunReport;

/// Print the end-of-run summary and every warning, grouped by worker
pub fn print_text_report(output: &Output, report: &RunReport) {
    output.blank_line();
    output.success(&format!("{} files processed", report.total_files));
    output.verbose(&format!(
        "{} workers, {:.2}s",
        report.workers,
        report.elapsed.as_secs_f64()
    ));

    let warning_count = report.warning_count();
    if warning_count == 0 {
        return;
    }

    output.warning(&format!("{} warning(s)", warning_count));
    output.blank_line();
    for group in report.worker_warnings.iter().filter(|g| !g.warnings.is_empty()) {
        if output.is_verbose() {
            output.section_header(&format!("worker-{}", group.worker_id));
        }
        for warning in &group.warnings {
            output.file_warning(&warning.file, &warning.message);
        }
    }
}

/// Print the report as a JSON document on stdout
pub fn print_json_report(report: &RunReport) -> Result<()> {
    let document = json!({
        "files_processed": report.total_files,
        "workers": report.workers,
        "elapsed_ms": report.elapsed.as_millis() as u64,
        "warnings": report.worker_warnings.iter().flat_map(|group| {
            group.warnings.iter().map(move |w| json!({
                "worker": group.worker_id,
                "file": w.file.display().to_string(),
                "message": w.message,
            }))
        }).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
