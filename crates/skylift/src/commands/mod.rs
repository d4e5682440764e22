pub mod image_pipeline;
pub mod network;

use colored::Colorize;
use skylift_cloud::RunReport;

/// Print a completed run report, one line per step
pub fn print_report(report: &RunReport) {
    println!();
    println!(
        "{}",
        format!("Completed {} steps in {}ms", report.len(), report.duration_ms).bold()
    );
    for step in &report.steps {
        match &step.handle {
            Some(handle) => println!("  ✓ {} → {}", step.step.cyan(), handle),
            None => println!("  ✓ {}", step.step.cyan()),
        }
    }
}
