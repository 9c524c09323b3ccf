//! Output rendering and formatting

use capsim_types::FinalReport;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use std::io;

/// Output renderer for the final report
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(json_output: bool) -> Self {
        Self { json_output }
    }

    /// Render the final report
    pub fn render_final_report(&self, report: &FinalReport) -> io::Result<()> {
        if self.json_output {
            self.render_json(report)
        } else {
            self.render_table(report)
        }
    }

    /// Render as JSON
    fn render_json(&self, report: &FinalReport) -> io::Result<()> {
        let json = serde_json::to_string_pretty(report).map_err(io::Error::other)?;
        println!("{json}");
        Ok(())
    }

    /// Render as formatted table
    fn render_table(&self, report: &FinalReport) -> io::Result<()> {
        println!();
        println!("=== Performance Report ===");

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Metric").add_attribute(Attribute::Bold),
                Cell::new("Value").add_attribute(Attribute::Bold),
            ]);

        table.add_row(vec![
            Cell::new("Total requests"),
            Cell::new(report.metrics.total_requests),
        ]);
        table.add_row(vec![
            Cell::new("Successful requests"),
            Cell::new(report.metrics.successful_requests),
        ]);
        table.add_row(vec![
            Cell::new("Success rate"),
            Cell::new(format!("{:.2}%", report.metrics.success_rate)),
        ]);
        table.add_row(vec![
            Cell::new("Average wait"),
            Cell::new(format!("{:.4} ms", report.metrics.avg_wait_ms)),
        ]);
        table.add_row(vec![
            Cell::new("Final capacity"),
            Cell::new(format!(
                "{} / {} available",
                report.pool.available, report.pool.total
            )),
        ]);
        table.add_row(vec![
            Cell::new("Run duration"),
            Cell::new(format!("{:.1} s", report.duration_ms as f64 / 1000.0)),
        ]);

        println!("{table}");

        if !report.workers.is_empty() {
            let mut workers = Table::new();
            workers
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec![
                    Cell::new("Worker").add_attribute(Attribute::Bold),
                    Cell::new("Iterations").add_attribute(Attribute::Bold),
                ]);
            for summary in &report.workers {
                workers.add_row(vec![
                    Cell::new(&summary.worker),
                    Cell::new(summary.iterations),
                ]);
            }
            println!("{workers}");
        }

        Ok(())
    }
}
