//! Run reports.

use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

/// Summary of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    /// Output WAV path.
    pub output: PathBuf,
    /// Number of input files.
    pub inputs: usize,
    /// Names of the commands applied, in order.
    pub commands: Vec<String>,
    /// Samples written to the output.
    pub samples_written: u32,
    /// Output duration in seconds.
    pub duration_seconds: f64,
    /// BLAKE3 hex digest of the output sample bytes.
    pub pcm_hash: String,
}

impl PipelineReport {
    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Prints a colored, human-readable summary to stdout.
    pub fn print_human(&self) {
        println!("{} {}", "Wrote".green().bold(), self.output.display());
        println!("  {} {}", "Inputs:".dimmed(), self.inputs);
        if self.commands.is_empty() {
            println!("  {} (none)", "Commands:".dimmed());
        } else {
            println!("  {} {}", "Commands:".dimmed(), self.commands.join(" -> "));
        }
        println!(
            "  {} {} ({:.3}s)",
            "Samples:".dimmed(),
            self.samples_written,
            self.duration_seconds
        );
        println!("  {} {}", "PCM hash:".dimmed(), self.pcm_hash);
    }
}
