//! Human-readable summaries of pack results.
//!
//! The engine owns every number printed here; this module only formats.

use baler_config::options::ResolvedConfig;
use baler_core::PackResult;

/// Render a pack summary for terminal output.
pub fn render_summary(config: &ResolvedConfig, result: &PackResult) -> String {
    let mut out = String::new();
    out.push_str("Pack complete\n");
    out.push_str(&format!("  Files packed: {}\n", result.total_files));
    out.push_str(&format!("  Total characters: {}\n", result.total_characters));
    out.push_str(&format!("  Total tokens: {}\n", result.total_tokens));

    if !config.security_check {
        out.push_str("  Security check: skipped\n");
    } else if result.suspicious_files_results.is_empty() {
        out.push_str("  Security check: no suspicious files found\n");
    } else {
        let count = result.suspicious_files_results.len();
        let noun = if count == 1 { "file" } else { "files" };
        out.push_str(&format!("  Security check: {count} suspicious {noun} found\n"));
        for suspect in &result.suspicious_files_results {
            out.push_str(&format!("    {}\n", suspect.file_path));
        }
    }

    out
}

/// Print the summary to stdout.
pub fn print_summary(config: &ResolvedConfig, result: &PackResult) {
    print!("{}", render_summary(config, result));
}
