//! The version action.

use baler_core::build_info;

/// Print the tool version and exit without touching config, the
/// filesystem, or the engine.
pub fn run_version_action() {
    println!("baler {}", build_info::version_string());
}
