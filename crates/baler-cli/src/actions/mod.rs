//! The four action pipelines the dispatcher can run.
//!
//! Version and init are local conveniences; remote and default drive
//! the packaging engine. Each pipeline is self-contained so the
//! dispatcher stays a pure selector.

mod default;
mod init;
mod remote;
mod version;

pub use default::run_default_action;
pub use init::run_init_action;
pub use remote::run_remote_action;
pub use version::run_version_action;

use baler_config::options::ResolvedConfig;
use baler_core::PackResult;

/// What a packing action produced, paired with the normalized
/// configuration it ran under.
#[derive(Debug, Clone)]
pub struct PackOutcome {
    pub config: ResolvedConfig,
    pub pack_result: PackResult,
}
