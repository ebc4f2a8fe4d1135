//! Command-line surface for the `baler` binary.
//!
//! Flags fold into the same sparse options bag the HTTP service builds
//! from its JSON body, so dispatch and normalization are shared between
//! the two entry points. Subtractive toggles come as `--flag` / `--no-flag`
//! pairs; when neither appears the field stays absent and normalization
//! applies the default.

use std::path::PathBuf;

use clap::Parser;

use baler_config::options::RawOptions;

/// Baler — pack a repository into a single AI-friendly artifact.
#[derive(Debug, Parser)]
#[command(name = "baler", about, long_about = None)]
pub struct Cli {
    /// Directory to pack.
    #[arg(default_value = ".")]
    pub target: String,

    /// Path to configuration file.
    #[arg(short, long, default_value = "baler.toml")]
    pub config: PathBuf,

    /// Print version information and exit.
    #[arg(long)]
    pub version: bool,

    /// Write a starter baler.toml and exit.
    #[arg(long)]
    pub init: bool,

    /// Overwrite an existing configuration file (with --init).
    #[arg(long)]
    pub force: bool,

    /// Pack a remote repository (URL or owner/repo shorthand).
    #[arg(long, value_name = "SPECIFIER")]
    pub remote: Option<String>,

    /// Verbose logging.
    #[arg(long)]
    pub verbose: bool,

    /// Emit output in a strictly parsable style.
    #[arg(long)]
    pub parsable_style: bool,

    /// Run the security scan (default).
    #[arg(long, overrides_with = "no_security_check")]
    pub security_check: bool,
    /// Skip the security scan.
    #[arg(long)]
    pub no_security_check: bool,

    /// Honor .gitignore files (default).
    #[arg(long, overrides_with = "no_gitignore")]
    pub gitignore: bool,
    /// Ignore .gitignore files.
    #[arg(long)]
    pub no_gitignore: bool,

    /// Apply the built-in ignore patterns (default).
    #[arg(long, overrides_with = "no_default_patterns")]
    pub default_patterns: bool,
    /// Disable the built-in ignore patterns.
    #[arg(long)]
    pub no_default_patterns: bool,

    /// Keep empty directories in the packed output.
    #[arg(long)]
    pub include_empty_directories: bool,

    /// Text to prepend to the packed output.
    #[arg(long, value_name = "TEXT")]
    pub header_text: Option<String>,

    /// File whose contents are appended as custom instructions.
    #[arg(long, value_name = "PATH")]
    pub instruction_file_path: Option<String>,
}

impl Cli {
    /// Fold parsed flags into the sparse options bag the dispatcher uses.
    ///
    /// A plain flag maps to `Some(true)`, its `--no-` twin to
    /// `Some(false)`, and an untouched pair to `None`.
    pub fn raw_options(&self) -> RawOptions {
        RawOptions {
            version: self.version.then_some(true),
            init: self.init.then_some(true),
            force: self.force.then_some(true),
            remote: self.remote.clone(),
            verbose: self.verbose.then_some(true),
            parsable_style: self.parsable_style.then_some(true),
            security_check: negatable(self.security_check, self.no_security_check),
            gitignore: negatable(self.gitignore, self.no_gitignore),
            default_patterns: negatable(self.default_patterns, self.no_default_patterns),
            include_empty_directories: self.include_empty_directories.then_some(true),
            header_text: self.header_text.clone(),
            instruction_file_path: self.instruction_file_path.clone(),
        }
    }
}

fn negatable(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}
