//! Sparse pack options and their normalized form.
//!
//! Both entry points collect caller intent into a [`RawOptions`] bag:
//! the CLI from parsed flags, the HTTP service from an untyped JSON
//! `options` object. [`ResolvedConfig::from_raw`] then folds the bag into
//! a total configuration in which every boolean has a definite value, so
//! downstream code never sees an absent field. Normalization is pure and
//! infallible; malformed input degrades to defaults, never to an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output format for packed artifacts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Xml,
    Markdown,
    #[default]
    Plain,
}

impl OutputFormat {
    /// Parse a format token. Only the exact lowercase names are accepted.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "xml" => Some(Self::Xml),
            "markdown" => Some(Self::Markdown),
            "plain" => Some(Self::Plain),
            _ => None,
        }
    }

    /// The wire name of this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Markdown => "markdown",
            Self::Plain => "plain",
        }
    }
}

/// Pack options exactly as the caller supplied them.
///
/// Every field is optional: absent means "the caller said nothing", and
/// normalization decides what that silence means. Nothing here is
/// validated or defaulted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOptions {
    /// Print version information instead of packing.
    pub version: Option<bool>,

    /// Write a starter configuration file instead of packing.
    pub init: Option<bool>,

    /// Overwrite an existing configuration file during init.
    pub force: Option<bool>,

    /// Remote repository specifier (URL or `owner/repo` shorthand).
    pub remote: Option<String>,

    /// Verbose logging.
    pub verbose: Option<bool>,

    /// Emit output in a strictly parsable style.
    pub parsable_style: Option<bool>,

    /// Run the security scan over packed content.
    pub security_check: Option<bool>,

    /// Honor `.gitignore` files when collecting content.
    pub gitignore: Option<bool>,

    /// Apply the built-in default ignore patterns.
    pub default_patterns: Option<bool>,

    /// Keep empty directories in the packed output.
    pub include_empty_directories: Option<bool>,

    /// Text prepended to the packed output.
    pub header_text: Option<String>,

    /// File whose contents are appended as custom instructions.
    pub instruction_file_path: Option<String>,
}

impl RawOptions {
    /// Extract options from an untyped JSON value.
    ///
    /// Only values of the expected type are kept; absent keys, wrong-typed
    /// values, and non-object input all degrade to absent fields. This
    /// never fails.
    pub fn from_value(value: &Value) -> Self {
        Self {
            version: bool_field(value, "version"),
            init: bool_field(value, "init"),
            force: bool_field(value, "force"),
            remote: string_field(value, "remote"),
            verbose: bool_field(value, "verbose"),
            parsable_style: bool_field(value, "parsableStyle"),
            security_check: bool_field(value, "securityCheck"),
            gitignore: bool_field(value, "gitignore"),
            default_patterns: bool_field(value, "defaultPatterns"),
            include_empty_directories: bool_field(value, "includeEmptyDirectories"),
            header_text: string_field(value, "headerText"),
            instruction_file_path: string_field(value, "instructionFilePath"),
        }
    }
}

fn bool_field(value: &Value, key: &str) -> Option<bool> {
    value.get(key).and_then(Value::as_bool)
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Total pack configuration after normalization.
///
/// Every boolean is defined; optional strings remain optional but an
/// empty string is treated as absent. Serialized with camelCase keys for
/// the engine wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Run the security scan over packed content.
    pub security_check: bool,

    /// Honor `.gitignore` files when collecting content.
    pub gitignore: bool,

    /// Apply the built-in default ignore patterns.
    pub default_patterns: bool,

    /// Emit output in a strictly parsable style.
    pub parsable_style: bool,

    /// Keep empty directories in the packed output.
    pub include_empty_directories: bool,

    /// Verbose logging.
    pub verbose: bool,

    /// Text prepended to the packed output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_text: Option<String>,

    /// File whose contents are appended as custom instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction_file_path: Option<String>,

    /// Remote repository specifier, when one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
}

impl ResolvedConfig {
    /// Fold sparse options into a total configuration.
    ///
    /// Subtractive toggles (`security_check`, `gitignore`,
    /// `default_patterns`) default to enabled, so an explicit `true` and
    /// an absent field are indistinguishable downstream. Additive toggles
    /// default to disabled. Malformed input never surfaces here; it was
    /// already dropped during extraction.
    pub fn from_raw(raw: &RawOptions) -> Self {
        Self {
            security_check: raw.security_check.unwrap_or(true),
            gitignore: raw.gitignore.unwrap_or(true),
            default_patterns: raw.default_patterns.unwrap_or(true),
            parsable_style: raw.parsable_style.unwrap_or(false),
            include_empty_directories: raw.include_empty_directories.unwrap_or(false),
            verbose: raw.verbose.unwrap_or(false),
            header_text: non_empty(raw.header_text.clone()),
            instruction_file_path: non_empty(raw.instruction_file_path.clone()),
            remote: non_empty(raw.remote.clone()),
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self::from_raw(&RawOptions::default())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    // ── Output format ─────────────────────────────────────────────────

    #[test]
    fn test_format_parse_accepts_known_names() {
        assert_eq!(OutputFormat::parse("xml"), Some(OutputFormat::Xml));
        assert_eq!(OutputFormat::parse("markdown"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::parse("plain"), Some(OutputFormat::Plain));
    }

    #[test]
    fn test_format_parse_rejects_unknown_names() {
        assert_eq!(OutputFormat::parse("yaml"), None);
        assert_eq!(OutputFormat::parse("XML"), None);
        assert_eq!(OutputFormat::parse(""), None);
    }

    #[test]
    fn test_format_wire_names_round_trip() {
        for format in [OutputFormat::Xml, OutputFormat::Markdown, OutputFormat::Plain] {
            assert_eq!(OutputFormat::parse(format.as_str()), Some(format));
        }
    }

    // ── Normalization defaults ────────────────────────────────────────

    #[test]
    fn test_empty_options_resolve_to_defaults() {
        let config = ResolvedConfig::from_raw(&RawOptions::default());
        assert!(config.security_check);
        assert!(config.gitignore);
        assert!(config.default_patterns);
        assert!(!config.parsable_style);
        assert!(!config.include_empty_directories);
        assert!(!config.verbose);
        assert_eq!(config.header_text, None);
        assert_eq!(config.instruction_file_path, None);
        assert_eq!(config.remote, None);
    }

    #[test]
    fn test_security_check_false_only_when_explicitly_false() {
        let explicit_false = RawOptions {
            security_check: Some(false),
            ..Default::default()
        };
        assert!(!ResolvedConfig::from_raw(&explicit_false).security_check);

        let explicit_true = RawOptions {
            security_check: Some(true),
            ..Default::default()
        };
        assert!(ResolvedConfig::from_raw(&explicit_true).security_check);

        assert!(ResolvedConfig::from_raw(&RawOptions::default()).security_check);
    }

    #[test]
    fn test_explicit_true_indistinguishable_from_absent() {
        let explicit = RawOptions {
            security_check: Some(true),
            gitignore: Some(true),
            default_patterns: Some(true),
            ..Default::default()
        };
        assert_eq!(
            ResolvedConfig::from_raw(&explicit),
            ResolvedConfig::from_raw(&RawOptions::default())
        );
    }

    #[test]
    fn test_additive_toggles_require_explicit_true() {
        let raw = RawOptions {
            parsable_style: Some(true),
            include_empty_directories: Some(true),
            verbose: Some(true),
            ..Default::default()
        };
        let config = ResolvedConfig::from_raw(&raw);
        assert!(config.parsable_style);
        assert!(config.include_empty_directories);
        assert!(config.verbose);
    }

    #[test]
    fn test_empty_strings_resolve_to_absent() {
        let raw = RawOptions {
            header_text: Some(String::new()),
            instruction_file_path: Some(String::new()),
            remote: Some(String::new()),
            ..Default::default()
        };
        let config = ResolvedConfig::from_raw(&raw);
        assert_eq!(config.header_text, None);
        assert_eq!(config.instruction_file_path, None);
        assert_eq!(config.remote, None);
    }

    #[test]
    fn test_string_fields_pass_through() {
        let raw = RawOptions {
            header_text: Some("Packed for review".to_string()),
            instruction_file_path: Some("docs/instructions.md".to_string()),
            remote: Some("acme/widgets".to_string()),
            ..Default::default()
        };
        let config = ResolvedConfig::from_raw(&raw);
        assert_eq!(config.header_text.as_deref(), Some("Packed for review"));
        assert_eq!(
            config.instruction_file_path.as_deref(),
            Some("docs/instructions.md")
        );
        assert_eq!(config.remote.as_deref(), Some("acme/widgets"));
    }

    // ── JSON extraction ───────────────────────────────────────────────

    #[test]
    fn test_from_value_empty_object() {
        let raw = RawOptions::from_value(&json!({}));
        assert_eq!(raw, RawOptions::default());
    }

    #[test]
    fn test_from_value_reads_camel_case_keys() {
        let raw = RawOptions::from_value(&json!({
            "securityCheck": false,
            "gitignore": false,
            "defaultPatterns": false,
            "parsableStyle": true,
            "includeEmptyDirectories": true,
            "headerText": "hello",
            "instructionFilePath": "notes.md",
        }));
        assert_eq!(raw.security_check, Some(false));
        assert_eq!(raw.gitignore, Some(false));
        assert_eq!(raw.default_patterns, Some(false));
        assert_eq!(raw.parsable_style, Some(true));
        assert_eq!(raw.include_empty_directories, Some(true));
        assert_eq!(raw.header_text.as_deref(), Some("hello"));
        assert_eq!(raw.instruction_file_path.as_deref(), Some("notes.md"));
    }

    #[test]
    fn test_from_value_drops_wrong_typed_values() {
        let raw = RawOptions::from_value(&json!({
            "securityCheck": "false",
            "gitignore": 0,
            "parsableStyle": null,
            "headerText": 42,
        }));
        assert_eq!(raw.security_check, None);
        assert_eq!(raw.gitignore, None);
        assert_eq!(raw.parsable_style, None);
        assert_eq!(raw.header_text, None);

        // Dropped values fall back to defaults after normalization.
        let config = ResolvedConfig::from_raw(&raw);
        assert!(config.security_check);
        assert!(config.gitignore);
        assert!(!config.parsable_style);
    }

    #[test]
    fn test_from_value_non_object_input() {
        for value in [json!(null), json!([1, 2]), json!("options"), json!(7)] {
            assert_eq!(RawOptions::from_value(&value), RawOptions::default());
        }
    }

    // ── Wire serialization ────────────────────────────────────────────

    #[test]
    fn test_resolved_config_serializes_camel_case() {
        let config = ResolvedConfig {
            header_text: Some("hi".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["securityCheck"], json!(true));
        assert_eq!(value["defaultPatterns"], json!(true));
        assert_eq!(value["includeEmptyDirectories"], json!(false));
        assert_eq!(value["headerText"], json!("hi"));
        // Absent strings are omitted entirely.
        assert!(value.get("instructionFilePath").is_none());
        assert!(value.get("remote").is_none());
    }
}
