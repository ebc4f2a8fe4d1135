//! Fuzz target for pack option normalization.
//!
//! Run with: cargo +nightly fuzz run fuzz_options_normalizer
//!
//! Feeds arbitrary JSON documents through option extraction and
//! normalization, which must degrade malformed input to defaults rather
//! than panic.

#![no_main]

use baler_config::options::{RawOptions, ResolvedConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let raw = RawOptions::from_value(&value);
        let _ = ResolvedConfig::from_raw(&raw);
    }
});
