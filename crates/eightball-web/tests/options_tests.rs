// Host-side tests for mount option merging.
// The main crate is wasm-only, so we include the module directly.

#![allow(dead_code)]
mod options {
    include!("../src/options.rs");
}

use eightball_core::BallConfig;
use options::MountOptions;

#[test]
fn absent_options_keep_defaults() {
    let base = BallConfig::default();
    let merged = MountOptions::default().apply(base.clone());
    assert_eq!(merged, base);
}

#[test]
fn overrides_replace_only_named_fields() {
    let opts = MountOptions {
        duration_ms: Some(2000.0),
        max_device_pixel_ratio: Some(1.0),
        ..Default::default()
    };
    let base = BallConfig::default();
    let merged = opts.apply(base.clone());
    assert_eq!(merged.full_duration_ms, 2000.0);
    assert_eq!(merged.max_device_pixel_ratio, 1.0);
    assert_eq!(merged.reduced_duration_ms, base.reduced_duration_ms);
    assert_eq!(merged.prompt_texture_px, base.prompt_texture_px);
    assert!(merged.validate().is_ok());
}

#[test]
fn invalid_override_is_caught_by_validation() {
    let opts = MountOptions {
        reduced_duration_ms: Some(-5.0),
        ..Default::default()
    };
    assert!(opts.apply(BallConfig::default()).validate().is_err());
}
