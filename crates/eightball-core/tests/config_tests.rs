use eightball_core::{BallConfig, ConfigError, FULL_TRANSITION_MS, REDUCED_TRANSITION_MS};

#[test]
fn defaults_are_valid() {
    let c = BallConfig::default();
    assert_eq!(c.validate(), Ok(()));
    assert_eq!(c.full_duration_ms, FULL_TRANSITION_MS);
    assert_eq!(c.reduced_duration_ms, REDUCED_TRANSITION_MS);
    assert_eq!(c.max_prompt_lines, 4);
}

#[test]
fn bad_durations_are_rejected() {
    for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let c = BallConfig {
            full_duration_ms: bad,
            ..BallConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::Duration {
                field: "full_duration_ms",
                ..
            })
        ));
    }
    let c = BallConfig {
        reduced_duration_ms: 0.0,
        ..BallConfig::default()
    };
    assert!(matches!(
        c.validate(),
        Err(ConfigError::Duration {
            field: "reduced_duration_ms",
            ..
        })
    ));
}

#[test]
fn each_field_has_its_own_error() {
    let base = BallConfig::default();
    let cases: Vec<(BallConfig, ConfigError)> = vec![
        (
            BallConfig {
                cue_progress: 1.5,
                ..base.clone()
            },
            ConfigError::CueProgress(1.5),
        ),
        (
            BallConfig {
                max_device_pixel_ratio: 0.0,
                ..base.clone()
            },
            ConfigError::PixelRatio(0.0),
        ),
        (
            BallConfig {
                glyph_texture_px: 0,
                ..base.clone()
            },
            ConfigError::TextureSize { field: "glyph" },
        ),
        (
            BallConfig {
                prompt_texture_px: 0,
                ..base.clone()
            },
            ConfigError::TextureSize { field: "prompt" },
        ),
        (
            BallConfig {
                max_prompt_lines: 0,
                ..base.clone()
            },
            ConfigError::PromptLines,
        ),
        (
            BallConfig {
                visibility_epsilon: 0.5,
                ..base.clone()
            },
            ConfigError::VisibilityEpsilon(0.5),
        ),
        (
            BallConfig {
                max_frame_delta_sec: -1.0,
                ..base.clone()
            },
            ConfigError::Rate {
                field: "max_frame_delta_sec",
                value: -1.0,
            },
        ),
    ];
    for (config, expected) in cases {
        assert_eq!(config.validate(), Err(expected));
    }
}

#[test]
fn damping_rates_must_be_positive() {
    let mut c = BallConfig::default();
    c.damping.reveal = 0.0;
    assert_eq!(
        c.validate(),
        Err(ConfigError::Rate {
            field: "damping.reveal",
            value: 0.0
        })
    );
}

#[test]
fn nan_pixel_ratio_is_rejected() {
    let c = BallConfig {
        max_device_pixel_ratio: f64::NAN,
        ..BallConfig::default()
    };
    assert!(matches!(c.validate(), Err(ConfigError::PixelRatio(_))));
}

#[test]
fn duration_resolution() {
    let c = BallConfig::default();
    assert_eq!(c.resolve_duration_ms(false, None), FULL_TRANSITION_MS);
    assert_eq!(c.resolve_duration_ms(true, None), REDUCED_TRANSITION_MS);
    assert_eq!(c.resolve_duration_ms(true, Some(900.0)), 900.0);
    assert_eq!(c.resolve_duration_ms(false, Some(f64::NAN)), FULL_TRANSITION_MS);
    assert_eq!(c.resolve_duration_ms(false, Some(-20.0)), 1.0);
}
