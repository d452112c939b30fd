// Unit tests for pipeline rules

use super::*;
use crate::domain::scene::{profiles, SceneId};

#[test]
fn test_format_seconds() {
    assert_eq!(format_seconds(10.0), "10");
    assert_eq!(format_seconds(2.5), "2.5");
    assert_eq!(format_seconds(0.125), "0.125");
}

#[test]
fn test_materialize_replaces_every_placeholder() {
    for profile in profiles() {
        let graph = materialize(profile.filter_template, 12.5);
        assert!(!graph.contains(DURATION_PLACEHOLDER));

        let expected = profile.filter_template.matches(DURATION_PLACEHOLDER).count();
        assert_eq!(graph.matches("d=12.5").count(), expected);
    }
}

#[test]
fn test_materialize_is_per_duration() {
    let template = SceneId::Space.profile().filter_template;
    let short = materialize(template, 5.0);
    let long = materialize(template, 60.0);
    assert_ne!(short, long);
    assert!(short.contains("d=5,") || short.contains("d=5["));
    assert!(!short.contains("d=60"));
}

#[test]
fn test_materialize_plain_template() {
    assert_eq!(
        materialize("sine=d={duration};sine=d={duration}", 3.0),
        "sine=d=3;sine=d=3"
    );
}

#[test]
fn test_fade_plan_explicit_values() {
    let options = AudioOptions::new(10.0).with_fade(2.0).with_volume(0.5);
    let plan = FadePlan::resolve(&options, &AudioDefaults::default()).unwrap();
    assert_eq!(plan.fade_out_start, 8.0);
    assert_eq!(plan.volume, 0.5);
    assert_eq!(
        plan.audio_filter(),
        "atrim=0:10,afade=t=in:st=0:d=2,afade=t=out:st=8:d=2,volume=0.5"
    );
}

#[test]
fn test_fade_out_start_bounds() {
    let defaults = AudioDefaults::default();
    for &(duration, fade) in &[(10.0, 0.5), (10.0, 5.0), (1.0, 0.25), (30.0, 15.0)] {
        let plan = FadePlan::resolve(&AudioOptions::new(duration).with_fade(fade), &defaults)
            .unwrap();
        assert!(plan.fade_out_start >= 0.0);
        assert!(plan.fade_out_start < duration);
    }
}

#[test]
fn test_default_fade_capped_for_short_clips() {
    let plan = FadePlan::resolve(&AudioOptions::new(1.0), &AudioDefaults::default()).unwrap();
    assert_eq!(plan.fade_duration, 0.5);
    assert_eq!(plan.fade_out_start, 0.5);
    assert_eq!(plan.volume, 0.3);
}

#[test]
fn test_zero_fade_omits_fade_filters() {
    let options = AudioOptions::new(4.0).with_fade(0.0).with_volume(1.0);
    let plan = FadePlan::resolve(&options, &AudioDefaults::default()).unwrap();
    assert_eq!(plan.audio_filter(), "atrim=0:4,volume=1");
}

#[test]
fn test_fade_longer_than_duration_rejected() {
    let options = AudioOptions::new(3.0).with_fade(4.0);
    let err = FadePlan::resolve(&options, &AudioDefaults::default()).unwrap_err();
    assert!(matches!(err, AmbimuxError::InvalidOptions { .. }));
}

#[test]
fn test_invalid_values_rejected() {
    let defaults = AudioDefaults::default();
    assert!(FadePlan::resolve(&AudioOptions::new(0.0), &defaults).is_err());
    assert!(FadePlan::resolve(&AudioOptions::new(f64::NAN), &defaults).is_err());
    assert!(FadePlan::resolve(&AudioOptions::new(5.0).with_fade(-1.0), &defaults).is_err());
    assert!(FadePlan::resolve(&AudioOptions::new(5.0).with_volume(-0.1), &defaults).is_err());
}
