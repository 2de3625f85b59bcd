use super::*;

#[test]
fn interpolation_parses_case_insensitively() {
    assert_eq!("LANCZOS4".parse::<Interpolation>().unwrap(), Interpolation::Lanczos4);
    assert_eq!(" cubic ".parse::<Interpolation>().unwrap(), Interpolation::Cubic);
    assert_eq!("linear".parse::<Interpolation>().unwrap(), Interpolation::Linear);
    assert_eq!("Nearest".parse::<Interpolation>().unwrap(), Interpolation::Nearest);
    assert!("area".parse::<Interpolation>().is_err());
}

#[test]
fn interpolation_display_round_trips_through_from_str() {
    for m in Interpolation::ALL {
        assert_eq!(m.to_string().parse::<Interpolation>().unwrap(), m);
    }
}

#[test]
fn defaults_match_cli_defaults() {
    assert_eq!(Interpolation::default(), Interpolation::Cubic);
    assert_eq!(ResolutionSource::default(), ResolutionSource::Inner);
    let lights = LightCoefficients::default();
    assert_eq!(lights.inner_light, 1.0);
    assert_eq!(lights.outer_light, 0.3);
}

#[test]
fn resolution_source_from_flag() {
    assert_eq!(ResolutionSource::from_use_outer(true), ResolutionSource::Outer);
    assert_eq!(ResolutionSource::from_use_outer(false), ResolutionSource::Inner);
}

#[test]
fn light_validation_accepts_unit_interval_bounds() {
    LightCoefficients::new(0.0, 1.0).validate().unwrap();
    LightCoefficients::new(1.0, 0.0).validate().unwrap();
}

#[test]
fn light_validation_rejects_out_of_range_and_non_finite() {
    assert!(LightCoefficients::new(1.5, 0.3).validate().is_err());
    assert!(LightCoefficients::new(1.0, -0.1).validate().is_err());
    assert!(LightCoefficients::new(f32::NAN, 0.3).validate().is_err());
    let err = LightCoefficients::new(1.0, f32::INFINITY)
        .validate()
        .unwrap_err();
    assert!(err.to_string().contains("outer-light"));
}
