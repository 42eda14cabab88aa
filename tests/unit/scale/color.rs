use super::*;

const RED: Rgba8 = Rgba8::opaque(255, 0, 0);
const GREEN: Rgba8 = Rgba8::opaque(0, 255, 0);
const BLUE: Rgba8 = Rgba8::opaque(0, 0, 255);

fn linear(min: f64, max: f64, range: Vec<Rgba8>, mode: Interpolation) -> ColorScale {
    ColorScale::new(ColorDomain::Continuous { min, max }, range, mode).unwrap()
}

#[test]
fn continuous_endpoints_and_clamping() {
    let s = linear(0.0, 10.0, vec![RED, BLUE], Interpolation::Hsl);
    assert_eq!(s.color_at(0.0), RED);
    assert_eq!(s.color_at(10.0), BLUE);
    assert_eq!(s.color_at(-5.0), RED);
    assert_eq!(s.color_at(50.0), BLUE);
}

#[test]
fn short_and_long_hue_paths_differ() {
    let short = linear(0.0, 1.0, vec![RED, BLUE], Interpolation::Hsl);
    let long = linear(0.0, 1.0, vec![RED, BLUE], Interpolation::HslLong);
    // Red (0deg) to blue (240deg): the short way passes magenta, the long way green.
    assert_eq!(short.color_at(0.5), Rgba8::opaque(255, 0, 255));
    assert_eq!(long.color_at(0.5), GREEN);
}

#[test]
fn multi_stop_ranges_are_spread_over_domain() {
    let s = linear(0.0, 100.0, vec![RED, GREEN, BLUE], Interpolation::Hsl);
    assert_eq!(s.color_at(50.0), GREEN);
    assert_eq!(s.color_at(100.0), BLUE);
}

#[test]
fn zero_width_domain_uses_midpoint() {
    let s = linear(3.0, 3.0, vec![RED, GREEN, BLUE], Interpolation::Hsl);
    assert_eq!(s.color_at(3.0), GREEN);
}

#[test]
fn gray_endpoint_borrows_hue() {
    let s = linear(0.0, 1.0, vec![Rgba8::opaque(255, 255, 255), RED], Interpolation::Hsl);
    let mid = s.color_at(0.5);
    assert!(mid.r > mid.g);
    assert_eq!(mid.g, mid.b);
}

#[test]
fn categorical_scale_cycles_range_and_rejects_unknown() {
    let domain = ColorDomain::Categorical {
        values: vec!["a".into(), "b".into(), "c".into()],
    };
    let s = ColorScale::new(domain, vec![RED, BLUE], Interpolation::Hsl).unwrap();
    assert_eq!(s.color(&"a".into()), Some(RED));
    assert_eq!(s.color(&"b".into()), Some(BLUE));
    assert_eq!(s.color(&"c".into()), Some(RED));
    assert_eq!(s.color(&"z".into()), None);
    assert_eq!(s.color_at(1.0), Rgba8::TRANSPARENT);
}

#[test]
fn continuous_scale_ignores_categories() {
    let s = linear(0.0, 1.0, vec![RED, BLUE], Interpolation::Hsl);
    assert_eq!(s.color(&"x".into()), None);
    assert_eq!(s.color(&1.0.into()), Some(BLUE));
}

#[test]
fn invalid_ranges_are_rejected() {
    assert!(
        ColorScale::new(
            ColorDomain::Continuous { min: 0.0, max: 1.0 },
            vec![RED],
            Interpolation::Hsl
        )
        .is_err()
    );
    assert!(
        ColorScale::new(
            ColorDomain::Continuous { min: 2.0, max: 1.0 },
            vec![RED, BLUE],
            Interpolation::Hsl
        )
        .is_err()
    );
    assert!(
        ColorScale::new(
            ColorDomain::Categorical { values: vec![] },
            vec![],
            Interpolation::Hsl
        )
        .is_err()
    );
}

#[test]
fn colors_deserialize_from_hex_array_and_hsl() {
    let colors: Vec<Rgba8> = serde_json::from_str(
        r##"["#ff0000", "00ff0080", [0, 0, 255], { "h": 120, "s": 1, "l": 0.5 }]"##,
    )
    .unwrap();
    assert_eq!(colors[0], RED);
    assert_eq!(colors[1], Rgba8::new(0, 255, 0, 128));
    assert_eq!(colors[2], BLUE);
    assert_eq!(colors[3], GREEN);

    assert!(serde_json::from_str::<Rgba8>(r##""#abc""##).is_err());
    assert_eq!(serde_json::to_string(&RED).unwrap(), r##""#ff0000""##);
}
