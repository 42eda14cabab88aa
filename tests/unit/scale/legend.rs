use super::*;
use crate::scale::color::Interpolation;

const RED: Rgba8 = Rgba8::opaque(255, 0, 0);
const BLUE: Rgba8 = Rgba8::opaque(0, 0, 255);

fn linear(min: f64, max: f64) -> ColorScale {
    ColorScale::new(
        ColorDomain::Continuous { min, max },
        vec![RED, BLUE],
        Interpolation::Hsl,
    )
    .unwrap()
}

#[test]
fn continuous_sections_span_the_domain() {
    let legend = Legend::build(&linear(0.0, 10.0), 5, 100.0, 1).unwrap();
    assert_eq!(legend.kind, ScaleKind::Linear);
    assert_eq!(legend.sections.len(), 5);

    let values: Vec<f64> = legend
        .sections
        .iter()
        .filter_map(|s| s.value.as_number())
        .collect();
    assert_eq!(values, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
    assert_eq!(legend.sections[0].color, RED);
    assert_eq!(legend.sections[4].color, BLUE);
    assert_eq!(legend.sections[2].offset, 40.0);
    assert_eq!(legend.sections[2].width, 20.0);

    let labels: Vec<&str> = legend.labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(labels, vec!["0.0", "10.0"]);
    assert_eq!(legend.labels[1].position, 100.0);
}

#[test]
fn section_count_is_capped_by_bar_length() {
    let legend = Legend::build(&linear(0.0, 1.0), 500, 40.0, 0).unwrap();
    assert_eq!(legend.sections.len(), 40);
    assert_eq!(legend.sections[0].width, 1.0);
}

#[test]
fn single_section_uses_domain_minimum() {
    let legend = Legend::build(&linear(2.0, 8.0), 1, 10.0, 0).unwrap();
    assert_eq!(legend.sections.len(), 1);
    assert_eq!(legend.sections[0].value, ScaleValue::Number(2.0));
}

#[test]
fn categorical_gets_one_section_per_value() {
    let scale = ColorScale::new(
        ColorDomain::Categorical {
            values: vec![1.0.into(), "forest".into()],
        },
        vec![RED, BLUE],
        Interpolation::Hsl,
    )
    .unwrap();
    let legend = Legend::build(&scale, 99, 60.0, 2).unwrap().with_title("cover");

    assert_eq!(legend.kind, ScaleKind::Ordinal);
    assert_eq!(legend.sections.len(), 2);
    assert_eq!(legend.sections[1].color, BLUE);
    assert_eq!(legend.labels[0].text, "1.00");
    assert_eq!(legend.labels[1].text, "forest");
    assert_eq!(legend.labels[1].position, 45.0);
    assert_eq!(legend.title.as_deref(), Some("cover"));
}

#[test]
fn degenerate_layouts_are_rejected() {
    assert!(Legend::build(&linear(0.0, 1.0), 0, 100.0, 0).is_err());
    assert!(Legend::build(&linear(0.0, 1.0), 4, 0.5, 0).is_err());
    assert!(Legend::build(&linear(0.0, 1.0), 4, f64::NAN, 0).is_err());
}

#[test]
fn legend_serializes_colors_as_hex() {
    let legend = Legend::build(&linear(0.0, 1.0), 2, 10.0, 0).unwrap();
    let json = serde_json::to_value(&legend).unwrap();
    assert_eq!(json["kind"], "linear");
    assert_eq!(json["sections"][0]["color"], "#ff0000");
    assert!(json.get("title").is_none());
}
