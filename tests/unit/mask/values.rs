use super::*;

#[test]
fn numbers_sort_before_categories() {
    let set: ValueSet = [
        ScaleValue::from("forest"),
        ScaleValue::from(3.0),
        ScaleValue::from("crop"),
        ScaleValue::from(-1.5),
    ]
    .into_iter()
    .collect();
    let ordered: Vec<String> = set.iter().map(ToString::to_string).collect();
    assert_eq!(ordered, ["-1.5", "3", "crop", "forest"]);
}

#[test]
fn duplicates_and_signed_zero_collapse() {
    let mut set = ValueSet::new();
    assert!(set.insert(0.0));
    assert!(!set.insert(-0.0));
    assert!(set.insert(2.0));
    assert!(!set.insert(2.0));
    assert_eq!(set.len(), 2);
}

#[test]
fn extent_ignores_categories() {
    let mut set = ValueSet::new();
    assert_eq!(set.extent(), None);
    set.insert("x");
    assert_eq!(set.extent(), None);
    set.insert(4.0);
    assert_eq!(set.extent(), Some((4.0, 4.0)));
    set.insert(-2.0);
    set.insert(9.5);
    assert_eq!(set.extent(), Some((-2.0, 9.5)));
}

#[test]
fn extent_skips_non_finite_numbers() {
    let mut set = ValueSet::new();
    set.insert(f64::NAN);
    set.insert(f64::INFINITY);
    set.insert(f64::NEG_INFINITY);
    assert_eq!(set.extent(), None);
    set.insert(3.0);
    assert_eq!(set.extent(), Some((3.0, 3.0)));
    assert_eq!(set.numbers().collect::<Vec<_>>(), vec![3.0]);
}

#[test]
fn excluded_values_deserialize_from_mixed_list() {
    let ex: ExcludedValues = serde_json::from_str(r#"[0, 255, "water"]"#).unwrap();
    assert!(ex.contains_number(0.0));
    assert!(ex.contains_number(255.0));
    assert!(!ex.contains_number(1.0));
    assert!(ex.contains(&ScaleValue::from("water")));
    assert!(ExcludedValues::none().is_empty());
}

#[test]
fn no_data_marker_is_recognized() {
    assert!(ScaleValue::from(NO_DATA).is_no_data());
    assert!(!ScaleValue::from(0.0).is_no_data());
    assert!(!ScaleValue::from("-9999").is_no_data());
}
