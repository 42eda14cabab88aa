use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert_eq!(Canvas::new(4, 3).unwrap().size(), Size::new(4.0, 3.0));
}

#[test]
fn lonlat_serializes_as_pair() {
    let p = LonLat::new(12.5, -3.0);
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, "[12.5,-3.0]");
    let back: LonLat = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
}

#[test]
fn hex_formatting_omits_opaque_alpha() {
    assert_eq!(Rgba8::opaque(255, 0, 16).to_hex(), "#ff0010");
    assert_eq!(Rgba8::new(1, 2, 3, 4).to_hex(), "#01020304");
}
