use super::*;
use crate::mask::values::ScaleValue;
use crate::projection::planar::Equirectangular;

fn square(min: f64, max: f64) -> Polygon {
    Polygon::new(vec![
        Point::new(min, min),
        Point::new(max, min),
        Point::new(max, max),
        Point::new(min, max),
    ])
    .unwrap()
}

fn grid_4x3() -> RasterGrid {
    RasterGrid::new(
        4,
        3,
        vec![
            vec![1.0, 2.0, NO_DATA, 4.0],
            vec![5.0, 2.0, 7.0, 8.0],
            vec![9.0, NO_DATA, 1.0, 12.0],
        ],
    )
    .unwrap()
}

fn numbers(set: &ValueSet) -> Vec<f64> {
    set.numbers().collect()
}

#[test]
fn grid_dimensions_must_match_declaration() {
    let short_row = RasterGrid::new(2, 2, vec![vec![1.0, 2.0], vec![3.0]]);
    assert!(matches!(short_row, Err(AnaximanderError::InvalidInput(_))));
    let missing_row = RasterGrid::new(2, 3, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    assert!(matches!(missing_row, Err(AnaximanderError::InvalidInput(_))));
    assert!(RasterGrid::from_flat(0, 1, vec![]).is_err());
    assert!(RasterGrid::from_flat(2, 2, vec![0.0; 3]).is_err());
    let huge = RasterGrid::from_flat(usize::MAX, 2, vec![]);
    assert!(matches!(huge, Err(AnaximanderError::InvalidInput(_))));

    let g = grid_4x3();
    assert_eq!(g.get(1, 2), Some(7.0));
    assert_eq!(g.get(3, 0), None);
}

#[test]
fn all_sentinel_grid_masks_to_empty_set() {
    let grid = RasterGrid::from_flat(5, 5, vec![NO_DATA; 25]).unwrap();
    for boundary in [square(-1000.0, 1000.0), square(0.5, 1.5)] {
        let out = mask_raster(
            &grid,
            Point::ZERO,
            1.0,
            1.0,
            &ExcludedValues::none(),
            &boundary,
        )
        .unwrap();
        assert!(out.is_empty());
    }
}

#[test]
fn fully_enclosed_grid_yields_all_valid_values() {
    let grid = grid_4x3();
    let excluded: ExcludedValues = [8.0].into_iter().collect();
    let out = mask_raster(
        &grid,
        Point::new(10.0, 10.0),
        2.0,
        2.0,
        &excluded,
        &square(0.0, 100.0),
    )
    .unwrap();
    assert_eq!(numbers(&out), vec![1.0, 2.0, 4.0, 5.0, 7.0, 9.0, 12.0]);
}

#[test]
fn cells_outside_boundary_are_dropped() {
    let grid = grid_4x3();
    // Cell positions are (col, row); the boundary keeps columns 0..=1 of rows 0..=1.
    let out = mask_raster(
        &grid,
        Point::ZERO,
        1.0,
        1.0,
        &ExcludedValues::none(),
        &square(-0.5, 1.5),
    )
    .unwrap();
    assert_eq!(numbers(&out), vec![1.0, 2.0, 5.0]);
}

#[test]
fn excluded_values_never_appear_even_when_inside() {
    let grid = grid_4x3();
    let excluded: ExcludedValues = [1.0, 2.0, 12.0].into_iter().collect();
    let out = mask_raster(
        &grid,
        Point::ZERO,
        1.0,
        1.0,
        &excluded,
        &square(-10.0, 10.0),
    )
    .unwrap();
    for v in [1.0, 2.0, 12.0] {
        assert!(!out.contains(&ScaleValue::from(v)));
    }
    assert!(!out.contains(&ScaleValue::from(NO_DATA)));
}

#[test]
fn masking_is_idempotent_and_parallel_matches_sequential() {
    let data: Vec<f64> = (0..40 * 30)
        .map(|i| if i % 7 == 0 { NO_DATA } else { f64::from(i % 23) })
        .collect();
    let grid = RasterGrid::from_flat(40, 30, data).unwrap();
    let boundary = Polygon::new(vec![
        Point::new(3.0, 1.0),
        Point::new(35.0, 4.0),
        Point::new(28.0, 27.0),
        Point::new(6.0, 22.0),
    ])
    .unwrap();
    let placement = RasterPlacement::new(Point::ZERO, 1.0, 1.0).unwrap();
    let excluded: ExcludedValues = [5.0].into_iter().collect();

    let seq = mask_raster_with(
        &grid,
        &placement,
        &excluded,
        &boundary,
        &RasterMask::default(),
    )
    .unwrap();
    let again = mask_raster_with(
        &grid,
        &placement,
        &excluded,
        &boundary,
        &RasterMask::default(),
    )
    .unwrap();
    let par = mask_raster_with(
        &grid,
        &placement,
        &excluded,
        &boundary,
        &RasterMask {
            parallel: true,
            threads: Some(3),
            ..RasterMask::default()
        },
    )
    .unwrap();

    assert!(!seq.is_empty());
    assert_eq!(seq, again);
    assert_eq!(seq, par);
}

#[test]
fn value_scale_divides_included_values() {
    let grid = RasterGrid::from_flat(2, 1, vec![10.0, 30.0]).unwrap();
    let placement = RasterPlacement::new(Point::ZERO, 1.0, 1.0).unwrap();
    let out = mask_raster_with(
        &grid,
        &placement,
        &ExcludedValues::none(),
        &square(-1.0, 5.0),
        &RasterMask {
            value_scale: 10.0,
            ..RasterMask::default()
        },
    )
    .unwrap();
    assert_eq!(numbers(&out), vec![1.0, 3.0]);

    let zero = RasterMask {
        value_scale: 0.0,
        ..RasterMask::default()
    };
    assert!(mask_raster_with(&grid, &placement, &ExcludedValues::none(), &square(0.0, 1.0), &zero).is_err());
}

#[test]
fn zero_threads_is_rejected() {
    let grid = RasterGrid::from_flat(1, 1, vec![1.0]).unwrap();
    let placement = RasterPlacement::new(Point::ZERO, 1.0, 1.0).unwrap();
    let opts = RasterMask {
        parallel: true,
        threads: Some(0),
        ..RasterMask::default()
    };
    assert!(
        mask_raster_with(&grid, &placement, &ExcludedValues::none(), &square(-1.0, 1.0), &opts)
            .is_err()
    );
}

#[test]
fn placement_from_corners_centers_footprint() {
    let grid = RasterGrid::from_flat(4, 2, vec![0.0; 8]).unwrap();
    let proj = |p: LonLat| Some(Point::new(p.lon, -p.lat));
    let placement = RasterPlacement::from_corners(
        &proj,
        LonLat::new(0.0, 0.0),
        &[
            LonLat::new(-20.0, 10.0),
            LonLat::new(20.0, 10.0),
            LonLat::new(-20.0, -10.0),
            LonLat::new(20.0, -10.0),
        ],
        &grid,
    )
    .unwrap();
    assert_eq!(placement.origin, Point::new(-20.0, -10.0));
    assert_eq!(placement.cell_width, 10.0);
    assert_eq!(placement.cell_height, 10.0);
    assert_eq!(placement.footprint(&grid), (40.0, 20.0));
    assert_eq!(placement.cell_position(1, 3), Point::new(10.0, 0.0));
}

#[test]
fn placement_needs_a_projectable_corner() {
    let grid = RasterGrid::from_flat(1, 1, vec![0.0]).unwrap();
    let only_center = |p: LonLat| (p.lon == 0.0).then(|| Point::new(0.0, 0.0));
    let err = RasterPlacement::from_corners(
        &only_center,
        LonLat::new(0.0, 0.0),
        &[LonLat::new(5.0, 5.0)],
        &grid,
    )
    .unwrap_err();
    assert!(matches!(err, AnaximanderError::InvalidGeometry(_)));
}

#[test]
fn globe_placement_uses_silhouette() {
    let grid = RasterGrid::from_flat(10, 5, vec![0.0; 50]).unwrap();
    let placement =
        RasterPlacement::globe(&Equirectangular::default(), LonLat::new(0.0, 0.0), &grid).unwrap();
    let (w, h) = placement.footprint(&grid);
    assert!((w - std::f64::consts::PI).abs() < 1e-9);
    assert!((h - std::f64::consts::PI).abs() < 1e-9);
}

#[test]
fn raster_source_parses_original_layout() {
    let json = br#"{
        "width": 2, "height": 1, "data": [[1, -9999]],
        "center": [0, 0], "upLeft": [-1, 1], "upRight": [1, 1],
        "loLeft": [-1, -1], "loRight": [1, -1]
    }"#;
    let src = RasterSource::from_json(json).unwrap();
    assert_eq!(src.corners()[3], LonLat::new(1.0, -1.0));
    let grid = src.into_grid().unwrap();
    assert_eq!(grid.get(0, 1), Some(NO_DATA));
}

#[test]
fn non_finite_samples_are_skipped() {
    let grid = RasterGrid::from_flat(3, 1, vec![f64::INFINITY, f64::NAN, 2.0]).unwrap();
    let out = mask_raster(
        &grid,
        Point::new(10.0, 10.0),
        1.0,
        1.0,
        &ExcludedValues::none(),
        &square(0.0, 100.0),
    )
    .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out.extent(), Some((2.0, 2.0)));
}
