use geo::coord;
use gridquery::prelude::*;

/// Extreme but valid coordinates: poles and the date line.
#[test]
fn test_extreme_coordinates() {
    let _ = env_logger::builder().is_test(true).try_init();

    let config = Config::default();
    let grid = GeohashGrid::with_config(&config);
    let encoder = FieldEncoder::new(grid, &config);
    let builder = QueryBuilder::new(grid, &config);

    let corners = [
        Point::new(0.0, 90.0),
        Point::new(0.0, -90.0),
        Point::new(180.0, 0.0),
        Point::new(-180.0, 0.0),
    ];

    for point in corners {
        let shape = Shape::from(point);
        let field = encoder.encode(&shape, true).unwrap();
        assert_eq!(field.len(), 1);

        let expr = builder
            .build_query(&shape, SpatialOperation::Intersects)
            .unwrap();
        assert!(!expr.is_empty());
    }
}

/// A rectangle ending exactly on the date line must terminate its walk.
#[test]
fn test_rect_touching_date_line() {
    let grid = GeohashGrid::default();
    let rect = Rect::new(
        coord! { x: 179.5, y: 0.0 },
        coord! { x: 180.0, y: 0.5 },
    );

    let cells = grid.cells(&Shape::from(rect)).unwrap();
    assert!(!cells.is_empty());
}

/// Non-finite coordinates are rejected as empty coverings, not errors.
#[test]
fn test_non_finite_coordinates_yield_empty_results() {
    let config = Config::default();
    let grid = GeohashGrid::with_config(&config);
    let encoder = FieldEncoder::new(grid, &config);
    let builder = QueryBuilder::new(grid, &config);

    let shape = Shape::from(Point::new(f64::NAN, 40.7));
    let field = encoder.encode(&shape, true).unwrap();
    assert!(field.is_empty());
    assert_eq!(field.stored.as_deref(), Some(""));

    let expr = builder
        .build_query(&shape, SpatialOperation::Intersects)
        .unwrap();
    assert!(expr.is_empty());
}

/// A zero-area rectangle decomposes like the point it degenerates to.
#[test]
fn test_degenerate_rect_behaves_like_point() {
    let grid = GeohashGrid::default();
    let point = Point::new(-73.9855, 40.7580);
    let rect = Rect::new(point.0, point.0);

    let from_rect = grid.cells(&Shape::from(rect)).unwrap();
    let from_point = grid.cells(&Shape::from(point)).unwrap();
    assert_eq!(from_rect, from_point);
    assert_eq!(from_rect.len(), 1);
}

/// A world-spanning query stays within the covering cap and still matches
/// documents anywhere.
#[test]
fn test_world_spanning_query() {
    let config = Config::default().with_max_covering_cells(512);
    let grid = GeohashGrid::with_config(&config);
    let encoder = FieldEncoder::new(grid, &config);
    let builder = QueryBuilder::new(grid, &config);

    let world = Rect::new(
        coord! { x: -180.0, y: -90.0 },
        coord! { x: 180.0, y: 90.0 },
    );

    let expr = builder
        .build_query(&Shape::from(world), SpatialOperation::Intersects)
        .unwrap();
    assert!(!expr.is_empty());
    // Leaf prefix clauses are capped; ancestors add at most depth-1 per leaf.
    assert!(expr.len() <= 512 * expr.resolution);

    let doc = encoder
        .encode(&Shape::from(Point::new(-73.9855, 40.7580)), false)
        .unwrap();

    let hit = expr.iter().any(|clause| {
        doc.tokens.iter().any(|token| match clause.kind {
            MatchKind::Term => token == &clause.token,
            MatchKind::Prefix => token.starts_with(&clause.token),
        })
    });
    assert!(hit);
}

/// Truncation to a single character still deduplicates correctly.
#[test]
fn test_single_character_truncation() {
    let config = Config::default().with_max_indexed_length(1);
    let grid = GeohashGrid::with_config(&config);
    let encoder = FieldEncoder::new(grid, &config);

    let rect = Rect::new(
        coord! { x: -74.02, y: 40.70 },
        coord! { x: -73.93, y: 40.80 },
    );
    let field = encoder.encode(&Shape::from(rect), false).unwrap();

    assert!(!field.is_empty());
    assert!(field.tokens.iter().all(|t| t.len() == 1));
    let mut deduped = field.tokens.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), field.tokens.len());
}

/// Shapes smaller than the deepest cell decompose at the depth cap.
#[test]
fn test_tiny_shape_uses_depth_cap() {
    let config = Config::default().with_grid_depth(6);
    let grid = GeohashGrid::with_config(&config);

    let tiny = Rect::new(
        coord! { x: -73.985501, y: 40.758001 },
        coord! { x: -73.985500, y: 40.758002 },
    );
    let cells = grid.cells(&Shape::from(tiny)).unwrap();

    assert!(!cells.is_empty());
    assert!(cells.iter().all(|c| c.len() == 6));
}
