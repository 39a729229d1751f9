//! Core value types: query shapes and spatial operations.

use crate::error::GridQueryError;
use geo::{BoundingRect, Point, Polygon, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A two-dimensional shape submitted for indexing or querying.
///
/// Wraps the `geo` primitives the grid knows how to decompose. Arbitrary
/// geometries can be indexed through their bounding rectangle or polygon.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point(Point),
    Rect(Rect),
    Polygon(Polygon),
}

impl Shape {
    /// Bounding rectangle of the shape, `None` for an empty polygon.
    pub fn bounding_rect(&self) -> Option<Rect> {
        match self {
            Shape::Point(point) => Some(Rect::new(point.0, point.0)),
            Shape::Rect(rect) => Some(*rect),
            Shape::Polygon(polygon) => polygon.bounding_rect(),
        }
    }

    /// Whether the shape has zero extent in both dimensions.
    pub fn is_degenerate(&self) -> bool {
        match self.bounding_rect() {
            Some(rect) => rect.width() == 0.0 && rect.height() == 0.0,
            None => true,
        }
    }
}

impl From<Point> for Shape {
    fn from(point: Point) -> Self {
        Shape::Point(point)
    }
}

impl From<Rect> for Shape {
    fn from(rect: Rect) -> Self {
        Shape::Rect(rect)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}

/// Spatial relationship requested between a query shape and indexed shapes.
///
/// Only `Intersects`, `IsWithin`, `Overlaps` and `SimilarTo` translate to
/// prefix-grid queries; the remaining relationships are part of the operation
/// vocabulary but are rejected by the query builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpatialOperation {
    Intersects,
    IsWithin,
    Overlaps,
    SimilarTo,
    Contains,
    IsDisjointTo,
    IsEqualTo,
}

impl SpatialOperation {
    /// Operations the prefix-grid query builder can translate.
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            SpatialOperation::Intersects
                | SpatialOperation::IsWithin
                | SpatialOperation::Overlaps
                | SpatialOperation::SimilarTo
        )
    }

    /// Overlap-family operations only need some shared cell relationship,
    /// as opposed to `IsWithin`'s strict containment direction.
    pub(crate) fn is_overlap_family(&self) -> bool {
        matches!(
            self,
            SpatialOperation::Intersects | SpatialOperation::Overlaps | SpatialOperation::SimilarTo
        )
    }

    fn as_str(&self) -> &'static str {
        match self {
            SpatialOperation::Intersects => "intersects",
            SpatialOperation::IsWithin => "is_within",
            SpatialOperation::Overlaps => "overlaps",
            SpatialOperation::SimilarTo => "similar_to",
            SpatialOperation::Contains => "contains",
            SpatialOperation::IsDisjointTo => "is_disjoint_to",
            SpatialOperation::IsEqualTo => "is_equal_to",
        }
    }
}

impl fmt::Display for SpatialOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpatialOperation {
    type Err = GridQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "intersects" => Ok(SpatialOperation::Intersects),
            "is_within" => Ok(SpatialOperation::IsWithin),
            "overlaps" => Ok(SpatialOperation::Overlaps),
            "similar_to" => Ok(SpatialOperation::SimilarTo),
            "contains" => Ok(SpatialOperation::Contains),
            "is_disjoint_to" => Ok(SpatialOperation::IsDisjointTo),
            "is_equal_to" => Ok(SpatialOperation::IsEqualTo),
            other => Err(GridQueryError::InvalidInput(format!(
                "unknown spatial operation: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    #[test]
    fn test_shape_bounding_rect() {
        let point = Shape::from(Point::new(-74.0060, 40.7128));
        let rect = point.bounding_rect().unwrap();
        assert_eq!(rect.width(), 0.0);
        assert_eq!(rect.height(), 0.0);
        assert!(point.is_degenerate());

        let poly: Polygon = polygon![
            (x: -74.0, y: 40.7),
            (x: -73.9, y: 40.7),
            (x: -73.95, y: 40.8),
            (x: -74.0, y: 40.7),
        ];
        let shape = Shape::from(poly);
        let rect = shape.bounding_rect().unwrap();
        assert_eq!(rect.min().x, -74.0);
        assert_eq!(rect.max().y, 40.8);
        assert!(!shape.is_degenerate());
    }

    #[test]
    fn test_empty_polygon_has_no_bounding_rect() {
        let empty = Shape::Polygon(Polygon::new(geo::LineString::new(vec![]), vec![]));
        assert!(empty.bounding_rect().is_none());
        assert!(empty.is_degenerate());
    }

    #[test]
    fn test_operation_support() {
        assert!(SpatialOperation::Intersects.is_supported());
        assert!(SpatialOperation::IsWithin.is_supported());
        assert!(SpatialOperation::Overlaps.is_supported());
        assert!(SpatialOperation::SimilarTo.is_supported());

        assert!(!SpatialOperation::Contains.is_supported());
        assert!(!SpatialOperation::IsDisjointTo.is_supported());
        assert!(!SpatialOperation::IsEqualTo.is_supported());
    }

    #[test]
    fn test_overlap_family_excludes_is_within() {
        assert!(SpatialOperation::Intersects.is_overlap_family());
        assert!(SpatialOperation::SimilarTo.is_overlap_family());
        assert!(!SpatialOperation::IsWithin.is_overlap_family());
    }

    #[test]
    fn test_operation_round_trips_through_str() {
        let ops = [
            SpatialOperation::Intersects,
            SpatialOperation::IsWithin,
            SpatialOperation::Overlaps,
            SpatialOperation::SimilarTo,
            SpatialOperation::Contains,
            SpatialOperation::IsDisjointTo,
            SpatialOperation::IsEqualTo,
        ];
        for op in ops {
            assert_eq!(op.to_string().parse::<SpatialOperation>().unwrap(), op);
        }
        assert!("touches".parse::<SpatialOperation>().is_err());
    }

    #[test]
    fn test_operation_serde_uses_snake_case() {
        let json = serde_json::to_string(&SpatialOperation::IsWithin).unwrap();
        assert_eq!(json, "\"is_within\"");
        let parsed: SpatialOperation = serde_json::from_str("\"similar_to\"").unwrap();
        assert_eq!(parsed, SpatialOperation::SimilarTo);
    }
}
