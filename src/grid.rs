//! Hierarchical prefix-grid decomposition backed by geohash cells.
//!
//! Geohash tokens form a prefix hierarchy: every prefix of a cell token names
//! the ancestor cell containing it, which is exactly the invariant the
//! encoder and query builder rely on.

use crate::config::{Config, MAX_GRID_DEPTH};
use crate::error::Result;
use crate::types::Shape;
use geo::{BoundingRect, Coord, Intersects, Polygon, Rect};
use smallvec::SmallVec;

/// Default grid decomposition depth.
pub const DEFAULT_GRID_DEPTH: usize = 8;

/// A hierarchical grid decomposition of the plane.
///
/// Implementations must produce tokens satisfying the prefix invariant: for
/// any two tokens of one decomposition, either neither is a prefix of the
/// other, or one is a strict prefix (ancestor) of the other.
pub trait GridModel: Send + Sync {
    /// Deepest resolution this grid can decompose to.
    fn max_depth(&self) -> usize;

    /// The most precise-yet-economical depth for decomposing `shape`.
    fn best_level(&self, shape: &Shape) -> usize;

    /// Ordered leaf cell tokens covering `shape` at `level`.
    fn cells_covering(&self, shape: &Shape, level: usize) -> Result<Vec<String>>;

    /// Leaf cell tokens at the grid's own natural resolution for `shape`.
    fn cells(&self, shape: &Shape) -> Result<Vec<String>> {
        self.cells_covering(shape, self.best_level(shape))
    }
}

/// Geohash-backed prefix grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeohashGrid {
    max_depth: usize,
    max_covering_cells: usize,
}

impl GeohashGrid {
    /// Create a grid decomposing to at most `max_depth` characters.
    pub fn new(max_depth: usize) -> Self {
        assert!(
            (1..=MAX_GRID_DEPTH).contains(&max_depth),
            "Grid depth must be between 1 and {}",
            MAX_GRID_DEPTH
        );
        Self {
            max_depth,
            max_covering_cells: 4096,
        }
    }

    /// Create a grid from shared configuration.
    pub fn with_config(config: &Config) -> Self {
        Self {
            max_depth: config.grid_depth.clamp(1, MAX_GRID_DEPTH),
            max_covering_cells: config.max_covering_cells.max(1),
        }
    }

    /// Cell extent in degrees (width, height) at `level`.
    ///
    /// Each geohash character carries 5 bits, alternating longitude-first.
    fn cell_dims(level: usize) -> (f64, f64) {
        let bits = 5 * level as u32;
        let lon_bits = bits.div_ceil(2);
        let lat_bits = bits / 2;
        (
            360.0 / (1u64 << lon_bits) as f64,
            180.0 / (1u64 << lat_bits) as f64,
        )
    }

    /// Upper-bound estimate of the covering size for `rect` at `level`.
    fn estimated_cells(rect: &Rect, level: usize) -> f64 {
        let (cell_w, cell_h) = Self::cell_dims(level);
        ((rect.width() / cell_w).ceil() + 1.0) * ((rect.height() / cell_h).ceil() + 1.0)
    }

    /// Row-major lattice walk over the cells covering `rect`, optionally
    /// keeping only cells that intersect `filter`.
    fn cover_rect(
        &self,
        rect: &Rect,
        filter: Option<&Polygon>,
        level: usize,
    ) -> Result<Vec<String>> {
        let min = rect.min();
        let max = rect.max();
        if ![min.x, min.y, max.x, max.y].iter().all(|v| v.is_finite()) {
            log::warn!("rejecting covering of rect with non-finite coordinates");
            return Ok(Vec::new());
        }

        let min = clamp_coord(min);
        let max = clamp_coord(max);

        let mut cells = Vec::new();
        let mut row = geohash::encode(min, level)?;

        'rows: loop {
            let mut cell = row.clone();
            let mut row_cells: SmallVec<[String; 16]> = SmallVec::new();

            loop {
                let cell_bbox = geohash::decode_bbox(&cell)?;
                let keep = match filter {
                    Some(polygon) => polygon.intersects(&cell_bbox.to_polygon()),
                    None => true,
                };
                if keep {
                    row_cells.push(cell.clone());
                }

                if cells.len() + row_cells.len() >= self.max_covering_cells {
                    log::warn!(
                        "covering truncated at {} cells (depth {})",
                        self.max_covering_cells,
                        level
                    );
                    cells.extend(row_cells);
                    break 'rows;
                }

                if cell_bbox.max().x >= max.x {
                    break;
                }
                cell = geohash::neighbor(&cell, geohash::Direction::E)?;
            }

            let row_bbox = geohash::decode_bbox(&row)?;
            cells.extend(row_cells);

            if row_bbox.max().y >= max.y {
                break;
            }
            row = geohash::neighbor(&row, geohash::Direction::N)?;
        }

        Ok(cells)
    }
}

impl Default for GeohashGrid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_DEPTH)
    }
}

impl GridModel for GeohashGrid {
    fn max_depth(&self) -> usize {
        self.max_depth
    }

    fn best_level(&self, shape: &Shape) -> usize {
        let Some(rect) = shape.bounding_rect() else {
            return self.max_depth;
        };

        let (width, height) = (rect.width(), rect.height());
        if width == 0.0 && height == 0.0 {
            return self.max_depth;
        }

        // First depth whose cell fits inside the shape extent, deepened by
        // one for sub-cell detail.
        let mut level = self.max_depth;
        for depth in 1..=self.max_depth {
            let (cell_w, cell_h) = Self::cell_dims(depth);
            if cell_w <= width && cell_h <= height {
                level = (depth + 1).min(self.max_depth);
                break;
            }
        }

        // Back off while the covering would blow past the cell cap.
        while level > 1 && Self::estimated_cells(&rect, level) > self.max_covering_cells as f64 {
            level -= 1;
        }

        level
    }

    fn cells_covering(&self, shape: &Shape, level: usize) -> Result<Vec<String>> {
        let level = level.clamp(1, self.max_depth);

        match shape {
            Shape::Point(point) => {
                if !point.x().is_finite() || !point.y().is_finite() {
                    log::warn!("rejecting covering of point with non-finite coordinates");
                    return Ok(Vec::new());
                }
                Ok(vec![geohash::encode(clamp_coord(point.0), level)?])
            }
            Shape::Rect(rect) => self.cover_rect(rect, None, level),
            Shape::Polygon(polygon) => {
                let Some(rect) = polygon.bounding_rect() else {
                    return Ok(Vec::new());
                };
                self.cover_rect(&rect, Some(polygon), level)
            }
        }
    }
}

/// Clamp a coordinate into the lon/lat domain the geohash alphabet encodes.
fn clamp_coord(c: Coord) -> Coord {
    Coord {
        x: c.x.clamp(-180.0, 180.0),
        y: c.y.clamp(-90.0, 90.0),
    }
}
