//! Hierarchical grid-cell shape encoding and boolean query construction for
//! inverted-index spatial search.
//!
//! Shapes are decomposed into prefix-hierarchical geohash cell tokens; the
//! encoder turns those tokens into an indexable stream, and the query builder
//! translates a shape plus a spatial relationship into a disjunction of
//! term/prefix clauses a text index evaluates natively.
//!
//! ```rust
//! use gridquery::prelude::*;
//!
//! let config = Config::default().with_field("geo");
//! let grid = GeohashGrid::with_config(&config);
//! let encoder = FieldEncoder::new(grid, &config);
//! let builder = QueryBuilder::new(grid, &config);
//!
//! let shape = Shape::from(Point::new(-74.0060, 40.7128));
//! let field = encoder.encode(&shape, true)?;
//! assert!(!field.is_empty());
//!
//! let query = builder.build_query(&shape, SpatialOperation::Intersects)?;
//! assert!(!query.is_empty());
//! # Ok::<(), gridquery::GridQueryError>(())
//! ```

pub mod config;
pub mod encode;
pub mod error;
pub mod expand;
pub mod grid;
pub mod query;
pub mod similarity;
pub mod types;

pub use config::{Config, MAX_GRID_DEPTH};
pub use encode::{EncodedField, FieldEncoder};
pub use error::{GridQueryError, Result};
pub use expand::expand_ancestors;
pub use grid::{DEFAULT_GRID_DEPTH, GeohashGrid, GridModel};
pub use query::{BooleanExpression, Clause, MatchKind, QueryBuilder};
pub use similarity::{ConstantSimilarity, DepthDecaySimilarity, ResolutionSimilarity};
pub use types::{Shape, SpatialOperation};

pub use geo::{Point, Polygon, Rect};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GridQueryError, Result};

    pub use crate::{Config, Shape, SpatialOperation};

    pub use crate::{GeohashGrid, GridModel};

    pub use crate::{EncodedField, FieldEncoder};

    pub use crate::{BooleanExpression, Clause, MatchKind, QueryBuilder};

    pub use crate::{ConstantSimilarity, DepthDecaySimilarity, ResolutionSimilarity};

    pub use geo::{Point, Polygon, Rect};
}
