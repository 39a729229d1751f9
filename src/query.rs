//! Boolean candidate-query construction over indexed cell tokens.
//!
//! The produced expression is a sound over-approximation: grid-cell
//! containment approximates continuous geometry, so callers needing exact
//! semantics apply their own geometric filter over the candidates.

use crate::config::Config;
use crate::error::{GridQueryError, Result};
use crate::expand::expand_ancestors;
use crate::grid::GridModel;
use crate::similarity::{ConstantSimilarity, ResolutionSimilarity};
use crate::types::{Shape, SpatialOperation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a clause matches indexed tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Exact string equality with an indexed token.
    Term,
    /// Matches every indexed token having the clause token as a prefix.
    Prefix,
}

/// One disjunct of a boolean expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub token: String,
    pub kind: MatchKind,
    /// Grid depth of the clause token.
    pub depth: usize,
    /// Per-match score contribution assigned by the similarity strategy.
    pub weight: f32,
}

/// Disjunction of term/prefix clauses over one indexed field.
///
/// A document matches if any clause matches one of its indexed tokens; score
/// accumulation across clauses belongs to the consuming index engine. An
/// empty expression matches nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanExpression {
    /// Indexed field the clauses target.
    pub field: String,
    /// Grid depth the query shape was decomposed at.
    pub resolution: usize,
    pub clauses: Vec<Clause>,
}

impl BooleanExpression {
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }
}

impl fmt::Display for BooleanExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" OR ")?;
            }
            match clause.kind {
                MatchKind::Term => write!(f, "{}:{}", self.field, clause.token)?,
                MatchKind::Prefix => write!(f, "{}:{}*", self.field, clause.token)?,
            }
        }
        Ok(())
    }
}

/// Builds boolean candidate expressions for spatial relationships.
///
/// Immutable after construction; a single builder is safely shared by
/// reference across concurrent callers.
pub struct QueryBuilder<G> {
    grid: G,
    field: String,
    similarity: Box<dyn ResolutionSimilarity>,
}

impl<G: GridModel> QueryBuilder<G> {
    pub fn new(grid: G, config: &Config) -> Self {
        Self {
            grid,
            field: config.field.clone(),
            similarity: Box::new(ConstantSimilarity::default()),
        }
    }

    /// Replace the per-clause scoring strategy.
    pub fn with_similarity(mut self, similarity: Box<dyn ResolutionSimilarity>) -> Self {
        self.similarity = similarity;
        self
    }

    /// Translate a shape and spatial relationship into a boolean disjunction.
    ///
    /// `IsWithin` asks whether an indexed shape contains the query: a prefix
    /// clause per query leaf matches indexed tokens decomposed at least as
    /// fine along the same ancestor path. The overlap family (`Intersects`,
    /// `Overlaps`, `SimilarTo`) additionally needs the coarser direction: an
    /// exact-term clause per distinct ancestor of the leaf set catches
    /// indexed shapes whose own footprint is an ancestor cell of the query.
    ///
    /// Fails with [`GridQueryError::UnsupportedOperation`] for relationships
    /// outside the four supported values.
    pub fn build_query(
        &self,
        shape: &Shape,
        operation: SpatialOperation,
    ) -> Result<BooleanExpression> {
        if !operation.is_supported() {
            return Err(GridQueryError::UnsupportedOperation(operation));
        }

        let resolution = self.grid.best_level(shape);
        let leaves = self.grid.cells_covering(shape, resolution)?;

        let mut clauses = Vec::with_capacity(leaves.len() * 2);
        for leaf in &leaves {
            clauses.push(self.clause(leaf, MatchKind::Prefix, resolution));
        }

        if operation.is_overlap_family() {
            // Sorted so the expression is structurally identical regardless
            // of leaf emission order.
            let mut ancestors: Vec<String> = expand_ancestors(&leaves).into_iter().collect();
            ancestors.sort_unstable();
            for ancestor in &ancestors {
                clauses.push(self.clause(ancestor, MatchKind::Term, resolution));
            }
        }

        log::debug!(
            "built {} clause(s) for {} at depth {}",
            clauses.len(),
            operation,
            resolution
        );

        Ok(BooleanExpression {
            field: self.field.clone(),
            resolution,
            clauses,
        })
    }

    fn clause(&self, token: &str, kind: MatchKind, resolution: usize) -> Clause {
        let depth = token.chars().count();
        Clause {
            token: token.to_string(),
            kind,
            depth,
            weight: self.similarity.score(depth, resolution),
        }
    }
}
