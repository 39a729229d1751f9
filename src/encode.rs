//! Field-value encoding: shape to indexable token stream.

use crate::config::Config;
use crate::error::Result;
use crate::grid::GridModel;
use crate::types::Shape;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Immutable result of encoding one shape for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedField {
    /// Tokens to index, deduplicated after any truncation.
    pub tokens: Vec<String>,
    /// Stored textual form of the untruncated leaf sequence, if requested.
    pub stored: Option<String>,
}

impl EncodedField {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

/// Encodes shapes into grid-cell token streams for indexing.
#[derive(Debug, Clone)]
pub struct FieldEncoder<G> {
    grid: G,
    max_indexed_length: usize,
}

impl<G: GridModel> FieldEncoder<G> {
    pub fn new(grid: G, config: &Config) -> Self {
        Self {
            grid,
            max_indexed_length: config.max_indexed_length,
        }
    }

    /// Encode `shape` at the grid's natural resolution for it.
    ///
    /// With a truncation limit configured, every token is cut to at most that
    /// many characters and exact duplicates introduced by truncation are
    /// dropped, preserving first-seen order. The stored form always reflects
    /// the original, untruncated leaf sequence. An empty decomposition yields
    /// an empty token stream and an empty stored value.
    pub fn encode(&self, shape: &Shape, store: bool) -> Result<EncodedField> {
        let leaves = self.grid.cells(shape)?;
        let stored = store.then(|| leaves.join(" "));

        let tokens = if self.max_indexed_length > 0 {
            let mut seen: FxHashSet<&str> = FxHashSet::default();
            let mut tokens = Vec::with_capacity(leaves.len());
            for leaf in &leaves {
                let token = truncate_token(leaf, self.max_indexed_length);
                if seen.insert(token) {
                    tokens.push(token.to_string());
                }
            }
            tokens
        } else {
            leaves
        };

        Ok(EncodedField { tokens, stored })
    }
}

/// Truncate to at most `max` characters, on a character boundary.
fn truncate_token(token: &str, max: usize) -> &str {
    match token.char_indices().nth(max) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}
