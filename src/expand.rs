//! Ancestor-prefix expansion over leaf cell tokens.

use rustc_hash::FxHashSet;

/// Collect every distinct ancestor token of the input leaf tokens.
///
/// For a token of length L this is every proper prefix of length 1..=L-1;
/// the empty prefix and the token itself are excluded. Leaf tokens commonly
/// share ancestors, so the result is a deduplicated set.
///
/// # Examples
///
/// ```rust
/// use gridquery::expand_ancestors;
///
/// let ancestors = expand_ancestors(["abc", "abd"]);
/// assert_eq!(ancestors.len(), 2);
/// assert!(ancestors.contains("a"));
/// assert!(ancestors.contains("ab"));
/// ```
pub fn expand_ancestors<I, S>(tokens: I) -> FxHashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ancestors = FxHashSet::default();
    for token in tokens {
        let token = token.as_ref();
        for (idx, _) in token.char_indices().skip(1) {
            ancestors.insert(token[..idx].to_string());
        }
    }
    ancestors
}
