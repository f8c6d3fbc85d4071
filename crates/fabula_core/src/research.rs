//! Research context types.

use serde::{Deserialize, Serialize};

/// A web source backing a research result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroundingSource {
    /// Source address; research results are unique by this field
    pub uri: String,
    /// Human-readable page title
    pub title: String,
}

/// A fetched and optionally user-edited research snippet.
///
/// One instance lives in each research slot. A fetch replaces the whole
/// record; a text edit replaces only `text` and leaves `sources` alone.
///
/// # Examples
///
/// ```
/// use fabula_core::{GroundingSource, ResearchResult};
///
/// let result = ResearchResult::new(
///     "- The tower predates the empire.",
///     vec![
///         GroundingSource { uri: "https://a".into(), title: "First".into() },
///         GroundingSource { uri: "https://a".into(), title: "Duplicate".into() },
///     ],
/// );
/// // Duplicate uris collapse, first-seen title wins.
/// assert_eq!(result.sources.len(), 1);
/// assert_eq!(result.sources[0].title, "First");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResearchResult {
    /// Condensed reference text fed to prompt assembly
    pub text: String,
    /// Sources the text was grounded on, unique by uri
    pub sources: Vec<GroundingSource>,
}

impl ResearchResult {
    /// Build a result, deduplicating sources by uri.
    ///
    /// Order is preserved; for a repeated uri the first-seen title is
    /// kept.
    pub fn new(text: impl Into<String>, sources: Vec<GroundingSource>) -> Self {
        let mut seen = std::collections::HashSet::new();
        let sources = sources
            .into_iter()
            .filter(|source| seen.insert(source.uri.clone()))
            .collect();
        Self {
            text: text.into(),
            sources,
        }
    }
}
