//! The next-development suggestion cache.

use derive_getters::Getters;
use tracing::debug;

/// Maximum number of cached suggestions.
pub const MAX_SUGGESTIONS: usize = 3;

/// Up to three next-development hints tied to the current timeline tip.
///
/// The cache is derived state: it is dropped whenever the tip changes,
/// except when a continue or rewrite call supplies fresh suggestions of
/// its own. It is never persisted and never refetched on its own;
/// emptiness is an absent affordance, not an error.
///
/// # Examples
///
/// ```
/// use fabula_story::Suggestions;
///
/// let mut cache = Suggestions::default();
/// cache.replace(vec!["a".into(), "b".into(), "c".into(), "d".into()]);
/// // Anything past the third entry is discarded.
/// assert_eq!(cache.items().len(), 3);
///
/// cache.clear();
/// assert!(cache.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct Suggestions {
    /// The cached suggestions, in the order the generator offered them
    items: Vec<String>,
}

impl Suggestions {
    /// Whether the cache holds nothing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the cache, keeping at most [`MAX_SUGGESTIONS`] entries.
    pub fn replace(&mut self, items: impl IntoIterator<Item = String>) {
        self.items = items.into_iter().take(MAX_SUGGESTIONS).collect();
        debug!(count = self.items.len(), "Suggestions replaced");
    }

    /// Drop every cached suggestion.
    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            debug!("Suggestions invalidated");
        }
        self.items.clear();
    }
}
