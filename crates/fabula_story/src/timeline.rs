//! The ordered sequence of story segments.

use fabula_error::{FabulaResult, StoryError, StoryErrorKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Separator between segments in the plain-text export format.
const SEGMENT_SEPARATOR: &str = "\n\n";

/// Ordered, append-mostly sequence of narrative segments.
///
/// Index 0 is the prologue; later indices are generated or rewritten
/// segments. The prologue is protected: single-segment deletion and
/// rewriting never touch it, and removing it means clearing the whole
/// timeline through the confirmed clear path.
///
/// # Examples
///
/// ```
/// use fabula_story::StoryTimeline;
///
/// let mut timeline = StoryTimeline::default();
/// timeline.start("It was raining when I arrived.");
/// timeline.append("The innkeeper would not meet my eyes.");
/// assert_eq!(timeline.len(), 2);
///
/// timeline.delete_last().unwrap();
/// assert_eq!(timeline.len(), 1);
/// // The prologue alone cannot be deleted.
/// assert!(timeline.delete_last().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryTimeline {
    segments: Vec<String>,
}

impl StoryTimeline {
    /// The segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the story has not been started.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The current tip segment.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Begin the story with a prologue, replacing any previous content.
    pub fn start(&mut self, prologue: impl Into<String>) {
        self.segments = vec![prologue.into()];
        debug!("Timeline started");
    }

    /// Append exactly one segment.
    pub fn append(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
        debug!(len = self.segments.len(), "Segment appended");
    }

    /// Replace the tip segment.
    ///
    /// # Errors
    ///
    /// Fails when the timeline is empty.
    pub fn replace_last(&mut self, segment: impl Into<String>) -> FabulaResult<()> {
        let last = self
            .segments
            .last_mut()
            .ok_or_else(|| StoryError::new(StoryErrorKind::NotStarted))?;
        *last = segment.into();
        Ok(())
    }

    /// Remove the tip segment.
    ///
    /// # Errors
    ///
    /// Fails unless at least two segments exist; the prologue is
    /// protected.
    pub fn delete_last(&mut self) -> FabulaResult<()> {
        if self.segments.len() <= 1 {
            return Err(StoryError::new(StoryErrorKind::NothingToDelete).into());
        }
        self.segments.pop();
        debug!(len = self.segments.len(), "Tip segment deleted");
        Ok(())
    }

    /// Remove every segment from `from` to the end.
    ///
    /// # Errors
    ///
    /// Fails for `from == 0` (clearing the whole timeline is a separate,
    /// confirmed operation) and for indices past the tip.
    pub fn truncate_from(&mut self, from: usize) -> FabulaResult<()> {
        if from == 0 {
            return Err(StoryError::new(StoryErrorKind::ClearRequiresConfirmation).into());
        }
        if from >= self.segments.len() {
            return Err(StoryError::new(StoryErrorKind::InvalidRange(from)).into());
        }
        self.segments.truncate(from);
        debug!(len = self.segments.len(), "Timeline truncated");
        Ok(())
    }

    /// Remove every segment, prologue included.
    pub fn clear(&mut self) {
        self.segments.clear();
        debug!("Timeline cleared");
    }

    /// Render the story as plain text, one blank line between segments.
    ///
    /// # Errors
    ///
    /// Fails when there is nothing to export.
    pub fn export(&self) -> FabulaResult<String> {
        if self.segments.is_empty() {
            return Err(StoryError::new(StoryErrorKind::EmptyExport).into());
        }
        Ok(self.segments.join(SEGMENT_SEPARATOR))
    }

    /// Rebuild a timeline from exported text, splitting on blank-line
    /// boundaries.
    pub fn from_export(text: &str) -> Self {
        let segments = text
            .split(SEGMENT_SEPARATOR)
            .filter(|segment| !segment.trim().is_empty())
            .map(str::to_string)
            .collect();
        Self { segments }
    }
}
