//! Generator error types and failure classification.

/// Failure classes for calls to the remote text generator.
///
/// Each variant carries the original error description and maps to a
/// distinct piece of user-facing guidance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeneratorErrorKind {
    /// The API credential was rejected or missing
    InvalidCredential(String),
    /// The API usage quota has been reached
    QuotaExceeded(String),
    /// The request was rejected as invalid (including domain or
    /// referrer restrictions on the key)
    InvalidRequest(String),
    /// Network or connectivity failure
    Network(String),
    /// The service reported resource exhaustion
    ResourceExhausted(String),
    /// Anything that matched none of the known classes
    Unclassified(String),
}

impl GeneratorErrorKind {
    /// Classify an error description into a failure class.
    ///
    /// Matching is case-insensitive substring search, checked in a fixed
    /// priority order: credential, quota, invalid request, network,
    /// resource exhaustion, then the unclassified fallback.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabula_error::GeneratorErrorKind;
    ///
    /// let kind = GeneratorErrorKind::classify("400 Bad Request: API key not valid");
    /// assert!(matches!(kind, GeneratorErrorKind::InvalidCredential(_)));
    ///
    /// let kind = GeneratorErrorKind::classify("Quota exceeded for requests per day");
    /// assert!(matches!(kind, GeneratorErrorKind::QuotaExceeded(_)));
    /// ```
    pub fn classify(description: impl Into<String>) -> Self {
        let description = description.into();
        let lowered = description.to_lowercase();

        if lowered.contains("api key not valid") {
            GeneratorErrorKind::InvalidCredential(description)
        } else if lowered.contains("quota") {
            GeneratorErrorKind::QuotaExceeded(description)
        } else if lowered.contains("400 bad request") || lowered.contains("invalid") {
            GeneratorErrorKind::InvalidRequest(description)
        } else if lowered.contains("fetch") || lowered.contains("network") {
            GeneratorErrorKind::Network(description)
        } else if lowered.contains("resource has been exhausted") {
            GeneratorErrorKind::ResourceExhausted(description)
        } else {
            GeneratorErrorKind::Unclassified(description)
        }
    }

    /// User-facing guidance for this failure class.
    pub fn guidance(&self) -> &'static str {
        match self {
            GeneratorErrorKind::InvalidCredential(_) => {
                "The API key appears to be invalid. Check that the key is entered \
                 correctly and has not expired."
            }
            GeneratorErrorKind::QuotaExceeded(_) => {
                "The API usage limit has been reached. Wait a while before retrying, \
                 or review your provider plan."
            }
            GeneratorErrorKind::InvalidRequest(_) => {
                "The request was rejected as invalid. This can happen when the API \
                 key is wrong or when the key is restricted to specific domains. \
                 Check the key settings."
            }
            GeneratorErrorKind::Network(_) => {
                "A network error occurred. Check your internet connection. If the \
                 connection is fine, a blocker or security software may be \
                 interfering with the request."
            }
            GeneratorErrorKind::ResourceExhausted(_) => {
                "The service reported exhausted resources. Too much work may have \
                 been requested at once, or the free tier may be used up. Wait a \
                 while and try again."
            }
            GeneratorErrorKind::Unclassified(_) => {
                "An unexpected error occurred. Please try again in a moment."
            }
        }
    }

    /// The original error description this class was derived from.
    pub fn description(&self) -> &str {
        match self {
            GeneratorErrorKind::InvalidCredential(d)
            | GeneratorErrorKind::QuotaExceeded(d)
            | GeneratorErrorKind::InvalidRequest(d)
            | GeneratorErrorKind::Network(d)
            | GeneratorErrorKind::ResourceExhausted(d)
            | GeneratorErrorKind::Unclassified(d) => d,
        }
    }
}

impl std::fmt::Display for GeneratorErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorErrorKind::InvalidCredential(d) => {
                write!(f, "Invalid credential: {}", d)
            }
            GeneratorErrorKind::QuotaExceeded(d) => write!(f, "Quota exceeded: {}", d),
            GeneratorErrorKind::InvalidRequest(d) => write!(f, "Invalid request: {}", d),
            GeneratorErrorKind::Network(d) => write!(f, "Network failure: {}", d),
            GeneratorErrorKind::ResourceExhausted(d) => {
                write!(f, "Resource exhausted: {}", d)
            }
            GeneratorErrorKind::Unclassified(d) => write!(f, "Unclassified failure: {}", d),
        }
    }
}

/// Generator error with source location tracking.
///
/// # Examples
///
/// ```
/// use fabula_error::{GeneratorError, GeneratorErrorKind};
///
/// let err = GeneratorError::classified("API key not valid. Please pass a valid key.");
/// assert!(matches!(err.kind, GeneratorErrorKind::InvalidCredential(_)));
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorError {
    /// The failure class
    pub kind: GeneratorErrorKind,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl GeneratorError {
    /// Create a new GeneratorError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GeneratorErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Classify a raw error description and wrap it.
    #[track_caller]
    pub fn classified(description: impl Into<String>) -> Self {
        Self::new(GeneratorErrorKind::classify(description))
    }
}

impl std::fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Generator Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for GeneratorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_outranks_invalid_request() {
        // "not valid" alone must not be mistaken for the invalid-request class
        let kind = GeneratorErrorKind::classify("API key not valid for this project");
        assert!(matches!(kind, GeneratorErrorKind::InvalidCredential(_)));
    }

    #[test]
    fn quota_outranks_network() {
        let kind = GeneratorErrorKind::classify("network quota reached");
        assert!(matches!(kind, GeneratorErrorKind::QuotaExceeded(_)));
    }

    #[test]
    fn bad_request_classifies_as_invalid() {
        let kind = GeneratorErrorKind::classify("HTTP 400 Bad Request: malformed body");
        assert!(matches!(kind, GeneratorErrorKind::InvalidRequest(_)));
    }

    #[test]
    fn fetch_failure_classifies_as_network() {
        let kind = GeneratorErrorKind::classify("failed to fetch the endpoint");
        assert!(matches!(kind, GeneratorErrorKind::Network(_)));
    }

    #[test]
    fn exhaustion_is_detected() {
        let kind = GeneratorErrorKind::classify("Resource has been exhausted (e.g. check quota)");
        // "quota" appears in the parenthetical, and quota has higher priority
        assert!(matches!(kind, GeneratorErrorKind::QuotaExceeded(_)));

        let kind = GeneratorErrorKind::classify("resource has been exhausted");
        assert!(matches!(kind, GeneratorErrorKind::ResourceExhausted(_)));
    }

    #[test]
    fn unknown_falls_back_to_unclassified() {
        let kind = GeneratorErrorKind::classify("something odd happened");
        assert!(matches!(kind, GeneratorErrorKind::Unclassified(_)));
        assert_eq!(kind.description(), "something odd happened");
    }

    #[test]
    fn guidance_is_distinct_per_class() {
        let kinds = [
            GeneratorErrorKind::classify("api key not valid"),
            GeneratorErrorKind::classify("quota"),
            GeneratorErrorKind::classify("invalid"),
            GeneratorErrorKind::classify("network"),
            GeneratorErrorKind::classify("resource has been exhausted"),
            GeneratorErrorKind::classify("???"),
        ];
        let mut messages: Vec<&str> = kinds.iter().map(|k| k.guidance()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), kinds.len());
    }
}
