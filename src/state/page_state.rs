/// Page state definitions for tracking crawl progress
///
/// Every page in the registry ends the crawl in exactly one of these states.
use std::fmt;

/// Represents the outcome of processing a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageState {
    /// Page is in the registry but has not been fetched yet
    Discovered,

    /// Page was fetched with HTTP 200 and its tags extracted
    Processed,

    /// Page returned HTTP 404 or 410
    DeadLink,

    /// Page returned some other non-200 status
    HttpError,

    /// Page could not be reached (connection refused, DNS failure, timeout)
    Unreachable,

    /// Fetch or body read failed for another reason
    Failed,

    /// The registry key is not an absolute URL that can be fetched
    Malformed,
}

impl PageState {
    /// Returns true once the page has been visited
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Discovered)
    }

    /// Returns true if the page was fetched and extracted
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed)
    }

    /// Returns true if the page was visited but yielded no tags
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::DeadLink | Self::HttpError | Self::Unreachable | Self::Failed | Self::Malformed
        )
    }

    /// Short machine-friendly name, used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Processed => "processed",
            Self::DeadLink => "dead_link",
            Self::HttpError => "http_error",
            Self::Unreachable => "unreachable",
            Self::Failed => "failed",
            Self::Malformed => "malformed",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Discovered,
            Self::Processed,
            Self::DeadLink,
            Self::HttpError,
            Self::Unreachable,
            Self::Failed,
            Self::Malformed,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(!PageState::Discovered.is_terminal());

        assert!(PageState::Processed.is_terminal());
        assert!(PageState::DeadLink.is_terminal());
        assert!(PageState::HttpError.is_terminal());
        assert!(PageState::Unreachable.is_terminal());
        assert!(PageState::Failed.is_terminal());
        assert!(PageState::Malformed.is_terminal());
    }

    #[test]
    fn test_is_success() {
        assert!(PageState::Processed.is_success());

        assert!(!PageState::Discovered.is_success());
        assert!(!PageState::Failed.is_success());
    }

    #[test]
    fn test_is_error() {
        assert!(PageState::DeadLink.is_error());
        assert!(PageState::HttpError.is_error());
        assert!(PageState::Unreachable.is_error());
        assert!(PageState::Failed.is_error());
        assert!(PageState::Malformed.is_error());

        assert!(!PageState::Processed.is_error());
        assert!(!PageState::Discovered.is_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PageState::Discovered), "discovered");
        assert_eq!(format!("{}", PageState::Processed), "processed");
        assert_eq!(format!("{}", PageState::DeadLink), "dead_link");
    }

    #[test]
    fn test_all_states_complete() {
        let all = PageState::all_states();
        assert_eq!(all.len(), 7);

        for i in 0..all.len() {
            for j in (i + 1)..all.len() {
                assert_ne!(all[i], all[j], "Duplicate state found");
            }
        }
    }
}
