//! Data source issues and the resolver's hard-failure error.

use std::fmt;

use serde::Serialize;

const NO_DATA_MESSAGE: &str = "Charging station data is unavailable. Please try again later.";

/// How loudly an issue should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Fatal => "fatal",
        })
    }
}

/// Why a resolution did not come from the live provider.
///
/// Every variant except [`SourceIssue::FallbackUnavailable`] is recovered by
/// serving the static dataset and travels as data on the resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceIssue {
    /// Provider answered with no usable records.
    SourceEmpty,

    /// Provider could not be reached, timed out, or returned an error status.
    SourceUnavailable { detail: String },

    /// Provider answered with a body that could not be decoded.
    SourceMalformed { detail: String },

    /// Static dataset could not be loaded either.
    FallbackUnavailable { detail: String },
}

impl SourceIssue {
    pub fn severity(&self) -> Severity {
        match self {
            SourceIssue::SourceEmpty => Severity::Info,
            SourceIssue::SourceUnavailable { .. } | SourceIssue::SourceMalformed { .. } => {
                Severity::Warning
            }
            SourceIssue::FallbackUnavailable { .. } => Severity::Fatal,
        }
    }

    /// Stable machine-readable name.
    pub fn kind(&self) -> &'static str {
        match self {
            SourceIssue::SourceEmpty => "source_empty",
            SourceIssue::SourceUnavailable { .. } => "source_unavailable",
            SourceIssue::SourceMalformed { .. } => "source_malformed",
            SourceIssue::FallbackUnavailable { .. } => "fallback_unavailable",
        }
    }

    /// Message shown to the user.
    ///
    /// Malformed responses read the same as outages; the distinction is
    /// kept for logs.
    pub fn message(&self) -> &'static str {
        match self {
            SourceIssue::SourceEmpty => "Unable to load real-time data. Showing sample data.",
            SourceIssue::SourceUnavailable { .. } | SourceIssue::SourceMalformed { .. } => {
                "Failed to load charging stations. Showing sample data."
            }
            SourceIssue::FallbackUnavailable { .. } => NO_DATA_MESSAGE,
        }
    }

    /// Underlying cause, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            SourceIssue::SourceEmpty => None,
            SourceIssue::SourceUnavailable { detail }
            | SourceIssue::SourceMalformed { detail }
            | SourceIssue::FallbackUnavailable { detail } => Some(detail),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SourceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{}: {}", self.kind(), detail),
            None => f.write_str(self.kind()),
        }
    }
}

/// Hard failure the caller must handle: there is nothing to show.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no station data available: {detail}")]
    FallbackUnavailable { detail: String },
}

impl ResolveError {
    /// Message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ResolveError::FallbackUnavailable { .. } => NO_DATA_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities() {
        assert_eq!(SourceIssue::SourceEmpty.severity(), Severity::Info);
        assert_eq!(
            SourceIssue::SourceUnavailable { detail: "x".into() }.severity(),
            Severity::Warning
        );
        assert_eq!(
            SourceIssue::SourceMalformed { detail: "x".into() }.severity(),
            Severity::Warning
        );
        assert!(SourceIssue::FallbackUnavailable { detail: "x".into() }.is_fatal());
    }

    #[test]
    fn empty_and_unavailable_messages_differ() {
        let empty = SourceIssue::SourceEmpty.message();
        let unavailable = SourceIssue::SourceUnavailable { detail: "x".into() }.message();
        let malformed = SourceIssue::SourceMalformed { detail: "y".into() }.message();
        assert_ne!(empty, unavailable);
        assert_eq!(unavailable, malformed);
    }

    #[test]
    fn display_includes_detail() {
        let issue = SourceIssue::SourceMalformed {
            detail: "JSON parse error: expected value".into(),
        };
        assert_eq!(
            issue.to_string(),
            "source_malformed: JSON parse error: expected value"
        );
        assert_eq!(SourceIssue::SourceEmpty.to_string(), "source_empty");
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            "\"warning\""
        );
    }
}
