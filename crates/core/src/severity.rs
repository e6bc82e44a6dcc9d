//! Severity scales.
//!
//! Two scales exist and are deliberately separate types: [`Severity`] for
//! work-status signals and transition events, [`AlertSeverity`] for
//! cross-source alerts. Both order lowest to highest so that aggregation is
//! a plain `max`.

use serde::{Deserialize, Serialize};

/// Work-status severity: `INFO < WARN < BLOCK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Warn,
    Block,
}

impl Severity {
    /// String representation for display, logging, and database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Block => "BLOCK",
        }
    }

    /// Parse a stored value. Returns `None` for anything unknown.
    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "INFO" => Some(Self::Info),
            "WARN" => Some(Self::Warn),
            "BLOCK" => Some(Self::Block),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cross-source alert severity: `INFO < MAJOR < CRITICAL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    Info,
    Major,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Major => "MAJOR",
            Self::Critical => "CRITICAL",
        }
    }

    pub fn from_db(value: &str) -> Option<Self> {
        match value {
            "INFO" => Some(Self::Info),
            "MAJOR" => Some(Self::Major),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_for_max_aggregation() {
        let max = [Severity::Info, Severity::Block, Severity::Warn]
            .into_iter()
            .max();
        assert_eq!(max, Some(Severity::Block));
        assert!(Severity::Warn > Severity::Info);
    }

    #[test]
    fn alert_severity_orders_for_max_aggregation() {
        assert!(AlertSeverity::Critical > AlertSeverity::Major);
        assert!(AlertSeverity::Major > AlertSeverity::Info);
    }

    #[test]
    fn serializes_as_upper_case_codes() {
        assert_eq!(serde_json::to_string(&Severity::Block).unwrap(), "\"BLOCK\"");
        assert_eq!(
            serde_json::to_string(&AlertSeverity::Critical).unwrap(),
            "\"CRITICAL\""
        );
    }

    #[test]
    fn from_db_matches_as_str() {
        for s in [Severity::Info, Severity::Warn, Severity::Block] {
            assert_eq!(Severity::from_db(s.as_str()), Some(s));
        }
        for s in [AlertSeverity::Info, AlertSeverity::Major, AlertSeverity::Critical] {
            assert_eq!(AlertSeverity::from_db(s.as_str()), Some(s));
        }
        assert_eq!(Severity::from_db("CRITICAL"), None);
        assert_eq!(AlertSeverity::from_db("BLOCK"), None);
    }
}
