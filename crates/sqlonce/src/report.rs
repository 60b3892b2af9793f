//! Run reports.
//!
//! A [`RunReport`] is the ordered record of what happened to every statement
//! of one script execution. It is plain data so callers can log, print or
//! serialize it however they like.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{FailureStage, StatementError};

/// What the engine decided to do with a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Run the statement as written.
    Apply,
    /// The object already matches; run nothing.
    Skip,
    /// Drop the existing object, then run the statement.
    Replace,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Apply => "apply",
            Self::Skip => "skip",
            Self::Replace => "replace",
        })
    }
}

/// Final state of one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The statement ran.
    Applied,
    /// Nothing needed to run.
    Skipped,
    /// The existing object was dropped and the statement ran.
    Replaced,
    /// Inspection or execution failed.
    Failed {
        /// Where it failed.
        stage: FailureStage,
        /// Driver-reported message.
        message: String,
    },
    /// Not reached because the connection was lost earlier in the run.
    NotAttempted,
}

impl Outcome {
    /// Outcome that a successful decision produces.
    #[must_use]
    pub const fn from_decision(decision: Decision) -> Self {
        match decision {
            Decision::Apply => Self::Applied,
            Decision::Skip => Self::Skipped,
            Decision::Replace => Self::Replaced,
        }
    }

    /// Returns true for [`Outcome::Failed`].
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl From<&StatementError> for Outcome {
    fn from(error: &StatementError) -> Self {
        Self::Failed {
            stage: error.stage(),
            message: error.gateway_error().to_string(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("applied"),
            Self::Skipped => f.write_str("skipped"),
            Self::Replaced => f.write_str("replaced"),
            Self::Failed { stage, message } => match stage {
                FailureStage::Inspection => write!(f, "failed (inspection): {message}"),
                FailureStage::Execution => write!(f, "failed: {message}"),
            },
            Self::NotAttempted => f.write_str("not attempted"),
        }
    }
}

/// One statement's line in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// 1-based position in the script.
    pub index: usize,
    /// Statement text.
    pub statement: String,
    /// Classifier tag (`create_table`, `add_column`, `create_index`, `other`).
    pub kind: &'static str,
    /// Decision taken, absent when no decision could be made.
    pub decision: Option<Decision>,
    /// Physical SQL sent (or, in a dry run, that would be sent).
    pub actions: Vec<String>,
    /// Result.
    pub outcome: Outcome,
}

impl ReportEntry {
    /// Returns the first 100 characters of the statement on one line.
    #[must_use]
    pub fn preview(&self) -> String {
        preview(&self.statement, 100)
    }
}

/// Counts of outcomes in a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    /// Statements applied as written.
    pub applied: usize,
    /// Statements skipped.
    pub skipped: usize,
    /// Statements applied after dropping the existing object.
    pub replaced: usize,
    /// Statements that failed.
    pub failed: usize,
    /// Statements never reached.
    pub not_attempted: usize,
}

impl fmt::Display for OutcomeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Applied: {}, Replaced: {}, Skipped: {}, Errors: {}",
            self.applied, self.replaced, self.skipped, self.failed
        )?;
        if self.not_attempted > 0 {
            write!(f, ", Not attempted: {}", self.not_attempted)?;
        }
        Ok(())
    }
}

/// The record of one script execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Per-statement entries, in source order.
    pub entries: Vec<ReportEntry>,
    /// Whether the run stopped early on a lost connection.
    pub aborted: bool,
}

impl RunReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            started_at: Utc::now(),
            entries: Vec::new(),
            aborted: false,
        }
    }

    /// Tallies outcomes.
    #[must_use]
    pub fn counts(&self) -> OutcomeCounts {
        let mut counts = OutcomeCounts::default();
        for entry in &self.entries {
            match entry.outcome {
                Outcome::Applied => counts.applied += 1,
                Outcome::Skipped => counts.skipped += 1,
                Outcome::Replaced => counts.replaced += 1,
                Outcome::Failed { .. } => counts.failed += 1,
                Outcome::NotAttempted => counts.not_attempted += 1,
            }
        }
        counts
    }

    /// True iff no statement failed.
    #[must_use]
    pub fn success(&self) -> bool {
        !self.entries.iter().any(|entry| entry.outcome.is_failed())
    }

    /// Decisions in source order; `None` where no decision was reached.
    #[must_use]
    pub fn decisions(&self) -> Vec<Option<Decision>> {
        self.entries.iter().map(|entry| entry.decision).collect()
    }

    /// Outcomes in source order.
    #[must_use]
    pub fn outcomes(&self) -> Vec<&Outcome> {
        self.entries.iter().map(|entry| &entry.outcome).collect()
    }
}

/// Flattens `text` onto one line and cuts it to `max` characters.
#[must_use]
pub fn preview(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let mut cut: String = flat.chars().take(max).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;

    fn entry(index: usize, outcome: Outcome) -> ReportEntry {
        ReportEntry {
            index,
            statement: format!("SELECT {index}"),
            kind: "other",
            decision: Some(Decision::Apply),
            actions: vec![format!("SELECT {index}")],
            outcome,
        }
    }

    #[test]
    fn test_counts_and_success() {
        let mut report = RunReport::new(false);
        report.entries.push(entry(1, Outcome::Applied));
        report.entries.push(entry(2, Outcome::Skipped));
        report.entries.push(entry(3, Outcome::Replaced));
        assert!(report.success());

        report.entries.push(entry(
            4,
            Outcome::from(&StatementError::Execution(GatewayError::rejected("boom"))),
        ));
        report.entries.push(entry(5, Outcome::NotAttempted));
        assert!(!report.success());

        let counts = report.counts();
        assert_eq!(
            counts,
            OutcomeCounts {
                applied: 1,
                skipped: 1,
                replaced: 1,
                failed: 1,
                not_attempted: 1,
            }
        );
        assert_eq!(
            counts.to_string(),
            "Applied: 1, Replaced: 1, Skipped: 1, Errors: 1, Not attempted: 1"
        );
    }

    #[test]
    fn test_empty_report_is_successful() {
        let report = RunReport::new(true);
        assert!(report.success());
        assert_eq!(report.counts(), OutcomeCounts::default());
    }

    #[test]
    fn test_preview_flattens_and_truncates() {
        assert_eq!(preview("CREATE TABLE t (\n  id INT\n)", 100), "CREATE TABLE t ( id INT )");
        assert_eq!(preview("abcdef", 3), "abc...");
    }

    #[test]
    fn test_failed_outcome_serializes_with_stage() {
        let outcome = Outcome::from(&StatementError::Inspection(GatewayError::rejected(
            "denied",
        )));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "failed", "stage": "inspection", "message": "denied"})
        );
        assert_eq!(outcome.to_string(), "failed (inspection): denied");
    }
}
