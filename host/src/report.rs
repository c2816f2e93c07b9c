//! Run report types: per-configuration outcomes and aggregation.

use std::path::PathBuf;

/// Severity of a per-configuration outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    /// Both artifacts were written.
    Pass,
    /// Artifacts were written, but the declarations needed a workaround.
    Warning,
    /// Generation for this configuration type was abandoned.
    Failure,
}

/// The outcome of one configuration type's generation pass.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Configuration id the outcome belongs to.
    pub configuration: String,
    /// Human-readable message describing the outcome.
    pub message: String,
    /// Severity of the outcome.
    pub severity: Severity,
    /// Artifacts written for this configuration type.
    pub artifacts: Vec<PathBuf>,
}

impl Outcome {
    /// Creates a passing outcome.
    pub fn pass(
        configuration: impl Into<String>,
        message: impl Into<String>,
        artifacts: Vec<PathBuf>,
    ) -> Self {
        Self {
            configuration: configuration.into(),
            message: message.into(),
            severity: Severity::Pass,
            artifacts,
        }
    }

    /// Creates a warning outcome.
    pub fn warn(configuration: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            configuration: configuration.into(),
            message: message.into(),
            severity: Severity::Warning,
            artifacts: Vec::new(),
        }
    }

    /// Creates a failure outcome.
    pub fn fail(configuration: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            configuration: configuration.into(),
            message: message.into(),
            severity: Severity::Failure,
            artifacts: Vec::new(),
        }
    }

    /// Attaches the artifacts written before the outcome was decided.
    #[must_use]
    pub fn with_artifacts(mut self, artifacts: Vec<PathBuf>) -> Self {
        self.artifacts = artifacts;
        self
    }

    /// Returns true if this outcome represents a failure.
    pub fn is_failure(&self) -> bool {
        self.severity == Severity::Failure
    }
}

/// Aggregated report of one generator run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Outcomes in processing order.
    pub outcomes: Vec<Outcome>,
}

impl RunReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an outcome.
    pub fn push(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    /// Returns the count of failed configuration types.
    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    /// Returns the count of warnings.
    pub fn warning_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.severity == Severity::Warning)
            .count()
    }

    /// Returns true if no configuration type failed.
    pub fn all_passed(&self) -> bool {
        self.failure_count() == 0
    }
}
