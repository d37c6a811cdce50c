use serde::{Deserialize, Serialize};

use crate::models::aero::AerodynamicMetrics;
use crate::optimize::Objective;

/// A message on the progress channel.
///
/// Serialized without a tag, so each variant is recognized by its fields:
///
/// - `{"iteration": 3, "metrics": {...}, "objective": "max_CL"}`
/// - `{"status": "complete", "artifact_ref": "..."}`
/// - `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Event {
    /// Best-so-far metrics after one iteration.
    Progress {
        iteration: usize,
        metrics: AerodynamicMetrics,
        objective: Objective,
    },

    /// The run finished and its artifact was stored.
    Complete {
        status: CompletionStatus,
        artifact_ref: String,
    },

    /// The run aborted.
    Failed { error: String },
}

/// Literal `"complete"` marker carried by [`Event::Complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    Complete,
}

impl Event {
    #[must_use]
    pub fn complete(artifact_ref: impl Into<String>) -> Self {
        Self::Complete {
            status: CompletionStatus::Complete,
            artifact_ref: artifact_ref.into(),
        }
    }

    #[must_use]
    pub fn failed(error: impl ToString) -> Self {
        Self::Failed {
            error: error.to_string(),
        }
    }

    /// Whether this is the last event of a run.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn progress_shape() {
        let event = Event::Progress {
            iteration: 2,
            metrics: AerodynamicMetrics::failed(),
            objective: Objective::MaximizeLiftToDrag,
        };
        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["iteration"], 2);
        assert_eq!(value["objective"], "maximize_L_over_D");
        assert_eq!(value["metrics"]["CL"], 0.0);
        assert_eq!(value.as_object().unwrap().len(), 3);
        assert!(!event.is_terminal());
    }

    #[test]
    fn terminal_shapes() {
        assert_eq!(
            serde_json::to_value(Event::complete("memory://0")).unwrap(),
            json!({ "status": "complete", "artifact_ref": "memory://0" })
        );
        assert_eq!(
            serde_json::to_value(Event::failed("boom")).unwrap(),
            json!({ "error": "boom" })
        );
        assert!(Event::complete("x").is_terminal());
        assert!(Event::failed("x").is_terminal());
    }

    #[test]
    fn parses_back_by_shape() {
        let event: Event =
            serde_json::from_value(json!({ "status": "complete", "artifact_ref": "a" })).unwrap();
        assert_eq!(event, Event::complete("a"));

        let event: Event = serde_json::from_value(json!({ "error": "e" })).unwrap();
        assert_eq!(event, Event::failed("e"));
    }
}
