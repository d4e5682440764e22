//! Per-run step reporting
//!
//! A pipeline driver appends one [`StepRecord`] per completed step. Because
//! drivers abort on the first error, a report only ever describes the prefix
//! of the sequence that actually ran.

use crate::handle::ResourceHandle;
use serde::Serialize;

/// One completed pipeline step
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    /// Step name (e.g. "create-subnet", "attach-internet-gateway")
    pub step: String,

    /// Handle returned by the provider, if the operation yields one.
    /// Pure attachment acknowledgements carry no handle.
    pub handle: Option<ResourceHandle>,
}

/// Result of a completed pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Steps that ran, in execution order
    pub steps: Vec<StepRecord>,

    /// Total execution time in milliseconds
    pub duration_ms: u64,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            duration_ms: 0,
        }
    }

    /// Record a step that produced a resource handle
    pub fn record(&mut self, step: impl Into<String>, handle: ResourceHandle) {
        self.steps.push(StepRecord {
            step: step.into(),
            handle: Some(handle),
        });
    }

    /// Record a step with no handle (e.g. an attachment acknowledgement)
    pub fn record_ack(&mut self, step: impl Into<String>) {
        self.steps.push(StepRecord {
            step: step.into(),
            handle: None,
        });
    }

    /// Look up the handle recorded for a step
    pub fn handle_for(&self, step: &str) -> Option<&ResourceHandle> {
        self.steps
            .iter()
            .find(|r| r.step == step)
            .and_then(|r| r.handle.as_ref())
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_keeps_execution_order() {
        let mut report = RunReport::new();
        report.record("create-vpc", ResourceHandle::new("vpc", "vpc-123"));
        report.record("create-subnet", ResourceHandle::new("subnet", "subnet-456"));
        report.record_ack("attach-internet-gateway");

        assert_eq!(report.len(), 3);
        assert_eq!(report.steps[0].step, "create-vpc");
        assert_eq!(report.steps[2].step, "attach-internet-gateway");
        assert!(report.steps[2].handle.is_none());
        assert_eq!(report.handle_for("create-subnet").unwrap().id(), "subnet-456");
        assert!(report.handle_for("attach-internet-gateway").is_none());
    }
}
