use serde::Serialize;

/// States of one export run.
///
/// ```text
/// Start --ok--> Extracted --ok--> Uploaded --> Done
///   |               |                            ^
///   +-----err-------+------err--> Failed --------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelineState {
    Start,
    Extracted,
    Uploaded,
    Failed,
    Done,
}

impl PipelineState {
    /// Next state given whether the action taken in `self` succeeded.
    ///
    /// Notification results never change the path: `Uploaded` and `Failed` both go to `Done`.
    pub fn transition(self, succeeded: bool) -> PipelineState {
        match (self, succeeded) {
            (PipelineState::Start, true) => PipelineState::Extracted,
            (PipelineState::Start, false) => PipelineState::Failed,
            (PipelineState::Extracted, true) => PipelineState::Uploaded,
            (PipelineState::Extracted, false) => PipelineState::Failed,
            (PipelineState::Uploaded, _) | (PipelineState::Failed, _) => PipelineState::Done,
            (PipelineState::Done, _) => PipelineState::Done,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == PipelineState::Done
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineState::*;

    #[test]
    fn test_happy_path() {
        assert_eq!(Start.transition(true), Extracted);
        assert_eq!(Extracted.transition(true), Uploaded);
        assert_eq!(Uploaded.transition(true), Done);
    }

    #[test]
    fn test_failures_route_to_failed() {
        assert_eq!(Start.transition(false), Failed);
        assert_eq!(Extracted.transition(false), Failed);
        assert_eq!(Failed.transition(true), Done);
        assert_eq!(Failed.transition(false), Done);
    }

    #[test]
    fn test_success_notification_failure_is_not_rerouted() {
        assert_eq!(Uploaded.transition(false), Done);
    }

    #[test]
    fn test_done_is_terminal() {
        assert!(Done.is_terminal());
        assert_eq!(Done.transition(false), Done);
        assert!(!Failed.is_terminal());
    }
}
