use chrono::{DateTime, Local};

/// Single in-flight guard around planner submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitGate {
    #[default]
    Idle,
    Submitting { started_at: DateTime<Local> },
    /// The last request hit its deadline. Submitting again is allowed.
    TimedOut,
}

impl SubmitGate {
    /// Enter `Submitting`. Returns false, changing nothing, if a request is already out.
    pub fn begin(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        *self = SubmitGate::Submitting { started_at: Local::now() };
        true
    }

    pub fn finish(&mut self) {
        *self = SubmitGate::Idle;
    }

    pub fn time_out(&mut self) {
        if self.is_submitting() {
            *self = SubmitGate::TimedOut;
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitGate::Submitting { .. })
    }

    pub fn submit_disabled(&self, favorites_empty: bool) -> bool {
        self.is_submitting() || favorites_empty
    }

    pub fn status_line(&self) -> Option<String> {
        match self {
            SubmitGate::Idle => None,
            SubmitGate::Submitting { started_at } => Some(format!(
                "Creating planner... (since {})",
                started_at.format("%H:%M:%S")
            )),
            SubmitGate::TimedOut => Some("Planner request timed out".to_string()),
        }
    }
}
