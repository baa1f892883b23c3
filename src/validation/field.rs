/// Validation outcome attached to a form field. `None` means "nothing decided
/// yet" — either untouched, or an in-bounds value still waiting on its
/// availability check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ValidateStatus {
    #[default]
    None,
    Validating,
    Error,
    Success,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub status: ValidateStatus,
    pub error_msg: Option<String>,
}

impl Verdict {
    pub fn success() -> Self {
        Self {
            status: ValidateStatus::Success,
            error_msg: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            status: ValidateStatus::Error,
            error_msg: Some(msg.into()),
        }
    }

    /// In-bounds but not yet confirmed; used by the two-phase username/email
    /// validators whose success only the availability check may assign.
    pub fn pending() -> Self {
        Self {
            status: ValidateStatus::None,
            error_msg: None,
        }
    }

    pub fn validating() -> Self {
        Self {
            status: ValidateStatus::Validating,
            error_msg: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == ValidateStatus::Error
    }
}

/// One form field: current text plus the latest verdict. Mutated only through
/// the merge methods below so a field can never hold a message that belongs
/// to a previous value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub status: ValidateStatus,
    pub error_msg: Option<String>,
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keystroke path: new value and its freshly computed verdict together.
    pub fn set_value(&mut self, value: impl Into<String>, verdict: Verdict) {
        self.value = value.into();
        self.apply(verdict);
    }

    /// Verdict-only path (availability check resolution, blur re-check).
    pub fn apply(&mut self, verdict: Verdict) {
        self.status = verdict.status;
        self.error_msg = verdict.error_msg;
    }

    pub fn is_success(&self) -> bool {
        self.status == ValidateStatus::Success
    }
}
