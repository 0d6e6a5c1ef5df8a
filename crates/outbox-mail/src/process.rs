//! Two-valued outcome exposed to dispatch callers.

/// Outcome of a dispatch or of a process-based collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessResult {
    /// The work finished as intended.
    Success,
    /// The work finished but reported a failure.
    Error,
}

impl ProcessResult {
    /// Map a process exit code onto a result.
    ///
    /// Total over all integers: zero is the single success value and every
    /// other code, negatives included, is an error.
    pub fn from_exit_code(code: i32) -> Self {
        if code == 0 { Self::Success } else { Self::Error }
    }

    /// True for [`ProcessResult::Success`].
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}
