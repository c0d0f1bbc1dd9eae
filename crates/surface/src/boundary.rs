use std::fmt::Display;

/// Built-in notice shown when no caller-supplied fallback exists.
pub const FALLBACK_NOTICE: &str =
    "3D content is unavailable. This might be due to graphics compatibility \
     or performance restrictions.";

/// Failure boundary for one surface: a two-state machine, Healthy or
/// Failed with the captured error.
///
/// A trip captures the first error and logs it for diagnostics; the error
/// text is never shown to the user directly. The only way back to Healthy
/// is an explicit `retry`, which clears the captured error so a remounted
/// subtree starts fresh.
#[derive(Debug, Default)]
pub struct FailureBoundary {
    failure: Option<String>,
}

impl FailureBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Transition Healthy -> Failed, capturing and logging the error.
    /// A trip while already failed keeps the original error.
    pub fn trip(&mut self, error: impl Display) {
        if self.failure.is_some() {
            tracing::debug!(%error, "boundary already tripped, keeping first error");
            return;
        }
        tracing::error!(%error, "surface failure caught at boundary");
        self.failure = Some(error.to_string());
    }

    /// Explicit user retry: Failed -> Healthy, clearing the captured
    /// error. Returns whether a transition happened.
    pub fn retry(&mut self) -> bool {
        if self.failure.take().is_some() {
            tracing::info!("boundary reset by user retry");
            true
        } else {
            false
        }
    }

    /// Captured error text, if failed. Diagnostic only.
    pub fn message(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}
