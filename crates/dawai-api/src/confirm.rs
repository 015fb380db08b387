//! Destructive-action confirmation contract
//!
//! Deletion is gated on an interactive prompt owned by the GUI layer. The
//! store only sees the discrete outcome; anything other than an explicit
//! confirmation cancels the deletion.

use dawai_util::InvoiceId;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Outcome of a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The user explicitly chose to proceed
    Confirmed,
    /// The user chose the cancel option (the prompt's safe default)
    Cancelled,
    /// The prompt was dismissed without a choice; treated like a cancel
    Dismissed,
}

impl ConfirmOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ConfirmOutcome::Confirmed)
    }
}

/// Interactive confirmation capability provided by the GUI layer.
///
/// Implementations block until the user answers (a modal dialog in the real
/// application). The prompt must offer at least a proceed and a cancel
/// option, with cancel as the default.
pub trait ConfirmationGate: Send + Sync {
    fn confirm_delete(&self, id: &InvoiceId) -> ConfirmOutcome;
}

/// Scripted confirmation gate for unit/integration testing.
pub struct MockGate {
    outcome: Mutex<ConfirmOutcome>,
    prompt_count: AtomicU64,
}

impl MockGate {
    pub fn new(outcome: ConfirmOutcome) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            prompt_count: AtomicU64::new(0),
        }
    }

    /// Gate that confirms every prompt
    pub fn confirming() -> Self {
        Self::new(ConfirmOutcome::Confirmed)
    }

    /// Gate that cancels every prompt
    pub fn cancelling() -> Self {
        Self::new(ConfirmOutcome::Cancelled)
    }

    /// Change the scripted outcome
    pub fn set_outcome(&self, outcome: ConfirmOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    /// Number of times the gate was consulted
    pub fn prompt_count(&self) -> u64 {
        self.prompt_count.load(Ordering::SeqCst)
    }
}

impl Default for MockGate {
    fn default() -> Self {
        Self::confirming()
    }
}

impl ConfirmationGate for MockGate {
    fn confirm_delete(&self, _id: &InvoiceId) -> ConfirmOutcome {
        self.prompt_count.fetch_add(1, Ordering::SeqCst);
        *self.outcome.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismissal_is_not_confirmation() {
        assert!(ConfirmOutcome::Confirmed.is_confirmed());
        assert!(!ConfirmOutcome::Cancelled.is_confirmed());
        assert!(!ConfirmOutcome::Dismissed.is_confirmed());
    }

    #[test]
    fn mock_gate_counts_prompts() {
        let gate = MockGate::cancelling();
        let id = InvoiceId::new("invoice-1");

        assert_eq!(gate.prompt_count(), 0);
        assert_eq!(gate.confirm_delete(&id), ConfirmOutcome::Cancelled);
        assert_eq!(gate.confirm_delete(&id), ConfirmOutcome::Cancelled);
        assert_eq!(gate.prompt_count(), 2);

        gate.set_outcome(ConfirmOutcome::Confirmed);
        assert_eq!(gate.confirm_delete(&id), ConfirmOutcome::Confirmed);
        assert_eq!(gate.prompt_count(), 3);
    }
}
