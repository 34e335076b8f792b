use thiserror::Error;

/// Precondition failures reported before any randomness is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    #[error("need at least 2 participants (found {found})")]
    InsufficientParticipants { found: usize },
    #[error("need at least 1 gift")]
    InsufficientGifts,
}
