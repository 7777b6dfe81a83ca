//! End-of-game notification
//!
//! The host may want to tell the player (or an embedding app) that the run is
//! over. Delivery is best effort: a failing notifier is logged and ignored.

use core::fmt;

/// Why a notification could not be delivered
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotifyError {
    /// The collaborator is not present in this host
    Unavailable,
    /// The collaborator exists but refused or threw
    Rejected(String),
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "notification target unavailable"),
            Self::Rejected(reason) => write!(f, "notification rejected: {reason}"),
        }
    }
}

impl std::error::Error for NotifyError {}

/// Receives the final score once per finished run.
///
/// Implementations must return promptly; the frame loop waits for the call.
pub trait GameOverNotifier {
    fn notify_game_over(&mut self, score: u32) -> Result<(), NotifyError>;
}

/// Default: nobody is listening
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl GameOverNotifier for NoopNotifier {
    fn notify_game_over(&mut self, _score: u32) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Writes the result to the log (native demo)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl GameOverNotifier for LogNotifier {
    fn notify_game_over(&mut self, score: u32) -> Result<(), NotifyError> {
        log::info!("Game over! Score: {}", score);
        Ok(())
    }
}

impl<N: GameOverNotifier + ?Sized> GameOverNotifier for Box<N> {
    fn notify_game_over(&mut self, score: u32) -> Result<(), NotifyError> {
        (**self).notify_game_over(score)
    }
}
