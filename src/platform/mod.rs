//! Platform abstraction layer
//!
//! Handles host differences for:
//! - End-of-game notification (Telegram WebApp alert on web, log on native)

pub mod notify;
#[cfg(target_arch = "wasm32")]
pub mod telegram;

pub use notify::{GameOverNotifier, LogNotifier, NoopNotifier, NotifyError};
#[cfg(target_arch = "wasm32")]
pub use telegram::TelegramNotifier;
