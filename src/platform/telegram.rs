//! Telegram WebApp alert
//!
//! When the game runs inside a Telegram Mini App the host exposes
//! `Telegram.WebApp.showAlert`. Anywhere else the bridge reports
//! `Unavailable`.

use wasm_bindgen::prelude::*;

use super::notify::{GameOverNotifier, NotifyError};

#[wasm_bindgen(inline_js = "
    export function telegram_show_alert(message) {
        const tg = window.Telegram;
        const webApp = tg && tg.WebApp;
        if (!webApp || typeof webApp.showAlert !== 'function') {
            return false;
        }
        webApp.showAlert(message);
        return true;
    }
")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn telegram_show_alert(message: &str) -> Result<bool, JsValue>;
}

/// Shows "Game over" through the Telegram WebApp alert dialog
#[derive(Debug, Clone, Copy, Default)]
pub struct TelegramNotifier;

impl GameOverNotifier for TelegramNotifier {
    fn notify_game_over(&mut self, score: u32) -> Result<(), NotifyError> {
        let message = format!("Game over! Score: {}", score);
        match telegram_show_alert(&message) {
            Ok(true) => Ok(()),
            Ok(false) => Err(NotifyError::Unavailable),
            Err(err) => Err(NotifyError::Rejected(format!("{:?}", err))),
        }
    }
}
