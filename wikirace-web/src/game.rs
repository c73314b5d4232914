//! Web-specific engine wiring
//!
//! Implements the core crate's platform seams on browser APIs and
//! re-exports the core game types for the UI modules.

pub use wikirace_game::{Clock, KeyValueStorage, RaceEngine, StorageError};

// Re-export all types from wikirace-game
pub use wikirace_game::*;

use crate::dom;
use crate::wiki::WikiClient;

/// Durable storage on browser `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebStorage;

impl KeyValueStorage for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = dom::local_storage()
            .map_err(|err| StorageError::Backend(dom::js_error_message(&err)))?;
        storage
            .get_item(key)
            .map_err(|err| StorageError::Backend(dom::js_error_message(&err)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = dom::local_storage()
            .map_err(|err| StorageError::Backend(dom::js_error_message(&err)))?;
        storage
            .set_item(key, value)
            .map_err(|err| StorageError::Backend(dom::js_error_message(&err)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = dom::local_storage()
            .map_err(|err| StorageError::Backend(dom::js_error_message(&err)))?;
        storage
            .remove_item(key)
            .map_err(|err| StorageError::Backend(dom::js_error_message(&err)))
    }
}

/// Wall clock on `js_sys::Date`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebClock;

impl Clock for WebClock {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn now_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn date_key(&self) -> String {
        let date = js_sys::Date::new_0();
        // Local calendar date; months are zero-based on the JS side.
        format!(
            "{:04}-{:02}-{:02}",
            date.get_full_year(),
            date.get_month() + 1,
            date.get_date()
        )
    }
}

/// The engine type every UI module works against.
pub type WebRaceEngine = RaceEngine<WikiClient, WebStorage, WebClock>;

/// Create the browser engine with live Wikipedia, localStorage and Date.
#[must_use]
pub fn create_web_engine() -> WebRaceEngine {
    RaceEngine::new(WikiClient::new(), WebStorage, WebClock)
}
