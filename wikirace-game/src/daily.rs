//! Daily challenge store
//!
//! Exactly one start/goal pair is active per calendar day. A new day
//! supersedes the previous record; per-user bests only ever improve, and
//! that guard lives here, not in callers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::article::Article;
use crate::clock::Clock;
use crate::provider::ContentProvider;
use crate::storage::{DAILY_RACE_KEY, KeyValueStorage, load_json_or_default, save_json};

/// A user's standing against the active challenge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCompletion {
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_clicks: Option<u32>,
}

/// The shared start/goal pair for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallenge {
    /// `YYYY-MM-DD` key the challenge was generated for.
    pub date: String,
    pub start_article: Article,
    pub end_article: Article,
    /// Keyed by user id. Earlier records may lack this field entirely.
    #[serde(default)]
    pub user_completions: HashMap<String, UserCompletion>,
}

impl DailyChallenge {
    /// Whether a finished race ran exactly this challenge's pair.
    #[must_use]
    pub fn matches_pair(&self, start_title: &str, end_title: &str) -> bool {
        self.start_article.title == start_title && self.end_article.title == end_title
    }
}

/// Store managing the single active challenge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyChallengeStore {
    active: Option<DailyChallenge>,
}

impl DailyChallengeStore {
    /// Adopt the stored challenge if it belongs to today; otherwise start
    /// with no active challenge (generation happens in [`Self::refresh`]).
    #[must_use]
    pub fn load(storage: &impl KeyValueStorage, clock: &impl Clock) -> Self {
        let stored: Option<DailyChallenge> = load_json_or_default(storage, DAILY_RACE_KEY);
        let today = clock.date_key();
        Self {
            active: stored.filter(|challenge| challenge.date == today),
        }
    }

    /// The challenge for today, if one is known.
    #[must_use]
    pub const fn active(&self) -> Option<&DailyChallenge> {
        self.active.as_ref()
    }

    /// Ensure today's challenge is active, generating one if the stored
    /// record belongs to a prior day.
    ///
    /// Same-day calls never regenerate the puzzle. When generation fails
    /// (provider unavailable), no challenge becomes active and the stored
    /// record is left untouched; callers must treat that as a displayable
    /// state rather than an error.
    pub async fn refresh(
        &mut self,
        provider: &impl ContentProvider,
        storage: &impl KeyValueStorage,
        clock: &impl Clock,
    ) -> Option<&DailyChallenge> {
        let today = clock.date_key();
        if self
            .active
            .as_ref()
            .is_some_and(|challenge| challenge.date == today)
        {
            return self.active.as_ref();
        }

        let stored: Option<DailyChallenge> = load_json_or_default(storage, DAILY_RACE_KEY);
        if let Some(challenge) = stored.filter(|challenge| challenge.date == today) {
            self.active = Some(challenge);
            return self.active.as_ref();
        }

        let start = match provider.random_article().await {
            Ok(article) => article,
            Err(err) => {
                log::warn!("daily challenge generation failed: {err}");
                self.active = None;
                return None;
            }
        };
        let end = match provider.random_article().await {
            Ok(article) => article,
            Err(err) => {
                log::warn!("daily challenge generation failed: {err}");
                self.active = None;
                return None;
            }
        };

        // Enrich both endpoints; either falls back to the bare article.
        let start = provider.summary(&start.title).await.unwrap_or(start);
        let end = provider.summary(&end.title).await.unwrap_or(end);

        let challenge = DailyChallenge {
            date: today,
            start_article: start,
            end_article: end,
            user_completions: HashMap::new(),
        };
        if let Err(err) = save_json(storage, DAILY_RACE_KEY, &challenge) {
            log::warn!("failed to save daily challenge: {err}");
        }
        self.active = Some(challenge);
        self.active.as_ref()
    }

    /// Record a user's completion of the active challenge.
    ///
    /// Bests are overwritten only by a strictly lower duration; a worse
    /// rerun never regresses an existing record.
    pub fn record_completion(
        &mut self,
        storage: &impl KeyValueStorage,
        user_id: &str,
        duration_ms: u64,
        click_count: u32,
    ) {
        let Some(challenge) = self.active.as_mut() else {
            return;
        };
        let completion = challenge
            .user_completions
            .entry(user_id.to_string())
            .or_default();
        completion.completed = true;
        let improved = completion
            .best_time
            .is_none_or(|best| duration_ms < best);
        if improved {
            completion.best_time = Some(duration_ms);
            completion.best_clicks = Some(click_count);
        }
        if let Err(err) = save_json(storage, DAILY_RACE_KEY, challenge) {
            log::warn!("failed to save daily challenge: {err}");
        }
    }

    /// The user's standing against the active challenge, if any.
    #[must_use]
    pub fn completion_for(&self, user_id: &str) -> Option<&UserCompletion> {
        self.active
            .as_ref()
            .and_then(|challenge| challenge.user_completions.get(user_id))
    }
}
