//! Race session state machine
//!
//! One session is one race attempt: `setup → playing → completed | failed`.
//! Terminal states only end through an explicit [`RaceSession::reset`],
//! which replaces the session value outright. Navigation resolutions run
//! against the content provider; a resolution that outlives the session it
//! was issued for (reset or give-up raced it) is discarded, never applied.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::article::Article;
use crate::clock::Clock;
use crate::provider::ContentProvider;
use crate::result::RaceResult;

/// Lifecycle of a single race attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RaceStatus {
    #[default]
    Setup,
    Playing,
    Completed,
    Failed,
}

impl RaceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Playing => "playing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Completed and failed sessions only end through a reset.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for RaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one race attempt.
///
/// `path` is chronological and append-only; `path.len() == click_count + 1`
/// holds after every transition once the session is out of setup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceState {
    pub status: RaceStatus,
    pub start_article: Option<Article>,
    pub end_article: Option<Article>,
    pub current_article: Option<Article>,
    pub path: Vec<Article>,
    pub start_time: Option<u64>,
    pub end_time: Option<u64>,
    pub click_count: u32,
}

impl RaceState {
    /// Elapsed race time in milliseconds, frozen once the session ends.
    #[must_use]
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        let Some(start) = self.start_time else {
            return 0;
        };
        self.end_time.unwrap_or(now_ms).saturating_sub(start)
    }
}

/// Why a start request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StartError {
    #[error("start and goal must be different articles")]
    SameArticle,
    #[error("previous race has not been reset")]
    SessionOver,
}

/// What a single link activation did to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    /// Session is not playing; the click was refused untouched.
    Ignored,
    /// Another resolution is already outstanding for this session.
    Busy,
    /// The provider could not resolve the title; nothing changed.
    Unresolved,
    /// The resolution raced a reset or give-up and was dropped.
    Stale,
    /// Moved to a new article; the race continues.
    Moved,
    /// The goal was reached. Carries the once-only result.
    Finished(RaceResult),
}

/// Tag binding an in-flight resolution to the session generation it was
/// issued against. Resets and give-ups advance the generation, so a stale
/// ticket can never mutate a successor session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationTicket {
    generation: u64,
}

/// State machine driving one race attempt.
#[derive(Debug, Clone, Default)]
pub struct RaceSession {
    state: RaceState,
    generation: u64,
    pending: bool,
}

impl RaceSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &RaceState {
        &self.state
    }

    #[must_use]
    pub const fn status(&self) -> RaceStatus {
        self.state.status
    }

    /// Begin a race from `start` toward `end`.
    ///
    /// The start article is enriched with a provider summary when one is
    /// available; otherwise the caller-supplied value stands so the
    /// transition never blocks on the network. A start request against an
    /// already-playing session is a no-op and leaves the path untouched.
    ///
    /// # Errors
    ///
    /// Refuses a pair sharing one numeric id, and any start before a
    /// finished session has been reset.
    pub async fn start(
        &mut self,
        provider: &impl ContentProvider,
        clock: &impl Clock,
        start: Article,
        end: Article,
    ) -> Result<(), StartError> {
        if self.state.status == RaceStatus::Playing {
            return Ok(());
        }
        if self.state.status.is_terminal() {
            return Err(StartError::SessionOver);
        }
        if start.pageid == end.pageid {
            return Err(StartError::SameArticle);
        }

        let enriched = match provider.summary(&start.title).await {
            Ok(article) => article,
            Err(err) => {
                log::debug!("start summary unavailable, using caller value: {err}");
                start
            }
        };

        self.generation = self.generation.wrapping_add(1);
        self.pending = false;
        self.state = RaceState {
            status: RaceStatus::Playing,
            start_article: Some(enriched.clone()),
            end_article: Some(end),
            current_article: Some(enriched.clone()),
            path: vec![enriched],
            start_time: Some(clock.now_ms()),
            end_time: None,
            click_count: 0,
        };
        Ok(())
    }

    /// Reserve the session for one navigation resolution.
    ///
    /// Returns `None` unless the session is playing and no other resolution
    /// is outstanding. The ticket must be settled with
    /// [`Self::apply_navigation`].
    pub fn begin_navigation(&mut self) -> Option<NavigationTicket> {
        if self.state.status != RaceStatus::Playing || self.pending {
            return None;
        }
        self.pending = true;
        Some(NavigationTicket {
            generation: self.generation,
        })
    }

    /// Fold a settled resolution into the session.
    ///
    /// `resolved` is `None` when the provider failed; the click is then
    /// discarded with no partial mutation. A ticket from a superseded
    /// generation is dropped outright.
    pub fn apply_navigation(
        &mut self,
        ticket: NavigationTicket,
        resolved: Option<Article>,
        now_ms: u64,
    ) -> NavigationOutcome {
        if ticket.generation != self.generation {
            return NavigationOutcome::Stale;
        }
        self.pending = false;
        if self.state.status != RaceStatus::Playing {
            return NavigationOutcome::Ignored;
        }
        let Some(article) = resolved else {
            return NavigationOutcome::Unresolved;
        };

        // Click count and path advance together, or not at all.
        self.state.click_count += 1;
        self.state.path.push(article.clone());
        let reached = self
            .state
            .end_article
            .as_ref()
            .is_some_and(|end| end.title == article.title);
        self.state.current_article = Some(article);

        if reached {
            self.state.status = RaceStatus::Completed;
            self.state.end_time = Some(now_ms);
            NavigationOutcome::Finished(self.finished_result(now_ms))
        } else {
            NavigationOutcome::Moved
        }
    }

    /// Resolve `title` through the provider and fold it into the session.
    pub async fn navigate(
        &mut self,
        provider: &impl ContentProvider,
        clock: &impl Clock,
        title: &str,
    ) -> NavigationOutcome {
        if self.state.status != RaceStatus::Playing {
            return NavigationOutcome::Ignored;
        }
        let Some(ticket) = self.begin_navigation() else {
            return NavigationOutcome::Busy;
        };
        let resolved = match provider.summary(title).await {
            Ok(article) => Some(article),
            Err(err) => {
                log::debug!("navigation to {title:?} failed to resolve: {err}");
                None
            }
        };
        self.apply_navigation(ticket, resolved, clock.now_ms())
    }

    /// Abandon the race. Failed runs are not ranked results.
    pub fn give_up(&mut self, now_ms: u64) {
        if self.state.status != RaceStatus::Playing {
            return;
        }
        self.generation = self.generation.wrapping_add(1);
        self.pending = false;
        self.state.status = RaceStatus::Failed;
        self.state.end_time = Some(now_ms);
    }

    /// Discard the session unconditionally and return to setup.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = false;
        self.state = RaceState::default();
    }

    fn finished_result(&self, now_ms: u64) -> RaceResult {
        RaceResult {
            duration_ms: self.state.elapsed_ms(now_ms),
            click_count: self.state.click_count,
            path_length: self.state.path.len(),
            articles_visited: self
                .state
                .path
                .iter()
                .map(|article| article.title.clone())
                .collect(),
        }
    }
}
