//! Wikirace Game Engine
//!
//! Platform-agnostic core logic for Wikirace, the race between two
//! encyclopedia articles played by clicking only in-content hyperlinks.
//! This crate owns the session state machine, the link legality rules and
//! the three durable record stores; platform crates supply the network,
//! storage and clock implementations.

pub mod article;
pub mod clock;
pub mod daily;
pub mod leaderboard;
pub mod links;
pub mod provider;
pub mod result;
pub mod session;
pub mod storage;
pub mod users;

// Re-export commonly used types
pub use article::{Article, PageContent, SearchHit};
pub use clock::{Clock, ManualClock};
pub use daily::{DailyChallenge, DailyChallengeStore, UserCompletion};
pub use leaderboard::{Leaderboard, LeaderboardEntry, MAX_ENTRIES};
pub use links::{ClassifiedLink, classify};
pub use provider::{ContentProvider, ProviderError, ProviderResult};
pub use result::{RaceResult, format_duration};
pub use session::{
    NavigationOutcome, NavigationTicket, RaceSession, RaceState, RaceStatus, StartError,
};
pub use storage::{KeyValueStorage, MemoryStorage, StorageError};
pub use users::{User, UserRegistry};

/// What a single rendered-link activation amounted to.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// The href failed classification; no navigation was attempted.
    RejectedLink,
    /// The href was a legal move; carries what the session did with it.
    Session(NavigationOutcome),
}

/// Composition root owning the session and the three record stores.
///
/// All mutable game state lives here and is threaded explicitly; there are
/// no module-level singletons. Generic over the platform seams so the same
/// engine drives the browser frontend and native tests.
#[derive(Clone)]
pub struct RaceEngine<P, S, C>
where
    P: ContentProvider,
    S: KeyValueStorage,
    C: Clock,
{
    provider: P,
    storage: S,
    clock: C,
    session: RaceSession,
    leaderboard: Leaderboard,
    daily: DailyChallengeStore,
    users: UserRegistry,
}

impl<P, S, C> RaceEngine<P, S, C>
where
    P: ContentProvider,
    S: KeyValueStorage,
    C: Clock,
{
    /// Build an engine, loading every durable store from `storage`.
    pub fn new(provider: P, storage: S, clock: C) -> Self {
        let leaderboard = Leaderboard::load(&storage);
        let daily = DailyChallengeStore::load(&storage, &clock);
        let users = UserRegistry::load(&storage);
        Self {
            provider,
            storage,
            clock,
            session: RaceSession::new(),
            leaderboard,
            daily,
            users,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &RaceState {
        self.session.state()
    }

    #[must_use]
    pub const fn status(&self) -> RaceStatus {
        self.session.status()
    }

    #[must_use]
    pub const fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    #[must_use]
    pub const fn daily(&self) -> &DailyChallengeStore {
        &self.daily
    }

    #[must_use]
    pub const fn users(&self) -> &UserRegistry {
        &self.users
    }

    /// Begin a race between two distinct articles.
    ///
    /// # Errors
    ///
    /// Refuses a pair sharing one numeric id, and any start before a
    /// finished session has been reset.
    pub async fn start_race(&mut self, start: Article, end: Article) -> Result<(), StartError> {
        self.session
            .start(&self.provider, &self.clock, start, end)
            .await
    }

    /// Fold one rendered-link activation into the game.
    ///
    /// The href is classified first; only a legal article link reaches the
    /// session. A finished race is recorded on the leaderboard and, when
    /// the pair matches the active daily challenge and a user is signed
    /// in, against that user's daily record.
    pub async fn click_link(&mut self, href: &str) -> ClickOutcome {
        let link = links::classify(href);
        let Some(title) = link.title else {
            return ClickOutcome::RejectedLink;
        };
        ClickOutcome::Session(self.navigate_to(&title).await)
    }

    /// Navigate to a title the rendering surface already recovered through
    /// the classifier. Same recording rules as [`Self::click_link`].
    pub async fn navigate_to(&mut self, title: &str) -> NavigationOutcome {
        let outcome = self
            .session
            .navigate(&self.provider, &self.clock, title)
            .await;
        if let NavigationOutcome::Finished(result) = &outcome {
            let result = result.clone();
            self.record_finish(&result);
        }
        outcome
    }

    /// Abandon the current race; failed runs are never ranked.
    pub fn give_up(&mut self) {
        let now = self.clock.now_ms();
        self.session.give_up(now);
    }

    /// Discard the session and return to setup.
    pub fn play_again(&mut self) {
        self.session.reset();
    }

    /// Ensure today's daily challenge is active; see
    /// [`DailyChallengeStore::refresh`].
    pub async fn refresh_daily(&mut self) -> Option<DailyChallenge> {
        self.daily
            .refresh(&self.provider, &self.storage, &self.clock)
            .await
            .cloned()
    }

    /// Register a username or sign its owner back in.
    pub fn register(&mut self, username: &str) -> Option<User> {
        let now = self.clock.now_ms();
        self.users.register(&self.storage, now, username)
    }

    /// Sign the current user out without touching the registry.
    pub fn logout(&mut self) {
        self.users.logout(&self.storage);
    }

    /// Drop every leaderboard entry, durable record included.
    pub fn clear_leaderboard(&mut self) {
        self.leaderboard.clear(&self.storage);
    }

    fn record_finish(&mut self, result: &RaceResult) {
        let state = self.session.state();
        let (Some(start), Some(end)) = (state.start_article.as_ref(), state.end_article.as_ref())
        else {
            return;
        };
        let start_title = start.title.clone();
        let end_title = end.title.clone();

        let now = self.clock.now_ms();
        self.leaderboard
            .add_entry(&self.storage, now, &start_title, &end_title, result.clone());

        let is_daily = self
            .daily
            .active()
            .is_some_and(|challenge| challenge.matches_pair(&start_title, &end_title));
        if is_daily {
            if let Some(user_id) = self.users.current().map(|user| user.id.clone()) {
                self.daily.record_completion(
                    &self.storage,
                    &user_id,
                    result.duration_ms,
                    result.click_count,
                );
            }
        }
    }
}
