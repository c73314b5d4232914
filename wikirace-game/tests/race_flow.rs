//! End-to-end race flows against fixture provider, storage and clock.

use async_trait::async_trait;
use futures::executor::block_on;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use wikirace_game::{
    Article, ClickOutcome, ContentProvider, ManualClock, MemoryStorage, NavigationOutcome,
    PageContent, ProviderError, ProviderResult, RaceEngine, RaceStatus, SearchHit,
};

#[derive(Default)]
struct FixtureProvider {
    pages: HashMap<String, Article>,
    randoms: RefCell<VecDeque<Article>>,
}

impl FixtureProvider {
    fn with_pages(pages: &[(&str, u64)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(title, id)| ((*title).to_string(), Article::new(*title, *id)))
                .collect(),
            randoms: RefCell::new(VecDeque::new()),
        }
    }

    fn queue_randoms(mut self, titles: &[(&str, u64)]) -> Self {
        self.randoms = RefCell::new(
            titles
                .iter()
                .map(|(title, id)| Article::new(*title, *id))
                .collect(),
        );
        self
    }
}

#[async_trait(?Send)]
impl ContentProvider for FixtureProvider {
    async fn search(&self, query: &str, limit: u32) -> ProviderResult<Vec<SearchHit>> {
        Ok(self
            .pages
            .values()
            .filter(|article| article.title.contains(query))
            .take(limit as usize)
            .map(|article| SearchHit {
                title: article.title.clone(),
                pageid: article.pageid,
                extract: String::new(),
            })
            .collect())
    }

    async fn random_article(&self) -> ProviderResult<Article> {
        self.randoms
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| ProviderError::Network("random pool exhausted".to_string()))
    }

    async fn summary(&self, title: &str) -> ProviderResult<Article> {
        self.pages
            .get(title)
            .cloned()
            .ok_or_else(|| ProviderError::Missing(title.to_string()))
    }

    async fn content(&self, title: &str) -> ProviderResult<PageContent> {
        Err(ProviderError::Missing(title.to_string()))
    }
}

fn engine(
    pages: &[(&str, u64)],
) -> RaceEngine<FixtureProvider, MemoryStorage, ManualClock> {
    RaceEngine::new(
        FixtureProvider::with_pages(pages),
        MemoryStorage::new(),
        ManualClock::new(10_000, "2026-08-07"),
    )
}

#[test]
fn one_click_race_yields_consistent_result_and_ranking() {
    let mut engine = engine(&[("A", 1), ("B", 2)]);
    block_on(engine.start_race(Article::new("A", 1), Article::new("B", 2))).unwrap();

    let outcome = block_on(engine.click_link("/wiki/B"));
    let ClickOutcome::Session(NavigationOutcome::Finished(result)) = outcome else {
        panic!("expected finished race, got {outcome:?}");
    };

    assert_eq!(result.click_count, 1);
    assert_eq!(result.path_length, 2);
    assert_eq!(result.articles_visited, vec!["A", "B"]);
    let state = engine.state();
    assert_eq!(
        result.duration_ms,
        state.end_time.unwrap() - state.start_time.unwrap()
    );

    let top = engine.leaderboard().top(1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].stats, result);
}

#[test]
fn lockstep_holds_across_a_longer_race() {
    let mut engine = engine(&[("A", 1), ("B", 2), ("C", 3), ("D", 4)]);
    block_on(engine.start_race(Article::new("A", 1), Article::new("D", 4))).unwrap();

    for (hop, href) in ["/wiki/B", "/wiki/C", "/wiki/Missing", "/wiki/D"]
        .iter()
        .enumerate()
    {
        let _ = block_on(engine.click_link(href));
        let state = engine.state();
        assert_eq!(
            state.path.len(),
            state.click_count as usize + 1,
            "lockstep broken after hop {hop}"
        );
    }
    assert_eq!(engine.status(), RaceStatus::Completed);
    // The unresolved hop was discarded entirely.
    assert_eq!(engine.state().click_count, 3);
}

#[test]
fn give_up_leaves_no_ranked_trace() {
    let mut engine = engine(&[("A", 1), ("B", 2)]);
    block_on(engine.start_race(Article::new("A", 1), Article::new("B", 2))).unwrap();
    engine.give_up();

    assert_eq!(engine.status(), RaceStatus::Failed);
    assert!(engine.state().end_time.is_some());
    assert!(engine.leaderboard().is_empty());

    // Terminal state refuses navigation until a reset.
    let outcome = block_on(engine.click_link("/wiki/B"));
    assert_eq!(
        outcome,
        ClickOutcome::Session(NavigationOutcome::Ignored)
    );
    engine.play_again();
    assert_eq!(engine.status(), RaceStatus::Setup);
}

#[test]
fn daily_round_trip_records_only_the_best_run() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(10_000, "2026-08-07");
    let provider = FixtureProvider::with_pages(&[("Alpha", 1), ("Beta", 2)])
        .queue_randoms(&[("Alpha", 1), ("Beta", 2)]);
    let mut engine = RaceEngine::new(provider, storage, clock.clone());

    let challenge = block_on(engine.refresh_daily()).expect("generated");
    let user = engine.register("Ada").expect("registered");

    // First run: 30 seconds.
    block_on(engine.start_race(challenge.start_article.clone(), challenge.end_article.clone()))
        .unwrap();
    clock.advance(30_000);
    block_on(engine.click_link("/wiki/Beta"));
    engine.play_again();

    // Second run: slower; the best must not regress.
    block_on(engine.start_race(challenge.start_article.clone(), challenge.end_article.clone()))
        .unwrap();
    clock.advance(55_000);
    block_on(engine.click_link("/wiki/Beta"));

    let completion = engine.daily().completion_for(&user.id).expect("recorded");
    assert_eq!(completion.best_time, Some(30_000));

    // Both completed runs are ranked.
    assert_eq!(engine.leaderboard().entries().len(), 2);
}

#[test]
fn same_day_refresh_is_stable_and_a_new_day_regenerates() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(0, "2026-08-07");
    let provider = FixtureProvider::default()
        .queue_randoms(&[("Alpha", 1), ("Beta", 2), ("Gamma", 3), ("Delta", 4)]);
    let mut engine = RaceEngine::new(provider, storage, clock.clone());

    let first = block_on(engine.refresh_daily()).expect("generated");
    let again = block_on(engine.refresh_daily()).expect("still active");
    assert_eq!(first, again);

    clock.set_date_key("2026-08-08");
    let next = block_on(engine.refresh_daily()).expect("regenerated");
    assert_ne!(first.date, next.date);
}

#[test]
fn registering_twice_keeps_one_identity() {
    let mut engine = engine(&[]);
    let first = engine.register("Ada").unwrap();
    let second = engine.register("aDa").unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(engine.users().list_all().len(), 1);

    engine.logout();
    assert!(engine.users().current().is_none());
    assert_eq!(engine.users().list_all().len(), 1);
}
