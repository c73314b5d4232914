//! Persisted record shapes and corruption tolerance.
//!
//! The durable records keep the field names of the original web app, so a
//! profile written by an earlier build keeps working.

use serde_json::Value;

use wikirace_game::storage::{
    CURRENT_USER_KEY, DAILY_RACE_KEY, LEADERBOARD_KEY, USERS_KEY, KeyValueStorage,
};
use wikirace_game::{
    Article, DailyChallengeStore, Leaderboard, ManualClock, MemoryStorage, RaceResult,
    UserRegistry,
};

fn stored_json(storage: &MemoryStorage, key: &str) -> Value {
    let text = storage.get(key).unwrap().expect("record present");
    serde_json::from_str(&text).expect("record is JSON")
}

fn sample_stats() -> RaceResult {
    RaceResult {
        duration_ms: 45_000,
        click_count: 3,
        path_length: 4,
        articles_visited: vec!["A".to_string(), "B".to_string()],
    }
}

#[test]
fn leaderboard_record_keeps_original_field_names() {
    let storage = MemoryStorage::new();
    let mut board = Leaderboard::default();
    board.add_entry(&storage, 1_700, "Alpha", "Beta", sample_stats());

    let value = stored_json(&storage, LEADERBOARD_KEY);
    let entry = value.as_array().unwrap().first().unwrap();
    for key in ["id", "startArticle", "endArticle", "stats", "timestamp"] {
        assert!(entry.get(key).is_some(), "missing {key}");
    }
    let stats = entry.get("stats").unwrap();
    for key in ["duration", "clickCount", "pathLength", "articlesVisited"] {
        assert!(stats.get(key).is_some(), "missing stats.{key}");
    }
    assert_eq!(entry.get("id").unwrap(), "1700");
}

#[test]
fn user_records_keep_original_field_names() {
    let storage = MemoryStorage::new();
    let mut registry = UserRegistry::default();
    registry.register(&storage, 1_700, "Ada").unwrap();

    let users = stored_json(&storage, USERS_KEY);
    let user = users.as_array().unwrap().first().unwrap();
    for key in ["id", "username", "createdAt"] {
        assert!(user.get(key).is_some(), "missing {key}");
    }

    let current = stored_json(&storage, CURRENT_USER_KEY);
    assert_eq!(current.get("username").unwrap(), "Ada");
}

#[test]
fn daily_record_keeps_original_field_names() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(0, "2026-08-07");
    storage
        .set(
            DAILY_RACE_KEY,
            r#"{"date":"2026-08-07","startArticle":{"title":"Alpha","pageid":1},"endArticle":{"title":"Beta","pageid":2},"userCompletions":{}}"#,
        )
        .unwrap();
    let mut store = DailyChallengeStore::load(&storage, &clock);
    store.record_completion(&storage, "u1", 30_000, 4);

    let value = stored_json(&storage, DAILY_RACE_KEY);
    for key in ["date", "startArticle", "endArticle", "userCompletions"] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    let completion = value
        .pointer("/userCompletions/u1")
        .expect("completion recorded");
    for key in ["completed", "bestTime", "bestClicks"] {
        assert!(completion.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn article_optional_fields_are_omitted_when_absent() {
    let text = serde_json::to_string(&Article::new("Alpha", 1)).unwrap();
    assert!(!text.contains("extract"));
    assert!(!text.contains("url"));
}

#[test]
fn every_store_survives_garbage_text() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(0, "2026-08-07");
    for key in [LEADERBOARD_KEY, DAILY_RACE_KEY, USERS_KEY, CURRENT_USER_KEY] {
        storage.set(key, "\u{1F480} definitely not json").unwrap();
    }

    assert!(Leaderboard::load(&storage).is_empty());
    assert!(DailyChallengeStore::load(&storage, &clock).active().is_none());
    let registry = UserRegistry::load(&storage);
    assert!(registry.list_all().is_empty());
    assert!(registry.current().is_none());
}

#[test]
fn daily_record_from_an_older_build_gains_an_empty_completion_map() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(0, "2026-08-07");
    storage
        .set(
            DAILY_RACE_KEY,
            r#"{"date":"2026-08-07","startArticle":{"title":"Alpha","pageid":1},"endArticle":{"title":"Beta","pageid":2}}"#,
        )
        .unwrap();
    let store = DailyChallengeStore::load(&storage, &clock);
    assert!(store.active().unwrap().user_completions.is_empty());
}

#[test]
fn stale_daily_record_is_not_adopted() {
    let storage = MemoryStorage::new();
    let clock = ManualClock::new(0, "2026-08-08");
    storage
        .set(
            DAILY_RACE_KEY,
            r#"{"date":"2026-08-07","startArticle":{"title":"Alpha","pageid":1},"endArticle":{"title":"Beta","pageid":2},"userCompletions":{}}"#,
        )
        .unwrap();
    let store = DailyChallengeStore::load(&storage, &clock);
    assert!(store.active().is_none());
    // The stored record itself is preserved for its own day.
    assert!(storage.get(DAILY_RACE_KEY).unwrap().is_some());
}
