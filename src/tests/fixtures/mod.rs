// Shared fixtures for crate-internal tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::modules::classes::core::class::{Class, NewClass};
use crate::modules::classes::core::ports::ClassRepository;
use crate::modules::study_sessions::core::ports::StudySessionStore;
use crate::modules::study_sessions::core::session::StudySession;
use crate::modules::users::core::ports::UserRepository;
use crate::modules::users::core::user::{NewUser, User};
use crate::shared::core::clock::ManualClock;
use crate::shared::core::primitives::{ClassId, UserId};
use crate::shared::infrastructure::store::in_memory::InMemoryStore;
use crate::shell::state::AppState;

pub mod commands {
    pub mod record_study_session;
}

/// Wednesday 2025-06-04 10:00 UTC, inside the week of Monday 2025-06-02.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 4, 10, 0, 0).unwrap()
}

pub fn new_user(username: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        created_at: fixed_now(),
    }
}

pub fn class_owned_by(class_id: ClassId, user_id: UserId) -> Class {
    Class {
        id: class_id,
        user_id,
        name: "Calculus".to_string(),
        created_at: fixed_now(),
    }
}

pub struct Seed {
    pub ada: User,
    pub grace: User,
    pub ada_class: Class,
    pub ada_second_class: Class,
    pub grace_class: Class,
}

async fn class(store: &InMemoryStore, user_id: UserId, name: &str) -> Class {
    store
        .create_class(NewClass {
            user_id,
            name: name.to_string(),
            created_at: fixed_now(),
        })
        .await
        .unwrap()
}

/// Two users, ada with two classes and grace with one.
pub async fn seeded_store() -> (Arc<InMemoryStore>, Seed) {
    let store = InMemoryStore::new();
    let ada = store.create_user(new_user("ada")).await.unwrap();
    let grace = store.create_user(new_user("grace")).await.unwrap();
    let ada_class = class(&store, ada.id, "Calculus").await;
    let ada_second_class = class(&store, ada.id, "Physics").await;
    let grace_class = class(&store, grace.id, "Biology").await;
    (
        Arc::new(store),
        Seed {
            ada,
            grace,
            ada_class,
            ada_second_class,
            grace_class,
        },
    )
}

/// Inserts a session directly, skipping the ownership check.
pub async fn record(store: &InMemoryStore, user_id: UserId, class_id: ClassId, seconds: u64, week: &str) {
    store
        .insert_session(StudySession {
            id: Uuid::now_v7(),
            user_id,
            class_id,
            seconds,
            week_start: week.parse().unwrap(),
            created_at: fixed_now(),
        })
        .await
        .unwrap();
}

/// Seeded state with the clock pinned to `fixed_now`.
pub async fn seeded_state() -> (AppState, Arc<InMemoryStore>, Seed) {
    let (store, seed) = seeded_store().await;
    let clock = Arc::new(ManualClock::new(fixed_now()));
    (AppState::new(store.clone(), clock, 100), store, seed)
}

pub fn offline_state() -> AppState {
    let mut store = InMemoryStore::new();
    store.toggle_offline();
    AppState::new(Arc::new(store), Arc::new(ManualClock::new(fixed_now())), 100)
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
