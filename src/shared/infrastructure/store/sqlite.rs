//! SQLite implementation of every repository port.
//!
//! One connection behind a mutex. Every call runs on tokio's blocking pool
//! and never awaits while the lock is held. Timestamps are stored as RFC 3339 text, week starts as
//! `YYYY-MM-DD` and session ids as hyphenated UUIDs.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

use crate::modules::classes::core::class::{Class, NewClass};
use crate::modules::classes::core::ports::ClassRepository;
use crate::modules::feedback::core::feedback::{Feedback, NewFeedback};
use crate::modules::feedback::core::ports::FeedbackRepository;
use crate::modules::study_sessions::core::ports::{StudySessionQueries, StudySessionStore};
use crate::modules::study_sessions::core::session::StudySession;
use crate::modules::users::core::ports::UserRepository;
use crate::modules::users::core::user::{NewUser, User};
use crate::shared::core::primitives::{ClassId, FeedbackId, UserId};
use crate::shared::core::week::WeekStart;
use crate::shared::infrastructure::store::StoreError;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        username    TEXT NOT NULL UNIQUE,
        email       TEXT NOT NULL UNIQUE,
        created_at  TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS classes (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        name        TEXT NOT NULL,
        created_at  TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS study_sessions (
        id          TEXT PRIMARY KEY,
        user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        class_id    INTEGER NOT NULL REFERENCES classes(id) ON DELETE CASCADE,
        seconds     INTEGER NOT NULL CHECK (seconds >= 0),
        week_start  TEXT NOT NULL,
        created_at  TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS feedback (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        content     TEXT NOT NULL,
        upvotes     INTEGER NOT NULL DEFAULT 0,
        created_at  TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS feedback_upvotes (
        feedback_id INTEGER NOT NULL REFERENCES feedback(id) ON DELETE CASCADE,
        user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        PRIMARY KEY (feedback_id, user_id)
    );

    CREATE INDEX IF NOT EXISTS idx_sessions_user_week ON study_sessions(user_id, week_start);
    CREATE INDEX IF NOT EXISTS idx_sessions_class_week ON study_sessions(class_id, week_start);
    CREATE INDEX IF NOT EXISTS idx_classes_user ON classes(user_id);";

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error() {
            Some(e) if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                StoreError::Orphan(err.to_string())
            }
            Some(e)
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                StoreError::Conflict(err.to_string())
            }
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Opens (and creates if needed) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` on the blocking pool so rusqlite never stalls a runtime worker.
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || -> Result<T, StoreError> {
            let mut conn = conn
                .lock()
                .map_err(|_| StoreError::Backend("sqlite connection lock poisoned".to_string()))?;
            Ok(f(&mut conn)?)
        })
        .await
        .map_err(|err| StoreError::Backend(format!("sqlite task failed: {err}")))?
    }
}

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn seconds(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let raw: i64 = row.get(idx)?;
    u64::try_from(raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        created_at: timestamp(row, 3)?,
    })
}

fn class_from_row(row: &Row<'_>) -> rusqlite::Result<Class> {
    Ok(Class {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        created_at: timestamp(row, 3)?,
    })
}

fn feedback_from_row(row: &Row<'_>) -> rusqlite::Result<Feedback> {
    Ok(Feedback {
        id: row.get(0)?,
        user_id: row.get(1)?,
        username: row.get(2)?,
        content: row.get(3)?,
        upvotes: row.get(4)?,
        created_at: timestamp(row, 5)?,
    })
}

const FEEDBACK_SELECT: &str = "
    SELECT f.id, f.user_id, u.username, f.content, f.upvotes, f.created_at
    FROM feedback f JOIN users u ON u.id = f.user_id";

#[async_trait]
impl UserRepository for SqliteStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO users (username, email, created_at) VALUES (?1, ?2, ?3)",
                params![user.username, user.email, user.created_at.to_rfc3339()],
            )?;
            Ok(User {
                id: conn.last_insert_rowid(),
                username: user.username,
                email: user.email,
                created_at: user.created_at,
            })
        })
        .await
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT id, username, email, created_at FROM users WHERE id = ?1",
                params![id],
                user_from_row,
            )
            .optional()
        })
        .await
    }

    async fn usernames(&self, ids: &[UserId]) -> Result<HashMap<UserId, String>, StoreError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let ids = ids.to_vec();
        self.with_conn(move |conn| {
            let placeholders = vec!["?"; ids.len()].join(", ");
            let mut stmt =
                conn.prepare(&format!("SELECT id, username FROM users WHERE id IN ({placeholders})"))?;
            let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
                Ok((row.get::<_, UserId>(0)?, row.get::<_, String>(1)?))
            })?;
            rows.collect()
        })
        .await
    }
}

#[async_trait]
impl ClassRepository for SqliteStore {
    async fn create_class(&self, class: NewClass) -> Result<Class, StoreError> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO classes (user_id, name, created_at) VALUES (?1, ?2, ?3)",
                params![class.user_id, class.name, class.created_at.to_rfc3339()],
            )?;
            Ok(Class {
                id: conn.last_insert_rowid(),
                user_id: class.user_id,
                name: class.name,
                created_at: class.created_at,
            })
        })
        .await
    }

    async fn list_classes(&self, user_id: UserId) -> Result<Vec<Class>, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, name, created_at FROM classes
                 WHERE user_id = ?1
                 ORDER BY created_at DESC, id DESC",
            )?;
            let rows = stmt.query_map(params![user_id], class_from_row)?;
            rows.collect()
        })
        .await
    }

    async fn find_owned_class(
        &self,
        class_id: ClassId,
        user_id: UserId,
    ) -> Result<Option<Class>, StoreError> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT id, user_id, name, created_at FROM classes WHERE id = ?1 AND user_id = ?2",
                params![class_id, user_id],
                class_from_row,
            )
            .optional()
        })
        .await
    }
}

#[async_trait]
impl StudySessionStore for SqliteStore {
    async fn insert_session(&self, session: StudySession) -> Result<(), StoreError> {
        let seconds = i64::try_from(session.seconds)
            .map_err(|_| StoreError::Backend(format!("seconds out of range: {}", session.seconds)))?;
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO study_sessions (id, user_id, class_id, seconds, week_start, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    session.id.hyphenated().to_string(),
                    session.user_id,
                    session.class_id,
                    seconds,
                    session.week_start.to_string(),
                    session.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl StudySessionQueries for SqliteStore {
    async fn sum_seconds(
        &self,
        user_id: UserId,
        class_id: ClassId,
        week_start: WeekStart,
    ) -> Result<u64, StoreError> {
        self.with_conn(move |conn| {
            conn.query_row(
                "SELECT COALESCE(SUM(seconds), 0) FROM study_sessions
                 WHERE user_id = ?1 AND class_id = ?2 AND week_start = ?3",
                params![user_id, class_id, week_start.to_string()],
                |row| seconds(row, 0),
            )
        })
        .await
    }

    async fn sum_seconds_by_class(
        &self,
        user_id: UserId,
        week_start: WeekStart,
    ) -> Result<BTreeMap<ClassId, u64>, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT class_id, SUM(seconds) FROM study_sessions
                 WHERE user_id = ?1 AND week_start = ?2
                 GROUP BY class_id",
            )?;
            let rows = stmt.query_map(params![user_id, week_start.to_string()], |row| {
                Ok((row.get::<_, ClassId>(0)?, seconds(row, 1)?))
            })?;
            rows.collect()
        })
        .await
    }

    async fn sum_seconds_by_user(
        &self,
        class_id: ClassId,
        week_start: WeekStart,
    ) -> Result<Vec<(UserId, u64)>, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT user_id, SUM(seconds) FROM study_sessions
                 WHERE class_id = ?1 AND week_start = ?2
                 GROUP BY user_id",
            )?;
            let rows = stmt.query_map(params![class_id, week_start.to_string()], |row| {
                Ok((row.get::<_, UserId>(0)?, seconds(row, 1)?))
            })?;
            rows.collect()
        })
        .await
    }
}

#[async_trait]
impl FeedbackRepository for SqliteStore {
    async fn create_feedback(&self, feedback: NewFeedback) -> Result<Feedback, StoreError> {
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO feedback (user_id, content, created_at) VALUES (?1, ?2, ?3)",
                params![feedback.user_id, feedback.content, feedback.created_at.to_rfc3339()],
            )?;
            let id = conn.last_insert_rowid();
            conn.query_row(
                &format!("{FEEDBACK_SELECT} WHERE f.id = ?1"),
                params![id],
                feedback_from_row,
            )
        })
        .await
    }

    async fn list_feedback(&self) -> Result<Vec<Feedback>, StoreError> {
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{FEEDBACK_SELECT} ORDER BY f.upvotes DESC, f.created_at DESC, f.id DESC"
            ))?;
            let rows = stmt.query_map([], feedback_from_row)?;
            rows.collect()
        })
        .await
    }

    async fn toggle_upvote(
        &self,
        feedback_id: FeedbackId,
        user_id: UserId,
    ) -> Result<Option<bool>, StoreError> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            let exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM feedback WHERE id = ?1)",
                params![feedback_id],
                |row| row.get(0),
            )?;
            if !exists {
                return Ok(None);
            }
            let removed = tx.execute(
                "DELETE FROM feedback_upvotes WHERE feedback_id = ?1 AND user_id = ?2",
                params![feedback_id, user_id],
            )? > 0;
            if removed {
                tx.execute(
                    "UPDATE feedback SET upvotes = MAX(upvotes - 1, 0) WHERE id = ?1",
                    params![feedback_id],
                )?;
            } else {
                tx.execute(
                    "INSERT INTO feedback_upvotes (feedback_id, user_id) VALUES (?1, ?2)",
                    params![feedback_id, user_id],
                )?;
                tx.execute(
                    "UPDATE feedback SET upvotes = upvotes + 1 WHERE id = ?1",
                    params![feedback_id],
                )?;
            }
            tx.commit()?;
            Ok(Some(!removed))
        })
        .await
    }

    async fn delete_owned_feedback(
        &self,
        feedback_id: FeedbackId,
        user_id: UserId,
    ) -> Result<bool, StoreError> {
        self.with_conn(move |conn| {
            let deleted = conn.execute(
                "DELETE FROM feedback WHERE id = ?1 AND user_id = ?2",
                params![feedback_id, user_id],
            )?;
            Ok(deleted > 0)
        })
        .await
    }
}

#[cfg(test)]
mod sqlite_store_tests {
    use super::*;
    use crate::tests::fixtures::{fixed_now, new_user};
    use rstest::{fixture, rstest};
    use uuid::Uuid;

    #[fixture]
    fn store() -> SqliteStore {
        SqliteStore::open_in_memory().expect("failed to open sqlite")
    }

    fn session(user_id: UserId, class_id: ClassId, seconds: u64, week: &str) -> StudySession {
        StudySession {
            id: Uuid::now_v7(),
            user_id,
            class_id,
            seconds,
            week_start: week.parse().unwrap(),
            created_at: fixed_now(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_round_trip_a_user(store: SqliteStore) {
        let user = store.create_user(new_user("ada")).await.unwrap();
        assert_eq!(store.get_user(user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(store.get_user(user.id + 1).await.unwrap(), None);
        let names = store.usernames(&[user.id, 999]).await.unwrap();
        assert_eq!(names, HashMap::from([(user.id, "ada".to_string())]));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_map_unique_violations_to_conflict(store: SqliteStore) {
        store.create_user(new_user("ada")).await.unwrap();
        let result = store.create_user(new_user("ada")).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_map_foreign_key_violations_to_orphan(store: SqliteStore) {
        let result = store
            .create_class(NewClass {
                user_id: 42,
                name: "Ghost".into(),
                created_at: fixed_now(),
            })
            .await;
        assert!(matches!(result, Err(StoreError::Orphan(_))));
        let result = store.insert_session(session(42, 42, 10, "2025-06-02")).await;
        assert!(matches!(result, Err(StoreError::Orphan(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_sum_sessions_per_week(store: SqliteStore) {
        let ada = store.create_user(new_user("ada")).await.unwrap();
        let grace = store.create_user(new_user("grace")).await.unwrap();
        let class = store
            .create_class(NewClass {
                user_id: ada.id,
                name: "Math".into(),
                created_at: fixed_now(),
            })
            .await
            .unwrap();
        for s in [
            session(ada.id, class.id, 120, "2025-06-02"),
            session(ada.id, class.id, 300, "2025-06-02"),
            session(ada.id, class.id, 999, "2025-05-26"),
            session(grace.id, class.id, 50, "2025-06-02"),
        ] {
            store.insert_session(s).await.unwrap();
        }
        let week: WeekStart = "2025-06-02".parse().unwrap();

        assert_eq!(store.sum_seconds(ada.id, class.id, week).await.unwrap(), 420);
        assert_eq!(store.sum_seconds(grace.id, 999, week).await.unwrap(), 0);
        assert_eq!(
            store.sum_seconds_by_class(ada.id, week).await.unwrap(),
            BTreeMap::from([(class.id, 420)])
        );
        let mut by_user = store.sum_seconds_by_user(class.id, week).await.unwrap();
        by_user.sort();
        assert_eq!(by_user, vec![(ada.id, 420), (grace.id, 50)]);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn it_should_serve_concurrent_inserts_from_the_blocking_pool(store: SqliteStore) {
        let store = Arc::new(store);
        let ada = store.create_user(new_user("ada")).await.unwrap();
        let class = store
            .create_class(NewClass {
                user_id: ada.id,
                name: "Math".into(),
                created_at: fixed_now(),
            })
            .await
            .unwrap();

        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store.insert_session(session(ada.id, class.id, 10, "2025-06-02")).await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let week: WeekStart = "2025-06-02".parse().unwrap();
        assert_eq!(store.sum_seconds(ada.id, class.id, week).await.unwrap(), 200);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_toggle_upvotes_in_step_with_the_counter(store: SqliteStore) {
        let ada = store.create_user(new_user("ada")).await.unwrap();
        let feedback = store
            .create_feedback(NewFeedback {
                user_id: ada.id,
                content: "streaks please".into(),
                created_at: fixed_now(),
            })
            .await
            .unwrap();
        assert_eq!(feedback.username, "ada");

        assert_eq!(store.toggle_upvote(feedback.id, ada.id).await.unwrap(), Some(true));
        assert_eq!(store.list_feedback().await.unwrap()[0].upvotes, 1);
        assert_eq!(store.toggle_upvote(feedback.id, ada.id).await.unwrap(), Some(false));
        assert_eq!(store.list_feedback().await.unwrap()[0].upvotes, 0);
        assert_eq!(store.toggle_upvote(feedback.id + 1, ada.id).await.unwrap(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_only_delete_owned_feedback(store: SqliteStore) {
        let ada = store.create_user(new_user("ada")).await.unwrap();
        let grace = store.create_user(new_user("grace")).await.unwrap();
        let feedback = store
            .create_feedback(NewFeedback {
                user_id: ada.id,
                content: "x".into(),
                created_at: fixed_now(),
            })
            .await
            .unwrap();
        store.toggle_upvote(feedback.id, grace.id).await.unwrap();

        assert!(!store.delete_owned_feedback(feedback.id, grace.id).await.unwrap());
        assert!(store.delete_owned_feedback(feedback.id, ada.id).await.unwrap());
        assert!(store.list_feedback().await.unwrap().is_empty());
    }
}
