// In memory implementation of every repository port.
//
// Purpose
// - Support handler and HTTP tests and local development without a database.
//
// Responsibilities
// - Hand out sequential ids the way an autoincrement column would.
// - Reject rows that reference missing users or classes (StoreError::Orphan).
// - Reject duplicate usernames and emails (StoreError::Conflict).
// - Fail every call with StoreError::Offline once toggled offline.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

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

struct FeedbackRow {
    id: FeedbackId,
    user_id: UserId,
    content: String,
    upvotes: u32,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    classes: BTreeMap<ClassId, Class>,
    sessions: Vec<StudySession>,
    feedback: BTreeMap<FeedbackId, FeedbackRow>,
    upvotes: HashSet<(FeedbackId, UserId)>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn joined(&self, row: &FeedbackRow) -> Feedback {
        Feedback {
            id: row.id,
            user_id: row.user_id,
            username: self
                .users
                .get(&row.user_id)
                .map(|user| user.username.clone())
                .unwrap_or_default(),
            content: row.content.clone(),
            upvotes: row.upvotes,
            created_at: row.created_at,
        }
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    is_offline: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn online(&self) -> Result<(), StoreError> {
        if self.is_offline {
            return Err(StoreError::Offline);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        self.online()?;
        let mut tables = self.tables.write().await;
        let taken = tables
            .users
            .values()
            .any(|existing| existing.username == user.username || existing.email == user.email);
        if taken {
            return Err(StoreError::Conflict(format!("user {} already exists", user.username)));
        }
        let id = tables.next_id();
        let user = User {
            id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        self.online()?;
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn usernames(&self, ids: &[UserId]) -> Result<HashMap<UserId, String>, StoreError> {
        self.online()?;
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id).map(|user| (*id, user.username.clone())))
            .collect())
    }
}

#[async_trait]
impl ClassRepository for InMemoryStore {
    async fn create_class(&self, class: NewClass) -> Result<Class, StoreError> {
        self.online()?;
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&class.user_id) {
            return Err(StoreError::Orphan(format!("user {} does not exist", class.user_id)));
        }
        let id = tables.next_id();
        let class = Class {
            id,
            user_id: class.user_id,
            name: class.name,
            created_at: class.created_at,
        };
        tables.classes.insert(id, class.clone());
        Ok(class)
    }

    async fn list_classes(&self, user_id: UserId) -> Result<Vec<Class>, StoreError> {
        self.online()?;
        let tables = self.tables.read().await;
        let mut classes: Vec<Class> = tables
            .classes
            .values()
            .filter(|class| class.user_id == user_id)
            .cloned()
            .collect();
        classes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(classes)
    }

    async fn find_owned_class(
        &self,
        class_id: ClassId,
        user_id: UserId,
    ) -> Result<Option<Class>, StoreError> {
        self.online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .classes
            .get(&class_id)
            .filter(|class| class.user_id == user_id)
            .cloned())
    }
}

#[async_trait]
impl StudySessionStore for InMemoryStore {
    async fn insert_session(&self, session: StudySession) -> Result<(), StoreError> {
        self.online()?;
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&session.user_id) {
            return Err(StoreError::Orphan(format!("user {} does not exist", session.user_id)));
        }
        if !tables.classes.contains_key(&session.class_id) {
            return Err(StoreError::Orphan(format!("class {} does not exist", session.class_id)));
        }
        tables.sessions.push(session);
        Ok(())
    }
}

#[async_trait]
impl StudySessionQueries for InMemoryStore {
    async fn sum_seconds(
        &self,
        user_id: UserId,
        class_id: ClassId,
        week_start: WeekStart,
    ) -> Result<u64, StoreError> {
        self.online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id && s.class_id == class_id && s.week_start == week_start)
            .map(|s| s.seconds)
            .sum())
    }

    async fn sum_seconds_by_class(
        &self,
        user_id: UserId,
        week_start: WeekStart,
    ) -> Result<BTreeMap<ClassId, u64>, StoreError> {
        self.online()?;
        let tables = self.tables.read().await;
        let mut totals = BTreeMap::new();
        for session in tables
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id && s.week_start == week_start)
        {
            *totals.entry(session.class_id).or_insert(0) += session.seconds;
        }
        Ok(totals)
    }

    async fn sum_seconds_by_user(
        &self,
        class_id: ClassId,
        week_start: WeekStart,
    ) -> Result<Vec<(UserId, u64)>, StoreError> {
        self.online()?;
        let tables = self.tables.read().await;
        let mut totals: BTreeMap<UserId, u64> = BTreeMap::new();
        for session in tables
            .sessions
            .iter()
            .filter(|s| s.class_id == class_id && s.week_start == week_start)
        {
            *totals.entry(session.user_id).or_insert(0) += session.seconds;
        }
        Ok(totals.into_iter().collect())
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryStore {
    async fn create_feedback(&self, feedback: NewFeedback) -> Result<Feedback, StoreError> {
        self.online()?;
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&feedback.user_id) {
            return Err(StoreError::Orphan(format!("user {} does not exist", feedback.user_id)));
        }
        let id = tables.next_id();
        let row = FeedbackRow {
            id,
            user_id: feedback.user_id,
            content: feedback.content,
            upvotes: 0,
            created_at: feedback.created_at,
        };
        let joined = tables.joined(&row);
        tables.feedback.insert(id, row);
        Ok(joined)
    }

    async fn list_feedback(&self) -> Result<Vec<Feedback>, StoreError> {
        self.online()?;
        let tables = self.tables.read().await;
        let mut feedback: Vec<Feedback> = tables.feedback.values().map(|row| tables.joined(row)).collect();
        feedback.sort_by(|a, b| {
            b.upvotes
                .cmp(&a.upvotes)
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });
        Ok(feedback)
    }

    async fn toggle_upvote(
        &self,
        feedback_id: FeedbackId,
        user_id: UserId,
    ) -> Result<Option<bool>, StoreError> {
        self.online()?;
        let mut tables = self.tables.write().await;
        if !tables.feedback.contains_key(&feedback_id) {
            return Ok(None);
        }
        if !tables.users.contains_key(&user_id) {
            return Err(StoreError::Orphan(format!("user {user_id} does not exist")));
        }
        let upvoted = if tables.upvotes.remove(&(feedback_id, user_id)) {
            false
        } else {
            tables.upvotes.insert((feedback_id, user_id));
            true
        };
        if let Some(row) = tables.feedback.get_mut(&feedback_id) {
            row.upvotes = if upvoted {
                row.upvotes.saturating_add(1)
            } else {
                row.upvotes.saturating_sub(1)
            };
        }
        Ok(Some(upvoted))
    }

    async fn delete_owned_feedback(
        &self,
        feedback_id: FeedbackId,
        user_id: UserId,
    ) -> Result<bool, StoreError> {
        self.online()?;
        let mut tables = self.tables.write().await;
        let owned = tables
            .feedback
            .get(&feedback_id)
            .is_some_and(|row| row.user_id == user_id);
        if !owned {
            return Ok(false);
        }
        tables.feedback.remove(&feedback_id);
        tables.upvotes.retain(|(id, _)| *id != feedback_id);
        Ok(true)
    }
}
