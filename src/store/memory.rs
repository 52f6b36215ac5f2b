use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use super::{SessionStore, TaskStore, UserStore, DUPLICATE_USER_MESSAGE};
use crate::auth::token::Session;
use crate::error::AppError;
use crate::models::{NewTask, Task, TaskId, User, UserId};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    tasks: BTreeMap<TaskId, Task>,
    sessions: HashMap<String, Session>,
    next_user_id: UserId,
    next_task_id: TaskId,
}

/// In-process store with the same observable behavior as `PgStore`.
///
/// Every operation takes the single lock for its whole duration, which gives the
/// same single-row atomicity the relational store provides.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) sessions.
    pub fn session_count(&self) -> usize {
        let now = Utc::now();
        self.tables
            .lock()
            .sessions
            .values()
            .filter(|session| !session.is_expired_at(now))
            .count()
    }

    /// Number of stored tasks across all users.
    pub fn task_count(&self) -> usize {
        self.tables.lock().tasks.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, AppError> {
        let mut tables = self.tables.lock();
        if tables.users.iter().any(|user| user.email == email) {
            return Err(AppError::Conflict(DUPLICATE_USER_MESSAGE.into()));
        }
        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock();
        Ok(tables
            .users
            .iter()
            .find(|user| user.email == email && user.password_hash == password_hash)
            .cloned())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create_session(&self, session: &Session) -> Result<(), AppError> {
        let now = Utc::now();
        let mut tables = self.tables.lock();
        tables.sessions.retain(|_, existing| !existing.is_expired_at(now));
        tables
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn resolve_session(&self, token: &str) -> Result<Option<UserId>, AppError> {
        let now = Utc::now();
        let tables = self.tables.lock();
        Ok(tables
            .sessions
            .get(token)
            .filter(|session| !session.is_expired_at(now))
            .map(|session| session.user_id))
    }

    async fn delete_session(&self, token: &str) -> Result<u64, AppError> {
        let mut tables = self.tables.lock();
        Ok(tables.sessions.remove(token).map_or(0, |_| 1))
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(&self, task: NewTask) -> Result<Task, AppError> {
        let mut tables = self.tables.lock();
        tables.next_task_id += 1;
        let created = Task {
            id: tables.next_task_id,
            user_id: task.user_id,
            title: task.title,
            description: task.description,
            tag: task.tag,
            created_at: Utc::now(),
        };
        tables.tasks.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_tasks(&self, user_id: UserId) -> Result<Vec<Task>, AppError> {
        let tables = self.tables.lock();
        let mut tasks: Vec<Task> = tables
            .tasks
            .values()
            .filter(|task| task.user_id == user_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(tasks)
    }

    async fn update_task(
        &self,
        id: TaskId,
        user_id: UserId,
        title: &str,
        description: &str,
    ) -> Result<u64, AppError> {
        let mut tables = self.tables.lock();
        match tables.tasks.get_mut(&id) {
            Some(task) if task.user_id == user_id => {
                task.title = title.to_string();
                task.description = description.to_string();
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn delete_task(&self, id: TaskId, user_id: UserId) -> Result<u64, AppError> {
        let mut tables = self.tables.lock();
        let owned = tables
            .tasks
            .get(&id)
            .map_or(false, |task| task.user_id == user_id);
        if owned {
            tables.tasks.remove(&id);
            Ok(1)
        } else {
            Ok(0)
        }
    }
}
