//! Persistence seams for users, sessions and tasks.
//!
//! Handlers talk to these traits only. `PgStore` is the production implementation;
//! `MemoryStore` keeps everything in process and backs local development and the
//! test suite. Both implement every trait, so one value can be shared as all three.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::auth::token::Session;
use crate::error::AppError;
use crate::models::{NewTask, Task, TaskId, User, UserId};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Message returned when a registration hits the unique email constraint.
pub const DUPLICATE_USER_MESSAGE: &str = "User already exists. Please login.";

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user. Fails with `AppError::Conflict` if the email is taken.
    async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, AppError>;

    /// Looks a user up by email and password digest in one query.
    async fn find_by_credentials(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(&self, session: &Session) -> Result<(), AppError>;

    /// Returns the bound user id, or `None` if the token is unknown or expired.
    async fn resolve_session(&self, token: &str) -> Result<Option<UserId>, AppError>;

    /// Removes the session and returns how many entries were deleted (0 or 1).
    async fn delete_session(&self, token: &str) -> Result<u64, AppError>;
}

#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create_task(&self, task: NewTask) -> Result<Task, AppError>;

    /// All tasks owned by `user_id`, newest first.
    async fn list_tasks(&self, user_id: UserId) -> Result<Vec<Task>, AppError>;

    /// Overwrites title and description of the task matching both ids.
    /// Returns the number of rows affected.
    async fn update_task(
        &self,
        id: TaskId,
        user_id: UserId,
        title: &str,
        description: &str,
    ) -> Result<u64, AppError>;

    /// Deletes the task matching both ids. Returns the number of rows affected.
    async fn delete_task(&self, id: TaskId, user_id: UserId) -> Result<u64, AppError>;
}
