//!
//! # In-Memory Stores
//!
//! Process-local storage for users and tasks. There is deliberately no
//! persistence: both stores are `Mutex`-guarded collections shared across
//! handlers via `web::Data`, and their contents live exactly as long as the
//! process. Lock poisoning is surfaced as an internal server error rather
//! than panicking in a handler.

use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskQuery, TaskUpdate, User};

/// Holds every task, across all users. Reads and writes are scoped to an
/// owning `user_id`; a task that exists but belongs to someone else is
/// indistinguishable from a missing one.
#[derive(Default)]
pub struct TaskStore {
    tasks: Mutex<Vec<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Task>>, AppError> {
        self.tasks
            .lock()
            .map_err(|_| AppError::InternalServerError("Task store lock poisoned".into()))
    }

    /// Inserts a task and returns it as stored.
    pub fn insert(&self, task: Task) -> Result<Task, AppError> {
        let mut tasks = self.lock()?;
        tasks.push(task.clone());
        Ok(task)
    }

    /// Fetches a task by id, scoped to its owner.
    pub fn get(&self, id: Uuid, user_id: i32) -> Result<Option<Task>, AppError> {
        let tasks = self.lock()?;
        Ok(tasks
            .iter()
            .find(|t| t.id == id && t.user_id == user_id)
            .cloned())
    }

    /// Lists the user's tasks, newest first, applying the optional
    /// completion and search filters.
    pub fn list(&self, user_id: i32, query: &TaskQuery) -> Result<Vec<Task>, AppError> {
        let tasks = self.lock()?;
        let search = query.search.as_ref().map(|s| s.to_lowercase());
        let mut matches: Vec<Task> = tasks
            .iter()
            .filter(|t| t.user_id == user_id)
            .filter(|t| query.completed.map_or(true, |c| t.completed == c))
            .filter(|t| {
                search.as_ref().map_or(true, |needle| {
                    t.title.to_lowercase().contains(needle)
                        || t.description
                            .as_ref()
                            .map_or(false, |d| d.to_lowercase().contains(needle))
                })
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }

    /// Applies a partial update to the user's task and returns the updated
    /// task, or `None` if no such task is owned by the user.
    pub fn update(
        &self,
        id: Uuid,
        user_id: i32,
        update: TaskUpdate,
    ) -> Result<Option<Task>, AppError> {
        let mut tasks = self.lock()?;
        match tasks.iter_mut().find(|t| t.id == id && t.user_id == user_id) {
            Some(task) => {
                task.apply(update);
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }

    /// Removes the user's task, reporting whether anything was removed.
    pub fn remove(&self, id: Uuid, user_id: i32) -> Result<bool, AppError> {
        let mut tasks = self.lock()?;
        let before = tasks.len();
        tasks.retain(|t| !(t.id == id && t.user_id == user_id));
        Ok(tasks.len() < before)
    }

    /// Removes every task owned by the user and returns how many went away.
    pub fn clear(&self, user_id: i32) -> Result<usize, AppError> {
        let mut tasks = self.lock()?;
        let before = tasks.len();
        tasks.retain(|t| t.user_id != user_id);
        Ok(before - tasks.len())
    }
}

struct UserStoreInner {
    users: Vec<User>,
    next_id: i32,
}

/// Holds registered users and hands out sequential ids.
pub struct UserStore {
    inner: Mutex<UserStoreInner>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self {
            inner: Mutex::new(UserStoreInner {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, UserStoreInner>, AppError> {
        self.inner
            .lock()
            .map_err(|_| AppError::InternalServerError("User store lock poisoned".into()))
    }

    /// Registers a user, rejecting duplicate usernames. The duplicate check
    /// and the insert happen under one lock so concurrent registrations of
    /// the same name cannot both succeed.
    pub fn insert(&self, username: &str, password_hash: String) -> Result<User, AppError> {
        let mut inner = self.lock()?;
        if inner.users.iter().any(|u| u.username == username) {
            return Err(AppError::BadRequest("Username already registered".into()));
        }
        let id = inner.next_id;
        inner.next_id += 1;
        let user = User::new(id, username.to_string(), password_hash);
        inner.users.push(user.clone());
        Ok(user)
    }

    pub fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let inner = self.lock()?;
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }
}
