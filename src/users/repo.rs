use std::collections::{HashMap, HashSet};

use parking_lot::Mutex;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo_types::{NewUser, UserRecord};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("email already registered")]
pub struct DuplicateEmail;

#[derive(Debug, Default)]
struct Inner {
    users: Vec<UserRecord>,
    by_email: HashMap<String, usize>,
    sessions: HashSet<Uuid>,
}

/// In-memory user store plus the set of logged-in user ids.
///
/// All state sits behind one lock so that the uniqueness check and append in
/// [`UserStore::insert`], and the credential match and session insert in
/// [`UserStore::open_session`], each happen as a single step.
#[derive(Debug, Default)]
pub struct UserStore {
    inner: Mutex<Inner>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new user with a fresh id. Emails are compared exactly.
    pub fn insert(&self, new: NewUser) -> Result<UserRecord, DuplicateEmail> {
        let mut inner = self.inner.lock();
        if inner.by_email.contains_key(&new.email) {
            return Err(DuplicateEmail);
        }

        let record = UserRecord {
            id: Uuid::new_v4(),
            full_name: new.full_name,
            email: new.email,
            phone: new.phone,
            password: new.password,
            created_at: OffsetDateTime::now_utc(),
        };
        let idx = inner.users.len();
        inner.by_email.insert(record.email.clone(), idx);
        inner.users.push(record.clone());
        Ok(record)
    }

    /// Match credentials and mark the user as logged in.
    ///
    /// Returns `None` when the email is unknown or the password differs; the
    /// session set is left untouched in that case. Re-opening an existing
    /// session is a no-op.
    pub fn open_session(&self, email: &str, password: &str) -> Option<UserRecord> {
        let mut inner = self.inner.lock();
        let idx = *inner.by_email.get(email)?;
        let user = &inner.users[idx];
        if user.password != password {
            return None;
        }
        let user = user.clone();
        inner.sessions.insert(user.id);
        Some(user)
    }

    pub fn has_session(&self, id: &Uuid) -> bool {
        self.inner.lock().sessions.contains(id)
    }

    /// Snapshot of all users in insertion order.
    pub fn list(&self) -> Vec<UserRecord> {
        self.inner.lock().users.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().users.len()
    }

    pub fn session_count(&self) -> usize {
        self.inner.lock().sessions.len()
    }
}
