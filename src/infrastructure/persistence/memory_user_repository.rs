//! Process-local user repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{NewUserRecord, User, UserRecordChanges};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

#[derive(Default)]
struct Store {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

impl Store {
    fn email_owner(&self, email: &str) -> Option<i64> {
        self.users
            .values()
            .find(|u| u.email.to_lowercase() == email.to_lowercase())
            .map(|u| u.id)
    }
}

/// A user repository that keeps records in memory.
///
/// Used when no database is configured, and by HTTP-level tests. Data is lost
/// on restart. Ids start at 1 and are never reused.
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        debug!("Using in-memory user store");
        Self {
            store: RwLock::new(Store::default()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, record: NewUserRecord) -> Result<User, AppError> {
        let mut store = self.store.write().await;

        if store.email_owner(&record.email).is_some() {
            return Err(AppError::email_already_exists(&record.email));
        }

        store.next_id += 1;
        let now = Utc::now();
        let user = User::new(
            store.next_id,
            record.name,
            record.email,
            record.password_hash,
            now,
            now,
        );
        store.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.store.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let store = self.store.read().await;
        Ok(store
            .email_owner(email)
            .and_then(|id| store.users.get(&id).cloned()))
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.store.read().await.users.values().cloned().collect())
    }

    async fn update(
        &self,
        id: i64,
        changes: UserRecordChanges,
    ) -> Result<Option<User>, AppError> {
        let mut store = self.store.write().await;

        if store
            .email_owner(&changes.email)
            .is_some_and(|owner| owner != id)
        {
            return Err(AppError::email_already_exists(&changes.email));
        }

        let Some(user) = store.users.get_mut(&id) else {
            return Ok(None);
        };

        user.name = changes.name;
        user.email = changes.email;
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        user.updated_at = Utc::now();

        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.store.write().await.users.remove(&id).is_some())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
