use crate::models::user::UserDb;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// The user store file, plus the lock that serializes its read-modify-write
/// cycle. Reads go straight to disk; writes rewrite the whole file.
#[derive(Clone, Debug)]
pub struct UserStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Must be held across load + save of a mutation so two concurrent
    /// progress updates cannot interleave and drop one another's write.
    pub async fn write_guard(&self) -> OwnedMutexGuard<()> {
        Arc::clone(&self.write_lock).lock_owned().await
    }

    /// Same lenient fallback as the document store: missing or malformed
    /// file means no users, logged but never surfaced.
    pub async fn load(&self) -> UserDb {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(db) => db,
                Err(e) => {
                    tracing::warn!("malformed user store at {}: {e}", self.path.display());
                    UserDb::default()
                }
            },
            Err(e) => {
                tracing::warn!("user store unreadable at {}: {e}", self.path.display());
                UserDb::default()
            }
        }
    }

    pub async fn save(&self, db: &UserDb) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(db)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
