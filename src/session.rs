//! Trainer session and its durable storage

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Storage key the trainer name lives under.
pub const TRAINER_KEY: &str = "trainerName";

/// The signed-in trainer, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Session {
    pub trainer: Option<String>,
}

impl Session {
    pub fn new(trainer: impl Into<String>) -> Self {
        Self {
            trainer: Some(trainer.into()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.trainer.is_some()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Key-value store holding the trainer name as a single file.
#[derive(Clone, Debug)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn default_dir() -> PathBuf {
        dirs_next::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pokedex-tui")
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TRAINER_KEY)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Missing or blank storage means nobody is signed in.
    pub async fn load(&self) -> Result<Session, SessionError> {
        let path = self.path();
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                let name = contents.trim();
                if name.is_empty() {
                    Ok(Session::default())
                } else {
                    Ok(Session::new(name))
                }
            }
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(Session::default()),
            Err(source) => Err(SessionError::Read { path, source }),
        }
    }

    pub async fn save(&self, trainer: &str) -> Result<(), SessionError> {
        let path = self.path();
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| SessionError::Write {
                path: self.dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, trainer)
            .await
            .map_err(|source| SessionError::Write {
                path: path.clone(),
                source,
            })?;
        tracing::info!(path = %path.display(), "trainer saved");
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), SessionError> {
        let path = self.path();
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), "trainer cleared");
                Ok(())
            }
            Err(source) if source.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SessionError::Write { path, source }),
        }
    }
}

static STORE: OnceLock<SessionStore> = OnceLock::new();

/// Installs the process-wide store. Later calls keep the first store.
pub fn install(store: SessionStore) {
    if STORE.set(store).is_err() {
        tracing::warn!("session store already installed");
    }
}

pub fn store() -> &'static SessionStore {
    STORE.get_or_init(|| SessionStore::new(SessionStore::default_dir()))
}
