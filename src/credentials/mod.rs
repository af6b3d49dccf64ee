//! Credential storage for the Lunch Money API token
//!
//! The token is a single plain-text file named `apiKey` kept in one of two
//! places: a synced folder under the user's documents directory (so the same
//! token follows the user across machines) or the local XDG config
//! directory. Lookup tries synced first, then local; when neither has the
//! file the caller-supplied prompt asks for the token and a backend choice,
//! and the token is persisted there for next time.
//!
//! The token is never validated here. A wrong token only surfaces as failed
//! API requests downstream.

mod prompt;

pub use prompt::{TerminalPrompt, TokenEntry, TokenPrompt};

use directories::{ProjectDirs, UserDirs};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// File name of the persisted token inside either backend directory
const TOKEN_FILE: &str = "apiKey";

/// Folder name used for the synced namespace under the documents directory
const SYNCED_FOLDER: &str = "LunchGlance";

/// Errors that can occur while resolving the credential
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Reading, writing, or prompting failed
    #[error("Credential storage error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where a credential should be persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// A folder under the user's (cloud-synced) documents directory
    Synced,
    /// The local XDG config directory
    Local,
}

/// Resolves and persists the API token across the two storage backends
#[derive(Debug, Clone)]
pub struct CredentialStore {
    /// Synced namespace directory, when a documents directory exists
    synced_dir: Option<PathBuf>,
    /// Local config directory
    local_dir: PathBuf,
}

impl CredentialStore {
    /// Creates a CredentialStore over the standard platform directories
    ///
    /// Returns `None` if no home directory can be determined. The synced
    /// backend is only offered when the platform reports a documents
    /// directory.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "lunchglance")?;
        let synced_dir = UserDirs::new()
            .and_then(|dirs| dirs.document_dir().map(|d| d.join(SYNCED_FOLDER)));
        Some(Self {
            synced_dir,
            local_dir: project_dirs.config_dir().to_path_buf(),
        })
    }

    /// Creates a CredentialStore over specific directories (for tests)
    pub fn with_dirs(synced_dir: Option<PathBuf>, local_dir: PathBuf) -> Self {
        Self {
            synced_dir,
            local_dir,
        }
    }

    /// Path of the token file on the given backend, if that backend exists
    fn token_path(&self, backend: StorageBackend) -> Option<PathBuf> {
        match backend {
            StorageBackend::Synced => self.synced_dir.as_ref().map(|d| d.join(TOKEN_FILE)),
            StorageBackend::Local => Some(self.local_dir.join(TOKEN_FILE)),
        }
    }

    /// Returns the persisted token, prompting and persisting on first run
    ///
    /// Checks the synced backend first, then local. A token found on disk is
    /// returned with surrounding whitespace trimmed. On a miss the prompt is
    /// invoked synchronously; the entered token is written to the chosen
    /// backend (falling back to local when no synced directory exists) and
    /// returned. There is no guard against two first-runs racing; the widget
    /// runs as a single invocation.
    pub fn get(&self, prompt: &mut dyn TokenPrompt) -> Result<String, CredentialError> {
        for backend in [StorageBackend::Synced, StorageBackend::Local] {
            if let Some(path) = self.token_path(backend) {
                if path.exists() {
                    return Ok(fs::read_to_string(path)?.trim().to_string());
                }
            }
        }

        let entry = prompt.read_token()?;
        let dir = match entry.backend {
            StorageBackend::Synced => self.synced_dir.as_deref().unwrap_or(self.local_dir.as_path()),
            StorageBackend::Local => self.local_dir.as_path(),
        };
        fs::create_dir_all(dir)?;
        fs::write(dir.join(TOKEN_FILE), &entry.token)?;
        Ok(entry.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    /// A scripted prompt that records how often it was invoked
    struct ScriptedPrompt {
        token: String,
        backend: StorageBackend,
        invocations: Cell<usize>,
    }

    impl ScriptedPrompt {
        fn new(token: &str, backend: StorageBackend) -> Self {
            Self {
                token: token.to_string(),
                backend,
                invocations: Cell::new(0),
            }
        }
    }

    impl TokenPrompt for ScriptedPrompt {
        fn read_token(&mut self) -> std::io::Result<TokenEntry> {
            self.invocations.set(self.invocations.get() + 1);
            Ok(TokenEntry {
                token: self.token.clone(),
                backend: self.backend,
            })
        }
    }

    fn test_store() -> (CredentialStore, TempDir) {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let synced = temp.path().join("synced");
        let local = temp.path().join("local");
        (CredentialStore::with_dirs(Some(synced), local), temp)
    }

    #[test]
    fn test_existing_synced_token_is_returned_without_prompting() {
        let (store, temp) = test_store();
        let synced = temp.path().join("synced");
        fs::create_dir_all(&synced).unwrap();
        fs::write(synced.join(TOKEN_FILE), "synced-token\n").unwrap();

        let mut prompt = ScriptedPrompt::new("unused", StorageBackend::Local);
        let token = store.get(&mut prompt).expect("Should resolve token");

        assert_eq!(token, "synced-token");
        assert_eq!(prompt.invocations.get(), 0, "Prompt must not run");
    }

    #[test]
    fn test_synced_backend_takes_precedence_over_local() {
        let (store, temp) = test_store();
        for (dir, value) in [("synced", "from-synced"), ("local", "from-local")] {
            let dir = temp.path().join(dir);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(TOKEN_FILE), value).unwrap();
        }

        let mut prompt = ScriptedPrompt::new("unused", StorageBackend::Local);
        let token = store.get(&mut prompt).unwrap();

        assert_eq!(token, "from-synced");
    }

    #[test]
    fn test_local_token_found_when_synced_missing() {
        let (store, temp) = test_store();
        let local = temp.path().join("local");
        fs::create_dir_all(&local).unwrap();
        fs::write(local.join(TOKEN_FILE), "local-token").unwrap();

        let mut prompt = ScriptedPrompt::new("unused", StorageBackend::Synced);
        let token = store.get(&mut prompt).unwrap();

        assert_eq!(token, "local-token");
        assert_eq!(prompt.invocations.get(), 0);
    }

    #[test]
    fn test_first_run_prompts_and_persists_to_chosen_backend() {
        let (store, temp) = test_store();

        let mut prompt = ScriptedPrompt::new("fresh-token", StorageBackend::Synced);
        let token = store.get(&mut prompt).unwrap();

        assert_eq!(token, "fresh-token");
        assert_eq!(prompt.invocations.get(), 1);
        let persisted = fs::read_to_string(temp.path().join("synced").join(TOKEN_FILE)).unwrap();
        assert_eq!(persisted, "fresh-token");
    }

    #[test]
    fn test_first_run_persists_to_local_backend_when_chosen() {
        let (store, temp) = test_store();

        let mut prompt = ScriptedPrompt::new("local-choice", StorageBackend::Local);
        store.get(&mut prompt).unwrap();

        let persisted = fs::read_to_string(temp.path().join("local").join(TOKEN_FILE)).unwrap();
        assert_eq!(persisted, "local-choice");
        assert!(!temp.path().join("synced").join(TOKEN_FILE).exists());
    }

    #[test]
    fn test_synced_choice_falls_back_to_local_without_documents_dir() {
        let temp = TempDir::new().unwrap();
        let local = temp.path().join("local");
        let store = CredentialStore::with_dirs(None, local.clone());

        let mut prompt = ScriptedPrompt::new("fallback", StorageBackend::Synced);
        let token = store.get(&mut prompt).unwrap();

        assert_eq!(token, "fallback");
        assert_eq!(
            fs::read_to_string(local.join(TOKEN_FILE)).unwrap(),
            "fallback"
        );
    }

    #[test]
    fn test_second_run_reads_persisted_token() {
        let (store, _temp) = test_store();

        let mut first = ScriptedPrompt::new("persisted", StorageBackend::Local);
        store.get(&mut first).unwrap();

        let mut second = ScriptedPrompt::new("should-not-be-used", StorageBackend::Local);
        let token = store.get(&mut second).unwrap();

        assert_eq!(token, "persisted");
        assert_eq!(second.invocations.get(), 0);
    }
}
