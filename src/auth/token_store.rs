use anyhow::{Context, Result};
use log::error;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Persistent home of the single access-token string: written on login, read
/// on every authenticated call, removed on logout. Stands in for the browser
/// localStorage slot the web client used.
#[derive(Clone, Debug)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn init(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(token) => {
                let token = token.trim().to_string();
                if token.is_empty() {
                    None
                } else {
                    Some(token)
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                error!("Error reading access token from {:?}: {}", self.path, e);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.load().is_some()
    }

    pub fn save(&self, token: &str) -> Result<()> {
        fs::write(&self.path, token)
            .with_context(|| format!("failed to persist access token to {:?}", self.path))
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("failed to clear access token {:?}", self.path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn temp_store(name: &str) -> TokenStore {
        static COUNTER: AtomicU32 = AtomicU32::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "polling-app-token-{}-{}-{}",
            name,
            std::process::id(),
            n
        ));
        TokenStore::init(path)
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = temp_store("round-trip");
        store.save("abc.def.ghi").unwrap();
        assert_eq!(store.load().as_deref(), Some("abc.def.ghi"));
        assert!(store.is_authenticated());
        store.clear().unwrap();
    }

    #[test]
    fn load_without_token_is_none() {
        let store = temp_store("missing");
        assert_eq!(store.load(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = temp_store("clear");
        store.save("token").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);
    }
}
