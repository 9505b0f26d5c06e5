//! Where the two players' names and colors come from.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use crate::error::FetchError;
use crate::game::{PlayerIdentity, Players};

pub type FetchResult = Result<Players, FetchError>;

/// Supplies player identities, possibly from another thread.
pub trait ConfigurationSource {
    /// Start a single fetch. Each call is independent; nothing is retried.
    fn fetch_configuration(&self) -> PendingConfiguration;
}

/// Handle to one in-flight fetch. Yields exactly one result.
#[derive(Debug)]
pub struct PendingConfiguration {
    rx: mpsc::Receiver<FetchResult>,
}

impl PendingConfiguration {
    /// A handle plus the sender a worker completes it with.
    pub fn channel() -> (mpsc::Sender<FetchResult>, PendingConfiguration) {
        let (tx, rx) = mpsc::channel();
        (tx, PendingConfiguration { rx })
    }

    /// A handle that is already complete.
    pub fn ready(result: FetchResult) -> PendingConfiguration {
        let (tx, pending) = Self::channel();
        // The receiver is alive, so this cannot fail.
        let _ = tx.send(result);
        pending
    }

    /// `None` while the fetch is still running.
    pub fn try_take(&self) -> Option<FetchResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(FetchError::Disconnected)),
        }
    }
}

/// One entry of the player configuration payload.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemoteConfiguration {
    pub id: u64,
    pub color1: String,
    pub color2: String,
    pub name1: String,
    pub name2: String,
}

impl RemoteConfiguration {
    pub fn into_players(self) -> Players {
        Players::new(
            PlayerIdentity::new(self.name1, self.color1),
            PlayerIdentity::new(self.name2, self.color2),
        )
    }
}

/// Parse a JSON array of [`RemoteConfiguration`]; the first entry wins.
pub fn parse_payload(json: &str) -> FetchResult {
    let entries: Vec<RemoteConfiguration> = serde_json::from_str(json)?;
    entries
        .into_iter()
        .next()
        .map(RemoteConfiguration::into_players)
        .ok_or(FetchError::EmptyPayload)
}

/// Fixed players, delivered immediately.
#[derive(Debug, Clone)]
pub struct StaticSource {
    players: Players,
}

impl StaticSource {
    pub fn new(players: Players) -> Self {
        StaticSource { players }
    }
}

impl ConfigurationSource for StaticSource {
    fn fetch_configuration(&self) -> PendingConfiguration {
        PendingConfiguration::ready(Ok(self.players.clone()))
    }
}

/// Reads a JSON payload file on a background thread.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSource { path: path.into() }
    }

    fn read(path: &Path) -> FetchResult {
        let json = std::fs::read_to_string(path).map_err(|e| FetchError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        parse_payload(&json)
    }
}

impl ConfigurationSource for JsonFileSource {
    fn fetch_configuration(&self) -> PendingConfiguration {
        let (tx, pending) = PendingConfiguration::channel();
        let path = self.path.clone();
        std::thread::spawn(move || {
            let result = Self::read(&path);
            if let Err(e) = &result {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "player configuration fetch failed"
                );
            }
            // The engine may already have been dropped.
            let _ = tx.send(result);
        });
        pending
    }
}
