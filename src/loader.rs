use crate::item::{Category, Item};
use reqwest::{StatusCode, Url};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Failure while fetching or parsing a category document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid source location: {0}")]
    InvalidLocation(String),

    #[error("HTTP {status} from {location}")]
    Status { status: u16, location: String },

    #[error("Request to {location} failed: {source}")]
    Http {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Could not read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed item list in {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Transport-level failures may succeed on reload.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LoadError::Status { .. } | LoadError::Http { .. })
    }

    /// Short sentence for the status line.
    pub fn user_message(&self) -> String {
        match self {
            LoadError::InvalidLocation(loc) => format!("Bad source location: {}", loc),
            LoadError::Status { status, .. } => format!("Server answered {}", status),
            LoadError::Http { source, .. } => format!("Network error: {}", source),
            LoadError::Io { location, .. } => format!("Cannot read {}", location),
            LoadError::Parse { .. } => "Data format error".to_string(),
        }
    }
}

/// Where category documents come from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    Http { client: reqwest::Client, base: Url },
    Directory(PathBuf),
}

impl CatalogSource {
    /// `http(s)://` locations are fetched over the network, anything else is
    /// read as a local directory.
    pub fn from_location(location: &str, timeout: Option<Duration>) -> Result<Self, LoadError> {
        if location.starts_with("http://") || location.starts_with("https://") {
            let mut base = Url::parse(location)
                .map_err(|e| LoadError::InvalidLocation(format!("{}: {}", location, e)))?;
            if !base.path().ends_with('/') {
                let path = format!("{}/", base.path());
                base.set_path(&path);
            }
            let mut builder = reqwest::Client::builder();
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder
                .build()
                .map_err(|e| LoadError::InvalidLocation(format!("{}: {}", location, e)))?;
            Ok(CatalogSource::Http { client, base })
        } else {
            Ok(CatalogSource::Directory(PathBuf::from(location)))
        }
    }

    pub fn location_of(&self, category: Category) -> String {
        match self {
            CatalogSource::Http { base, .. } => base
                .join(&category.file_name())
                .map(|u| u.to_string())
                .unwrap_or_else(|_| format!("{}{}", base, category.file_name())),
            CatalogSource::Directory(dir) => {
                dir.join(category.file_name()).display().to_string()
            }
        }
    }

    /// Fetch and parse one category. Every call goes to the source again.
    pub async fn load(&self, category: Category) -> Result<Vec<Item>, LoadError> {
        let location = self.location_of(category);
        info!(category = category.key(), %location, "loading items");

        let result = match self {
            CatalogSource::Http { client, .. } => fetch_http(client, &location).await,
            CatalogSource::Directory(dir) => {
                let path = dir.join(category.file_name());
                tokio::fs::read(&path).await.map_err(|source| LoadError::Io {
                    location: location.clone(),
                    source,
                })
            }
        }
        .and_then(|body| parse_items(&body, &location));

        match &result {
            Ok(items) => info!(category = category.key(), count = items.len(), "items loaded"),
            Err(e) => warn!(category = category.key(), error = %e, "failed to load items"),
        }
        result
    }
}

async fn fetch_http(client: &reqwest::Client, location: &str) -> Result<Vec<u8>, LoadError> {
    let http_err = |source| LoadError::Http {
        location: location.to_string(),
        source,
    };
    let response = client.get(location).send().await.map_err(http_err)?;
    check_status(response.status(), location)?;
    let body = response.bytes().await.map_err(http_err)?;
    Ok(body.to_vec())
}

/// Reject any non-success response.
pub fn check_status(status: StatusCode, location: &str) -> Result<(), LoadError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(LoadError::Status {
            status: status.as_u16(),
            location: location.to_string(),
        })
    }
}

/// Parse a category document. No validation beyond JSON structure.
pub fn parse_items(body: &[u8], location: &str) -> Result<Vec<Item>, LoadError> {
    serde_json::from_slice(body).map_err(|source| LoadError::Parse {
        location: location.to_string(),
        source,
    })
}

/// Result of a background load, tagged with the request generation.
#[derive(Debug)]
pub enum LoadMessage {
    Loaded {
        generation: u64,
        category: Category,
        items: Vec<Item>,
    },
    Failed {
        generation: u64,
        category: Category,
        error: LoadError,
    },
}

impl LoadMessage {
    pub fn generation(&self) -> u64 {
        match self {
            LoadMessage::Loaded { generation, .. } | LoadMessage::Failed { generation, .. } => {
                *generation
            }
        }
    }
}

/// Runs loads as background tasks. Only the latest request can deliver a
/// result; starting a new one aborts the previous task and results from
/// older generations are dropped.
pub struct LoadCoordinator {
    source: Arc<CatalogSource>,
    message_tx: UnboundedSender<LoadMessage>,
    message_rx: UnboundedReceiver<LoadMessage>,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl LoadCoordinator {
    pub fn new(source: CatalogSource) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            source: Arc::new(source),
            message_tx,
            message_rx,
            generation: 0,
            in_flight: None,
        }
    }

    /// Start loading `category`, superseding any load in flight.
    pub fn start(&mut self, category: Category) -> u64 {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                debug!(generation = self.generation, "aborting stale load");
            }
            handle.abort();
        }
        self.generation += 1;
        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let tx = self.message_tx.clone();

        self.in_flight = Some(tokio::spawn(async move {
            let message = match source.load(category).await {
                Ok(items) => LoadMessage::Loaded {
                    generation,
                    category,
                    items,
                },
                Err(error) => LoadMessage::Failed {
                    generation,
                    category,
                    error,
                },
            };
            let _ = tx.send(message);
        }));
        generation
    }

    /// Keep `message` only if it answers the latest request.
    pub fn accept(&self, message: LoadMessage) -> Option<LoadMessage> {
        if message.generation() == self.generation {
            Some(message)
        } else {
            debug!(
                stale = message.generation(),
                current = self.generation,
                "dropping stale load result"
            );
            None
        }
    }

    /// Next current result without blocking.
    pub fn try_next(&mut self) -> Option<LoadMessage> {
        while let Ok(message) = self.message_rx.try_recv() {
            if let Some(message) = self.accept(message) {
                return Some(message);
            }
        }
        None
    }

    /// Wait for the next current result.
    pub async fn next(&mut self) -> Option<LoadMessage> {
        while let Some(message) = self.message_rx.recv().await {
            if let Some(message) = self.accept(message) {
                return Some(message);
            }
        }
        None
    }
}
