//! MongoDB connection lifecycle.

use mongodb::bson::doc;
use mongodb::Client;
use tokio::sync::watch;

/// Lifecycle state of the startup connection attempt.
///
/// Transitions happen exactly once, driven by the initial attempt:
/// `Connecting` to either `Connected` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbStatus {
    Connecting,
    Connected,
    Failed,
}

impl DbStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Failed => "failed",
        }
    }
}

/// Handle to the document store, owned for the life of the process.
///
/// The connection is attempted once, off the startup path. Its outcome is
/// logged and reflected in [`DbStatus`], but never retried and never gates
/// the HTTP surface.
#[derive(Clone)]
pub struct Db {
    client: Option<Client>,
    status: watch::Receiver<DbStatus>,
}

impl Db {
    /// Build a client for `uri` and ping the server from a spawned task.
    ///
    /// Never fails: an unusable URI or unreachable server leaves the handle
    /// in the `Failed` state with the error logged.
    pub async fn connect(uri: &str) -> Self {
        let (tx, status) = watch::channel(DbStatus::Connecting);

        let client = match Client::with_uri_str(uri).await {
            Ok(client) => client,
            Err(e) => {
                tracing::error!(error = %e, "MongoDB connection error");
                tx.send_replace(DbStatus::Failed);
                return Self {
                    client: None,
                    status,
                };
            }
        };

        let ping = client.clone();
        tokio::spawn(async move {
            match ping.database("admin").run_command(doc! { "ping": 1 }).await {
                Ok(_) => {
                    tx.send_replace(DbStatus::Connected);
                    tracing::info!("MongoDB connected");
                }
                Err(e) => {
                    tx.send_replace(DbStatus::Failed);
                    tracing::error!(error = %e, "MongoDB connection error");
                }
            }
        });

        Self {
            client: Some(client),
            status,
        }
    }

    /// Current lifecycle state of the startup connection attempt.
    pub fn status(&self) -> DbStatus {
        *self.status.borrow()
    }

    /// The underlying client, when the URI was usable.
    ///
    /// This is the seam handlers reach the database through; no current
    /// route does.
    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }
}
