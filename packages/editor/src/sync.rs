//! # Background Persistence
//!
//! The editor core never awaits the backend. Each local commit enqueues a
//! `PersistRequest` on the outbox; a `SyncWorker` forwards them to the
//! gateway.
//!
//! ```text
//! EditorCore ──send──▶ Outbox ──▶ SyncWorker ──spawn per request──▶ Gateway
//!                                     │
//!                                     ├──▶ notices (failures)
//!                                     └──▶ SyncStatus (watch)
//! ```
//!
//! Requests leave the outbox in commit order, but `run` does not wait for
//! one to finish before issuing the next, so a slow early write can land
//! after a later one. Failures are reported, never retried, and never roll
//! back local state.

use crate::errors::EditorError;
use crate::gateway::PersistenceGateway;
use crate::model::{ComponentTree, Site};
use crate::notice::{Notice, NoticeSource};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

/// One fire-and-forget write towards the backend
#[derive(Debug, Clone, PartialEq)]
pub enum PersistRequest {
    UpdatePageComponents {
        site_id: String,
        page_id: String,
        components: ComponentTree,
        language: Option<String>,
    },
    UpdateSite {
        site: Site,
    },
    ReorderPages {
        site_id: String,
        page_ids: Vec<String>,
    },
}

impl PersistRequest {
    pub fn source(&self) -> NoticeSource {
        match self {
            PersistRequest::UpdatePageComponents { .. } => NoticeSource::Components,
            PersistRequest::UpdateSite { .. } => NoticeSource::Site,
            PersistRequest::ReorderPages { .. } => NoticeSource::Pages,
        }
    }

    /// Send this request through `gateway`
    pub async fn execute(self, gateway: &dyn PersistenceGateway) -> Result<(), EditorError> {
        match self {
            PersistRequest::UpdatePageComponents {
                site_id,
                page_id,
                components,
                language,
            } => gateway
                .update_page_components(&site_id, &page_id, components, language)
                .await
                .map_err(EditorError::ComponentSync),
            PersistRequest::UpdateSite { site } => gateway
                .update_site(site)
                .await
                .map(|_| ())
                .map_err(EditorError::SiteUpdate),
            PersistRequest::ReorderPages { site_id, page_ids } => gateway
                .reorder_pages(&site_id, page_ids)
                .await
                .map_err(EditorError::SiteUpdate),
        }
    }
}

/// Sending half held by the editor core
#[derive(Debug, Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<PersistRequest>,
}

impl Outbox {
    pub fn channel() -> (Outbox, mpsc::UnboundedReceiver<PersistRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Outbox { tx }, rx)
    }

    pub fn send(&self, request: PersistRequest) {
        if self.tx.send(request).is_err() {
            warn!("Persistence worker has shut down, dropping request");
        }
    }
}

/// Last-known remote sync state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncStatus {
    /// Completion time of the most recent successful write
    pub last_synced_at: Option<DateTime<Utc>>,
    pub in_flight: usize,
    pub failures: u64,
    pub last_error: Option<String>,
}

/// Receivers a host watches while the worker runs
pub struct SyncHandles {
    pub notices: mpsc::UnboundedReceiver<Notice>,
    pub status: watch::Receiver<SyncStatus>,
}

pub struct SyncWorker {
    gateway: Arc<dyn PersistenceGateway>,
    requests: mpsc::UnboundedReceiver<PersistRequest>,
    notices: mpsc::UnboundedSender<Notice>,
    status: Arc<watch::Sender<SyncStatus>>,
}

impl SyncWorker {
    pub fn new(
        gateway: Arc<dyn PersistenceGateway>,
        requests: mpsc::UnboundedReceiver<PersistRequest>,
    ) -> (Self, SyncHandles) {
        let (notices_tx, notices_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(SyncStatus::default());

        let worker = Self {
            gateway,
            requests,
            notices: notices_tx,
            status: Arc::new(status_tx),
        };
        let handles = SyncHandles {
            notices: notices_rx,
            status: status_rx,
        };
        (worker, handles)
    }

    /// Forward requests until every `Outbox` is dropped.
    ///
    /// Each request runs as its own task; nothing is serialised.
    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let gateway = self.gateway.clone();
            let notices = self.notices.clone();
            let status = self.status.clone();

            status.send_modify(|s| s.in_flight += 1);
            tokio::spawn(async move {
                let source = request.source();
                let result = request.execute(&*gateway).await;
                record(&status, &notices, source, result);
            });
        }
    }

    /// Send every request queued so far, one at a time, in order.
    ///
    /// Returns the number of requests processed.
    pub async fn drain(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(request) = self.requests.try_recv() {
            self.status.send_modify(|s| s.in_flight += 1);
            let source = request.source();
            let result = request.execute(&*self.gateway).await;
            record(&self.status, &self.notices, source, result);
            processed += 1;
        }
        processed
    }
}

fn record(
    status: &watch::Sender<SyncStatus>,
    notices: &mpsc::UnboundedSender<Notice>,
    source: NoticeSource,
    result: Result<(), EditorError>,
) {
    match result {
        Ok(()) => {
            debug!(?source, "Persisted");
            status.send_modify(|s| {
                s.in_flight = s.in_flight.saturating_sub(1);
                s.last_synced_at = Some(Utc::now());
            });
        }
        Err(e) => {
            warn!(?source, error = %e, "Persistence failed, keeping local state");
            status.send_modify(|s| {
                s.in_flight = s.in_flight.saturating_sub(1);
                s.failures += 1;
                s.last_error = Some(e.to_string());
            });
            let mut notice = Notice::from(&e);
            notice.source = source;
            // Receiver may be gone if the host stopped listening
            let _ = notices.send(notice);
        }
    }
}
