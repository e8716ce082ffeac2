//! Pending user approvals.
//!
//! Flow:
//! 1. Handler calls `request()`, which registers a pending entry and awaits
//!    a oneshot receiver
//! 2. The user (via the admin API) calls `approve()` or `reject()`
//! 3. The decision is sent through the channel and `request()` resolves
//!
//! If the requesting future is dropped its entry is removed. Entries
//! discarded by `cancel_all()` resolve as dropped.

use crate::domain::approval::{ApprovalRequest, PendingApproval};
use crate::domain::error::ApprovalError;
use crate::domain::network::NetworkDescriptor;
use dashmap::DashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Decision delivered to a waiting request
#[derive(Debug)]
enum ApprovalDecision {
    Approved(NetworkDescriptor),
    Rejected,
}

struct PendingEntry {
    approval: PendingApproval,
    sender: oneshot::Sender<ApprovalDecision>,
}

/// Statistics for the approval queue
#[derive(Debug, Default)]
pub struct ApprovalStats {
    pub total_requested: AtomicU64,
    pub total_approved: AtomicU64,
    pub total_rejected: AtomicU64,
    pub total_dropped: AtomicU64,
}

/// Point-in-time copy of [`ApprovalStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ApprovalStatsSnapshot {
    pub requested: u64,
    pub approved: u64,
    pub rejected: u64,
    pub dropped: u64,
}

/// Approval queue keyed by approval id
#[derive(Default)]
pub struct ApprovalQueue {
    pending: DashMap<Uuid, PendingEntry>,
    stats: ApprovalStats,
}

/// Removes the entry if the waiting request goes away
struct PendingGuard<'a> {
    queue: &'a ApprovalQueue,
    id: Uuid,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.queue.pending.remove(&self.id).is_some() {
            debug!(approval_id = %self.id, "Approval request abandoned");
        }
    }
}

impl ApprovalQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a request and wait for the user's decision.
    ///
    /// There is no timeout; the request stays pending until decided,
    /// cancelled, or abandoned by the caller.
    pub async fn request(
        &self,
        request: ApprovalRequest,
    ) -> Result<NetworkDescriptor, ApprovalError> {
        let approval = PendingApproval::new(request);
        let id = approval.id;
        let (tx, rx) = oneshot::channel();

        info!(
            approval_id = %id,
            origin = %approval.request.origin,
            request_type = %approval.request.request_type,
            chain_id = %approval.request.request_data.chain_id,
            "Approval requested"
        );

        self.pending.insert(
            id,
            PendingEntry {
                approval,
                sender: tx,
            },
        );
        self.stats.total_requested.fetch_add(1, Ordering::Relaxed);
        let _guard = PendingGuard { queue: self, id };

        match rx.await {
            Ok(ApprovalDecision::Approved(network)) => Ok(network),
            Ok(ApprovalDecision::Rejected) => Err(ApprovalError::Rejected(id)),
            Err(_) => Err(ApprovalError::Dropped(id)),
        }
    }

    /// Approve a pending request, optionally with a modified descriptor
    pub fn approve(
        &self,
        id: Uuid,
        network: Option<NetworkDescriptor>,
    ) -> Result<(), ApprovalError> {
        let (_, entry) = self
            .pending
            .remove(&id)
            .ok_or(ApprovalError::UnknownId(id))?;
        let network = network.unwrap_or(entry.approval.request.request_data);

        entry
            .sender
            .send(ApprovalDecision::Approved(network))
            .map_err(|_| {
                self.stats.total_dropped.fetch_add(1, Ordering::Relaxed);
                ApprovalError::Dropped(id)
            })?;

        self.stats.total_approved.fetch_add(1, Ordering::Relaxed);
        info!(approval_id = %id, "Approval granted");
        Ok(())
    }

    pub fn reject(&self, id: Uuid) -> Result<(), ApprovalError> {
        let (_, entry) = self
            .pending
            .remove(&id)
            .ok_or(ApprovalError::UnknownId(id))?;

        entry
            .sender
            .send(ApprovalDecision::Rejected)
            .map_err(|_| {
                self.stats.total_dropped.fetch_add(1, Ordering::Relaxed);
                ApprovalError::Dropped(id)
            })?;

        self.stats.total_rejected.fetch_add(1, Ordering::Relaxed);
        info!(approval_id = %id, "Approval rejected");
        Ok(())
    }

    /// Drop every pending entry; waiting requests fail as dropped.
    ///
    /// Returns the number of entries discarded.
    pub fn cancel_all(&self) -> usize {
        let ids: Vec<Uuid> = self.pending.iter().map(|e| *e.key()).collect();
        let cancelled = ids
            .into_iter()
            .filter(|id| self.pending.remove(id).is_some())
            .count();

        if cancelled > 0 {
            warn!(cancelled, "Cancelled pending approvals");
            self.stats
                .total_dropped
                .fetch_add(cancelled as u64, Ordering::Relaxed);
        }
        cancelled
    }

    /// Pending approvals, oldest first
    pub fn pending(&self) -> Vec<PendingApproval> {
        let mut pending: Vec<_> = self
            .pending
            .iter()
            .map(|e| e.value().approval.clone())
            .collect();
        pending.sort_by_key(|a| a.created_at);
        pending
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: &Uuid) -> bool {
        self.pending.contains_key(id)
    }

    pub fn stats(&self) -> ApprovalStatsSnapshot {
        ApprovalStatsSnapshot {
            requested: self.stats.total_requested.load(Ordering::Relaxed),
            approved: self.stats.total_approved.load(Ordering::Relaxed),
            rejected: self.stats.total_rejected.load(Ordering::Relaxed),
            dropped: self.stats.total_dropped.load(Ordering::Relaxed),
        }
    }
}
