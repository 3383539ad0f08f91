//! # Product Request Store
//!
//! In-memory record of intake requests. State lives for the life of the
//! process only; the optional Sheets ledger is the durable copy.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// How the request arrived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestKind {
    Text,
    Photo,
    Document,
}

impl RequestKind {
    pub fn label(&self) -> &'static str {
        match self {
            RequestKind::Text => "text",
            RequestKind::Photo => "photo",
            RequestKind::Document => "document",
        }
    }
}

/// Lifecycle of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl RequestStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Processing => "processing",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
        }
    }
}

/// One sourcing request captured from an inbound message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRequest {
    pub id: String,
    pub user_id: i64,
    pub first_name: String,
    pub username: Option<String>,
    pub kind: RequestKind,
    pub description: String,
    /// Telegram file id of the attached photo, if any
    pub image_file_id: Option<String>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Shared, process-local request store
#[derive(Default)]
pub struct RequestBook {
    requests: RwLock<HashMap<String, ProductRequest>>,
    // Disambiguates ids when one user submits twice within a second.
    sequence: AtomicU64,
}

impl RequestBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new request and return the stored copy
    pub fn create(
        &self,
        user_id: i64,
        first_name: &str,
        username: Option<&str>,
        kind: RequestKind,
        description: &str,
        image_file_id: Option<&str>,
    ) -> ProductRequest {
        let created_at = Utc::now();
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let request = ProductRequest {
            id: format!(
                "REQ-{}-{}-{}",
                user_id,
                created_at.format("%Y%m%d%H%M%S"),
                seq
            ),
            user_id,
            first_name: first_name.to_string(),
            username: username.map(str::to_string),
            kind,
            description: description.to_string(),
            image_file_id: image_file_id.map(str::to_string),
            status: RequestStatus::Pending,
            created_at,
        };
        self.requests
            .write()
            .insert(request.id.clone(), request.clone());
        request
    }

    pub fn get(&self, id: &str) -> Option<ProductRequest> {
        self.requests.read().get(id).cloned()
    }

    /// All requests submitted by a user, newest first
    pub fn by_user(&self, user_id: i64) -> Vec<ProductRequest> {
        let mut requests: Vec<ProductRequest> = self
            .requests
            .read()
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        requests
    }

    /// Move a request to a new status; returns false if the id is unknown
    pub fn set_status(&self, id: &str, status: RequestStatus) -> bool {
        match self.requests.write().get_mut(id) {
            Some(request) => {
                request.status = status;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.requests.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_assigns_id_and_pending_status() {
        let book = RequestBook::new();
        let request = book.create(
            42,
            "Ann",
            Some("ann_s"),
            RequestKind::Text,
            "Хочу купить часы",
            None,
        );

        assert!(request.id.starts_with("REQ-42-"));
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(book.get(&request.id).map(|r| r.user_id), Some(42));
    }

    #[test]
    fn status_transitions_apply_in_place() {
        let book = RequestBook::new();
        let request = book.create(1, "Bob", None, RequestKind::Photo, "photo request", Some("f1"));

        assert!(book.set_status(&request.id, RequestStatus::Processing));
        assert_eq!(
            book.get(&request.id).map(|r| r.status),
            Some(RequestStatus::Processing)
        );
        assert!(!book.set_status("REQ-0-unknown", RequestStatus::Completed));
    }

    #[test]
    fn by_user_filters_and_orders_newest_first() {
        let book = RequestBook::new();
        book.create(1, "Ann", None, RequestKind::Text, "first", None);
        book.create(2, "Bob", None, RequestKind::Text, "other user", None);
        book.create(1, "Ann", None, RequestKind::Text, "second", None);

        let mine = book.by_user(1);
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r.user_id == 1));
    }
}
