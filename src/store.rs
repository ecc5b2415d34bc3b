// 🗃️ Receipt Store - In-memory, append-only
//
// Identity is a random UUID assigned at insert time; the receipt itself is
// an immutable value. Nothing is ever updated or removed.

use crate::receipt::Receipt;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use uuid::Uuid;

/// A receipt together with the identity it was stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReceipt {
    pub id: String,
    pub receipt: Receipt,
    pub stored_at: DateTime<Utc>,
}

/// Thread-safe map from receipt id to receipt.
///
/// Construct once and share behind an `Arc`. Every lock is held only for the
/// map access itself; callers get clones and do their work outside.
pub struct ReceiptStore {
    receipts: RwLock<HashMap<String, StoredReceipt>>,
}

impl ReceiptStore {
    pub fn new() -> Self {
        ReceiptStore {
            receipts: RwLock::new(HashMap::new()),
        }
    }

    /// Store a receipt under a fresh UUID v4 and return the id.
    pub fn insert(&self, receipt: Receipt) -> String {
        let id = Uuid::new_v4().to_string();
        let stored = StoredReceipt {
            id: id.clone(),
            receipt,
            stored_at: Utc::now(),
        };
        tracing::debug!(id = %stored.id, stored_at = %stored.stored_at, "receipt stored");

        // Values are written whole, so a poisoned map is still consistent.
        self.receipts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), stored);

        id
    }

    /// Receipt stored under `id`, if any.
    pub fn get(&self, id: &str) -> Option<Receipt> {
        self.get_stored(id).map(|stored| stored.receipt)
    }

    /// Receipt plus its store metadata.
    pub fn get_stored(&self, id: &str) -> Option<StoredReceipt> {
        self.receipts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.receipts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ReceiptStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
