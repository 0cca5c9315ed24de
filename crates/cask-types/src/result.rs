//! Outcome types for store operations.
//!
//! Store operations never fail with an error: every outcome, including
//! contention and missing data, is reported as an [`OperationResult`]
//! carrying a [`StoreStatus`]. Callers inspect `success`/`status`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cas::CasToken;
use crate::document::Document;

/// Outcome code of a get or set. Variants are mutually exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoreStatus {
    /// The operation was applied (set) or the item was found (get).
    Succeeded,
    /// No collection with the requested name exists.
    CollectionNotFound,
    /// The key is blank or has never been written.
    KeyNotFound,
    /// The presented token does not match the item's current token.
    CasMismatch,
    /// Another writer created the key between lookup and insert.
    ConcurrentCreate,
    /// The item lock could not be acquired within the configured timeout.
    SetTimeout,
    /// The stored value could not be viewed as the requested type.
    InvalidCast,
}

impl StoreStatus {
    /// Returns `true` only for [`StoreStatus::Succeeded`].
    pub fn is_success(self) -> bool {
        self == StoreStatus::Succeeded
    }

    /// Stable string name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "Succeeded",
            Self::CollectionNotFound => "CollectionNotFound",
            Self::KeyNotFound => "KeyNotFound",
            Self::CasMismatch => "CasMismatch",
            Self::ConcurrentCreate => "ConcurrentCreate",
            Self::SetTimeout => "SetTimeout",
            Self::InvalidCast => "InvalidCast",
        }
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value-typed outcome of a get or set call.
///
/// `success` is `true` exactly when `status` is [`StoreStatus::Succeeded`].
/// `cas` and `document` are only meaningful on success: `cas` is the item's
/// version after the operation and `document` the value read or written.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResult<T> {
    pub collection: String,
    pub key: String,
    pub cas: CasToken,
    pub document: Option<T>,
    pub success: bool,
    pub message: String,
    pub status: StoreStatus,
}

impl<T> OperationResult<T> {
    /// A successful outcome at version `cas`.
    pub fn succeeded(
        collection: impl Into<String>,
        key: impl Into<String>,
        cas: CasToken,
        document: T,
    ) -> Self {
        Self {
            collection: collection.into(),
            key: key.into(),
            cas,
            document: Some(document),
            success: true,
            message: "Success".into(),
            status: StoreStatus::Succeeded,
        }
    }

    /// A failed outcome. `status` must not be [`StoreStatus::Succeeded`].
    pub fn failed(
        collection: impl Into<String>,
        key: impl Into<String>,
        status: StoreStatus,
        message: impl Into<String>,
    ) -> Self {
        debug_assert!(!status.is_success(), "failed() called with Succeeded");
        Self {
            collection: collection.into(),
            key: key.into(),
            cas: CasToken::ZERO,
            document: None,
            success: false,
            message: message.into(),
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Re-type a result that carries no document.
    ///
    /// Any document present is dropped.
    pub fn cast_failure<U>(self) -> OperationResult<U> {
        OperationResult {
            collection: self.collection,
            key: self.key,
            cas: self.cas,
            document: None,
            success: self.success,
            message: self.message,
            status: self.status,
        }
    }

    /// The read view of a successful outcome.
    pub fn into_document(self) -> Option<Document<T>> {
        if !self.success {
            return None;
        }
        let value = self.document?;
        Some(Document {
            collection: self.collection,
            key: self.key,
            cas: self.cas,
            value,
        })
    }
}

impl<T> From<Document<T>> for OperationResult<T> {
    fn from(doc: Document<T>) -> Self {
        Self::succeeded(doc.collection, doc.key, doc.cas, doc.value)
    }
}
