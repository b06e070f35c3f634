// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types. None of these cross an interaction handler: handlers log and
//! carry on.

/// The container is missing a node the viewport needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// No viewport node to receive the transform.
    #[error("canvas surface has no viewport node")]
    MissingViewport,
    /// No content node to measure.
    #[error("canvas surface has no content node")]
    MissingContent,
}

/// A [`StateStore`](crate::storage::StateStore) operation failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backend cannot be reached (e.g. storage disabled by the browser).
    #[error("storage unavailable")]
    Unavailable,
    /// The backend refused the write for lack of space.
    #[error("storage quota exceeded")]
    QuotaExceeded,
    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Configuration could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON was malformed or had the wrong shape.
    #[error("invalid canvas config: {0}")]
    Json(#[from] serde_json::Error),
}
