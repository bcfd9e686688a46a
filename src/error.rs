//! Error types for the category list.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListError {
    #[error("Cannot render - too many rows (rowCount: {row_count}, limit: {limit})")]
    TooManyRows { row_count: usize, limit: usize },

    #[error("render failed: {0}")]
    Render(#[source] anyhow::Error),

    #[error("invalid snapshot: {0}")]
    Snapshot(String),

    #[error("invalid property value: {0}")]
    InvalidProperty(String),
}
