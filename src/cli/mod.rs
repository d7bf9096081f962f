//! Interactive terminal front end. All ledger semantics live in the core
//! services; this layer only prompts, renders, and persists.

pub mod output;
pub mod render;
pub mod session;

use thiserror::Error;

use crate::errors::StorageError;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Dialog(#[from] dialoguer::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub use session::Session;
