pub mod board_ops;
pub mod drag;
pub mod reconcile;
pub mod workspace;

pub use board_ops::{ConfirmAction, EditTarget, PendingConfirm};
pub use drag::{DragSession, DragState};
pub use reconcile::snapshot;
pub use workspace::Workspace;

use crate::io::StoreError;
use crate::visual::ElementId;

/// Error type for board operations
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("cannot snapshot the board while a drag or edit is in progress")]
    GestureInProgress,
    #[error("a drag is already in progress")]
    DragAlreadyActive,
    #[error("no column with id `{0}`")]
    UnknownColumn(String),
    #[error("no such card: {0}")]
    UnknownCard(ElementId),
}
