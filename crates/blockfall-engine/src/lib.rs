pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A piece that cannot be written into the board.
///
/// Collision checks keep every accepted move inside the board and off locked
/// cells, so this only surfaces after a permissive rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LockError {
    #[display("cell index {index} is outside the board")]
    OutOfBounds { index: isize },
    #[display("cell index {index} is already filled")]
    Occupied { index: usize },
}
