//! Bit storage, the sequence value type, and cursors over it.

pub mod cursor;
pub mod rank_select;
pub mod sequence;
pub mod store;

pub use cursor::{BitCursor, CursorState};
pub use sequence::BitSequence;
pub use store::BitStore;
