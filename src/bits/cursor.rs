//! Bidirectional cursor over the stored bits of a sequence.

use crate::bits::BitSequence;
use crate::error::{BitError, Result};

/// Where a [`BitCursor`] currently points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// Before the first bit; `next` moves to bit 0.
    BeforeStart,
    /// On a stored bit.
    At(usize),
    /// After the last bit; `previous` moves to the last bit.
    AfterEnd,
}

/// Stateful cursor over a [`BitSequence`].
///
/// Steps one stored bit at a time in either direction. The `with_*_flipped`
/// methods step and then derive a new sequence differing from the cursor's
/// sequence in exactly the bit now under the cursor.
#[derive(Clone, Copy, Debug)]
pub struct BitCursor<'a> {
    data: &'a BitSequence,
    state: CursorState,
}

impl<'a> BitCursor<'a> {
    /// Create a cursor before the first bit.
    pub fn new(data: &'a BitSequence) -> Self {
        Self {
            data,
            state: CursorState::BeforeStart,
        }
    }

    /// The sequence this cursor walks.
    #[inline]
    pub fn data(&self) -> &'a BitSequence {
        self.data
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Current position, if on a bit.
    #[inline]
    pub fn position(&self) -> Option<usize> {
        match self.state {
            CursorState::At(i) => Some(i),
            _ => None,
        }
    }

    /// Bit under the cursor, if on a bit.
    pub fn current_bit(&self) -> Option<bool> {
        self.position().map(|i| self.data.store.bit(i))
    }

    /// Can `next` succeed?
    pub fn has_next(&self) -> bool {
        match self.state {
            CursorState::BeforeStart => true,
            CursorState::At(i) => i + 1 < self.data.number_of_bits(),
            CursorState::AfterEnd => false,
        }
    }

    /// Can `previous` succeed?
    pub fn has_previous(&self) -> bool {
        match self.state {
            CursorState::BeforeStart => false,
            CursorState::At(i) => i > 0,
            CursorState::AfterEnd => true,
        }
    }

    /// Step forward one bit and return the new position.
    ///
    /// Fails, leaving the cursor where it was, when already on the last bit
    /// or after the end.
    pub fn next(&mut self) -> Result<usize> {
        let pos = match self.state {
            CursorState::BeforeStart => 0,
            CursorState::At(i) if i + 1 < self.data.number_of_bits() => i + 1,
            _ => {
                return Err(BitError::InvalidOperation(
                    "cursor has no next bit".into(),
                ))
            }
        };
        self.state = CursorState::At(pos);
        Ok(pos)
    }

    /// Step backward one bit and return the new position.
    ///
    /// Fails, leaving the cursor where it was, when already on the first bit
    /// or before the start.
    pub fn previous(&mut self) -> Result<usize> {
        let pos = match self.state {
            CursorState::AfterEnd => self.data.number_of_bits() - 1,
            CursorState::At(i) if i > 0 => i - 1,
            _ => {
                return Err(BitError::InvalidOperation(
                    "cursor has no previous bit".into(),
                ))
            }
        };
        self.state = CursorState::At(pos);
        Ok(pos)
    }

    /// Move before the first bit.
    pub fn reset(&mut self) {
        self.state = CursorState::BeforeStart;
    }

    /// Move after the last bit.
    pub fn set_to_end(&mut self) {
        self.state = CursorState::AfterEnd;
    }

    /// Step forward and return the sequence with that bit toggled.
    pub fn with_next_bit_flipped(&mut self) -> Result<BitSequence> {
        let pos = self.next()?;
        self.data.with_bit_flipped(pos)
    }

    /// Step backward and return the sequence with that bit toggled.
    pub fn with_previous_bit_flipped(&mut self) -> Result<BitSequence> {
        let pos = self.previous()?;
        self.data.with_bit_flipped(pos)
    }

    pub(crate) fn set_state(&mut self, state: CursorState) {
        self.state = state;
    }
}
