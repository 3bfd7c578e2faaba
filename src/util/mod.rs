//! Internal lookup tables for byte-level bit manipulation.

pub(crate) mod table;
