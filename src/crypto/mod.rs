//! Integrity and obfuscation primitives for the handshake frame.
//!
//! This module provides:
//! - Bit reversal with complement (an involution) for field obfuscation
//! - The table-driven integrity tag over the frame header

mod checksum;
mod reverse;

pub use checksum::{
    compute_tag, fold_prefix, FOLD_TABLE, TAGGED_REGION_LEN, TAG_LEN, TAG_PREFIX_LEN,
};
pub use reverse::{
    obfuscate_header, reverse_byte, reverse_in_place, OBFUSCATED_FIELD_LEN, REVERSE_TABLE,
};
