//! GBK text conversion for server notices.

use std::borrow::Cow;

use encoding_rs::GBK;

use crate::error::{Error, Result};

/// Decode GBK bytes into a UTF-8 string, failing on malformed input.
pub fn gbk_to_utf8(bytes: &[u8]) -> Result<String> {
    GBK.decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
        .ok_or_else(|| Error::Decode(format!("invalid GBK sequence in {} bytes", bytes.len())))
}

/// Decode GBK bytes, replacing malformed sequences with U+FFFD.
pub fn gbk_to_utf8_lossy(bytes: &[u8]) -> Cow<'_, str> {
    GBK.decode_without_bom_handling(bytes).0
}
