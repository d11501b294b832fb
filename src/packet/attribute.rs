//! Vendor attribute walker for the padding/identity region.
//!
//! Layout of one attribute:
//!
//! ```text
//! 0x1a | total_len | 00 00 13 11 | kind | inner_len | value...
//! ```
//!
//! `total_len` counts the whole attribute, `inner_len` counts `kind`,
//! `inner_len` and the value. A zero byte where an attribute should start
//! ends the list.

use std::ops::Range;

use super::frame::ATTRIBUTE_LIST;
use crate::error::{Error, Result};

/// Leading byte of every vendor attribute.
pub const VENDOR_ATTRIBUTE_TAG: u8 = 0x1a;

/// Vendor enterprise number carried by every attribute.
pub const ENTERPRISE_ID: [u8; 4] = [0x00, 0x00, 0x13, 0x11];

/// Attribute kind holding the client hardware address.
pub const HARDWARE_ADDRESS_KIND: u8 = 0x2d;

/// Bytes before the value: tag, total_len, enterprise id, kind, inner_len.
const HEADER_LEN: usize = 8;

/// A single attribute borrowed from a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorAttribute<'a> {
    /// Absolute offset of the attribute's leading tag byte.
    pub offset: usize,
    /// Attribute kind.
    pub kind: u8,
    /// Attribute value.
    pub value: &'a [u8],
}

impl VendorAttribute<'_> {
    /// Absolute byte range of the value.
    pub fn value_range(&self) -> Range<usize> {
        let start = self.offset + HEADER_LEN;
        start..start + self.value.len()
    }

    /// Total encoded length including the header.
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.value.len()
    }
}

/// Iterator over the attributes of a byte slice.
#[derive(Debug, Clone)]
pub struct VendorAttributes<'a> {
    data: &'a [u8],
    base: usize,
    pos: usize,
    done: bool,
}

impl<'a> VendorAttributes<'a> {
    /// Walk `data`, reporting offsets relative to `base`.
    pub fn new(data: &'a [u8], base: usize) -> Self {
        Self {
            data,
            base,
            pos: 0,
            done: false,
        }
    }

    fn parse_at(&self, pos: usize) -> Result<VendorAttribute<'a>> {
        let offset = self.base + pos;
        let rest = &self.data[pos..];

        if rest[0] != VENDOR_ATTRIBUTE_TAG {
            return Err(Error::malformed(
                offset,
                format!("unexpected leading byte {:#04x}", rest[0]),
            ));
        }
        if rest.len() < HEADER_LEN {
            return Err(Error::malformed(offset, "truncated header"));
        }

        let total_len = usize::from(rest[1]);
        if total_len < HEADER_LEN {
            return Err(Error::malformed(
                offset,
                format!("length {total_len} shorter than header"),
            ));
        }
        if total_len > rest.len() {
            return Err(Error::malformed(
                offset,
                format!("length {total_len} overruns {} remaining bytes", rest.len()),
            ));
        }
        if rest[2..6] != ENTERPRISE_ID {
            return Err(Error::malformed(offset, "unknown enterprise id"));
        }

        let inner_len = usize::from(rest[7]);
        if inner_len + 6 != total_len {
            return Err(Error::malformed(
                offset,
                format!("inner length {inner_len} disagrees with total length {total_len}"),
            ));
        }

        Ok(VendorAttribute {
            offset,
            kind: rest[6],
            value: &rest[HEADER_LEN..total_len],
        })
    }
}

impl<'a> Iterator for VendorAttributes<'a> {
    type Item = Result<VendorAttribute<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.pos >= self.data.len() || self.data[self.pos] == 0 {
            return None;
        }
        match self.parse_at(self.pos) {
            Ok(attr) => {
                self.pos += attr.encoded_len();
                Some(Ok(attr))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Walk the attribute list of a handshake frame.
pub fn vendor_attributes(frame: &[u8]) -> Result<VendorAttributes<'_>> {
    let list = frame
        .get(ATTRIBUTE_LIST)
        .ok_or_else(|| Error::too_short(ATTRIBUTE_LIST.end, frame.len()))?;
    Ok(VendorAttributes::new(list, ATTRIBUTE_LIST.start))
}

/// Find the first attribute of `kind` in a handshake frame.
pub fn find_attribute(frame: &[u8], kind: u8) -> Result<Option<VendorAttribute<'_>>> {
    for attr in vendor_attributes(frame)? {
        let attr = attr?;
        if attr.kind == kind {
            return Ok(Some(attr));
        }
    }
    Ok(None)
}
