//! Handshake frame template and builder.
//!
//! The template is the complete vendor option payload the client sends. Its
//! first 23 bytes are kept in their on-wire (tagged) form; everything after
//! that is a fixed attribute block that is copied verbatim apart from the
//! hardware-address slot.

use bytes::{Bytes, BytesMut};
use std::ops::Range;
use tracing::debug;

use crate::crypto::{
    compute_tag, fold_prefix, obfuscate_header, reverse_byte, reverse_in_place,
    OBFUSCATED_FIELD_LEN, TAGGED_REGION_LEN, TAG_PREFIX_LEN,
};
use crate::error::{Error, Result};

/// Total template length.
pub const FRAME_LEN: usize = 471;

/// Header/option region covered by the integrity tag.
pub const TAGGED_REGION: Range<usize> = 0..TAGGED_REGION_LEN;

/// Position of the tag inside the header.
pub const TAG_RANGE: Range<usize> = TAG_PREFIX_LEN..TAGGED_REGION_LEN;

/// Leading field that may be obfuscated independently of the tag.
pub const OBFUSCATED_FIELD: Range<usize> = 0..OBFUSCATED_FIELD_LEN;

/// Vendor enterprise number opening the padding region.
pub const ENTERPRISE_FIELD: Range<usize> = 23..27;

/// NUL-padded executable name.
pub const EXECUTABLE_NAME_FIELD: Range<usize> = 27..59;

/// Opaque client constants between the executable name and the attributes.
pub const PREAMBLE_FIELD: Range<usize> = 59..70;

/// Vendor attribute list.
pub const ATTRIBUTE_LIST: Range<usize> = 70..466;

/// Six-byte hardware address slot (value of attribute 0x2d).
pub const HARDWARE_ADDRESS_FIELD: Range<usize> = 130..136;

/// Immutable handshake frame template.
pub static FRAME_TEMPLATE: [u8; FRAME_LEN] = [
    // header/option region, stored tagged
    0xff, 0xff, 0x37, 0x77, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xfd, 0x36,
    // padding/identity region
    0x00, 0x00, 0x13, 0x11, 0x38, 0x30, 0x32, 0x31, 0x78, 0x2e, 0x65, 0x78, 0x65, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x04, 0x0a, 0x00, 0x02, 0x00, 0x00, 0x00, 0x13, 0x11, 0x01, 0x8c, 0x1a,
    0x28, 0x00, 0x00, 0x13, 0x11, 0x17, 0x22, 0x36, 0x38, 0x44, 0x43, 0x31, 0x32, 0x33, 0x42, 0x37,
    0x45, 0x42, 0x32, 0x33, 0x39, 0x46, 0x32, 0x33, 0x41, 0x38, 0x43, 0x30, 0x30, 0x30, 0x33, 0x38,
    0x38, 0x34, 0x39, 0x38, 0x36, 0x33, 0x39, 0x1a, 0x0c, 0x00, 0x00, 0x13, 0x11, 0x18, 0x06, 0x00,
    0x00, 0x00, 0x00, 0x1a, 0x0e, 0x00, 0x00, 0x13, 0x11, 0x2d, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x1a, 0x08, 0x00, 0x00, 0x13, 0x11, 0x2f, 0x02, 0x1a, 0x09, 0x00, 0x00, 0x13, 0x11, 0x35,
    0x03, 0x01, 0x1a, 0x18, 0x00, 0x00, 0x13, 0x11, 0x36, 0x12, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1a, 0x18, 0x00, 0x00, 0x13, 0x11,
    0x38, 0x12, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xfe, 0x86,
    0x13, 0x4c, 0x1a, 0x88, 0x00, 0x00, 0x13, 0x11, 0x4d, 0x82, 0x36, 0x38, 0x64, 0x63, 0x31, 0x32,
    0x33, 0x62, 0x30, 0x37, 0x65, 0x62, 0x32, 0x33, 0x39, 0x66, 0x32, 0x33, 0x61, 0x38, 0x30, 0x64,
    0x63, 0x66, 0x32, 0x35, 0x38, 0x37, 0x35, 0x64, 0x30, 0x35, 0x37, 0x37, 0x30, 0x63, 0x37, 0x32,
    0x31, 0x65, 0x34, 0x35, 0x36, 0x34, 0x35, 0x65, 0x35, 0x33, 0x37, 0x61, 0x62, 0x33, 0x35, 0x31,
    0x62, 0x62, 0x36, 0x33, 0x31, 0x35, 0x35, 0x61, 0x65, 0x31, 0x36, 0x32, 0x36, 0x31, 0x36, 0x37,
    0x65, 0x62, 0x30, 0x39, 0x32, 0x32, 0x33, 0x65, 0x32, 0x61, 0x30, 0x61, 0x37, 0x38, 0x30, 0x33,
    0x31, 0x31, 0x36, 0x31, 0x61, 0x63, 0x30, 0x39, 0x64, 0x61, 0x32, 0x64, 0x63, 0x30, 0x37, 0x33,
    0x36, 0x39, 0x33, 0x61, 0x34, 0x66, 0x35, 0x61, 0x32, 0x39, 0x32, 0x38, 0x36, 0x37, 0x35, 0x31,
    0x66, 0x39, 0x37, 0x66, 0x34, 0x64, 0x30, 0x34, 0x36, 0x38, 0x1a, 0x28, 0x00, 0x00, 0x13, 0x11,
    0x39, 0x22, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x1a, 0x48, 0x00, 0x00, 0x13, 0x11, 0x54, 0x42, 0x48, 0x55, 0x53, 0x54, 0x4d, 0x4f,
    0x4f, 0x4e, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1a, 0x08, 0x00, 0x00, 0x13, 0x11,
    0x55, 0x02, 0x1a, 0x09, 0x00, 0x00, 0x13, 0x11, 0x62, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Return a fresh, mutable copy of the template.
pub fn materialize_frame() -> BytesMut {
    BytesMut::from(&FRAME_TEMPLATE[..])
}

/// The 21 header bytes the template's tag was computed from.
pub fn template_header_prefix() -> [u8; TAG_PREFIX_LEN] {
    let mut prefix = [0u8; TAG_PREFIX_LEN];
    prefix.copy_from_slice(&FRAME_TEMPLATE[..TAG_PREFIX_LEN]);
    reverse_in_place(&mut prefix);
    prefix
}

/// Read the raw (un-reversed) tag from a tagged frame.
pub fn frame_tag(frame: &[u8]) -> Result<[u8; 2]> {
    let tag = frame
        .get(TAG_RANGE)
        .ok_or_else(|| Error::too_short(TAGGED_REGION_LEN, frame.len()))?;
    Ok([reverse_byte(tag[0]), reverse_byte(tag[1])])
}

/// Check the tag of a frame the way the authenticating peer does.
pub fn verify_tag(frame: &[u8]) -> Result<bool> {
    let region = frame
        .get(TAGGED_REGION)
        .ok_or_else(|| Error::too_short(TAGGED_REGION_LEN, frame.len()))?;
    let mut plain = [0u8; TAGGED_REGION_LEN];
    plain.copy_from_slice(region);
    reverse_in_place(&mut plain);
    Ok(fold_prefix(&plain)? == [plain[21], plain[22]])
}

/// Builds tagged handshake frames from the template.
#[derive(Debug, Clone)]
pub struct HandshakeFrameBuilder {
    header_prefix: [u8; TAG_PREFIX_LEN],
    hardware_address: Option<[u8; 6]>,
    obfuscate_leading_field: bool,
}

impl Default for HandshakeFrameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HandshakeFrameBuilder {
    /// Create a builder that reproduces the template header.
    pub fn new() -> Self {
        Self {
            header_prefix: template_header_prefix(),
            hardware_address: None,
            obfuscate_leading_field: false,
        }
    }

    /// Replace the 21 header bytes that feed the tag.
    pub fn header_prefix(mut self, prefix: [u8; TAG_PREFIX_LEN]) -> Self {
        self.header_prefix = prefix;
        self
    }

    /// Write `mac` into the hardware-address slot.
    pub fn hardware_address(mut self, mac: [u8; 6]) -> Self {
        self.hardware_address = Some(mac);
        self
    }

    /// Obfuscate the leading field after tagging.
    pub fn obfuscate_leading_field(mut self, enabled: bool) -> Self {
        self.obfuscate_leading_field = enabled;
        self
    }

    /// Materialize, patch and tag a frame.
    pub fn build(&self) -> Result<Bytes> {
        let mut frame = materialize_frame();
        frame[..TAG_PREFIX_LEN].copy_from_slice(&self.header_prefix);

        if let Some(mac) = self.hardware_address {
            frame[HARDWARE_ADDRESS_FIELD].copy_from_slice(&mac);
            debug!(
                "Patched hardware address {}",
                crate::adapter::format_mac(&mac)
            );
        }

        compute_tag(&mut frame)?;

        if self.obfuscate_leading_field {
            obfuscate_header(&mut frame[OBFUSCATED_FIELD], OBFUSCATED_FIELD_LEN)?;
            debug!("Obfuscated leading field");
        }

        debug!(
            "Built handshake frame: {} bytes, tag {:02x}{:02x}",
            frame.len(),
            frame[21],
            frame[22]
        );
        Ok(frame.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_length() {
        assert_eq!(FRAME_TEMPLATE.len(), FRAME_LEN);
        assert_eq!(materialize_frame().len(), FRAME_LEN);
    }

    #[test]
    fn test_materialize_is_a_copy() {
        let mut a = materialize_frame();
        a[100] ^= 0xFF;
        let b = materialize_frame();
        assert_eq!(&b[..], &FRAME_TEMPLATE[..]);
    }

    #[test]
    fn test_template_header_prefix() {
        let prefix = template_header_prefix();
        assert_eq!(&prefix[..4], &[0x00, 0x00, 0x13, 0x11]);
        assert!(prefix[4..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_template_tag_verifies() {
        assert!(verify_tag(&FRAME_TEMPLATE).unwrap());
        assert_eq!(frame_tag(&FRAME_TEMPLATE).unwrap(), [0x40, 0x93]);
    }

    #[test]
    fn test_default_build_reproduces_template() {
        let frame = HandshakeFrameBuilder::new().build().unwrap();
        assert_eq!(&frame[..], &FRAME_TEMPLATE[..]);
    }

    #[test]
    fn test_build_with_hardware_address() {
        let mac = [0x5E, 0x12, 0x34, 0x56, 0x78, 0x9A];
        let frame = HandshakeFrameBuilder::new()
            .hardware_address(mac)
            .build()
            .unwrap();

        assert_eq!(&frame[HARDWARE_ADDRESS_FIELD], &mac);
        assert_eq!(&frame[TAGGED_REGION], &FRAME_TEMPLATE[TAGGED_REGION]);
        assert_eq!(&frame[..130], &FRAME_TEMPLATE[..130]);
        assert_eq!(&frame[136..], &FRAME_TEMPLATE[136..]);
    }

    #[test]
    fn test_build_with_custom_prefix() {
        let mut prefix = [0u8; TAG_PREFIX_LEN];
        for (i, b) in prefix.iter_mut().enumerate() {
            *b = i as u8 + 1;
        }
        let frame = HandshakeFrameBuilder::new()
            .header_prefix(prefix)
            .build()
            .unwrap();

        assert!(verify_tag(&frame).unwrap());
        assert_eq!(frame_tag(&frame).unwrap(), [0xCD, 0xF0]);
        assert_eq!(&frame[23..], &FRAME_TEMPLATE[23..]);
    }

    #[test]
    fn test_build_obfuscated() {
        let frame = HandshakeFrameBuilder::new()
            .obfuscate_leading_field(true)
            .build()
            .unwrap();

        let expected: Vec<u8> = FRAME_TEMPLATE[OBFUSCATED_FIELD]
            .iter()
            .map(|b| reverse_byte(*b))
            .collect();
        assert_eq!(&frame[OBFUSCATED_FIELD], &expected[..]);
        assert_eq!(&frame[4..], &FRAME_TEMPLATE[4..]);
    }

    #[test]
    fn test_verify_detects_corruption() {
        let mut frame = materialize_frame();
        frame[5] ^= 0x01;
        assert!(!verify_tag(&frame).unwrap());
    }

    #[test]
    fn test_verify_short_frame() {
        assert!(verify_tag(&[0u8; 10]).is_err());
        assert!(frame_tag(&[0u8; 22]).is_err());
    }

    #[test]
    fn test_executable_name() {
        let name = &FRAME_TEMPLATE[EXECUTABLE_NAME_FIELD];
        assert_eq!(&name[..9], b"8021x.exe");
        assert!(name[9..].iter().all(|b| *b == 0));
        assert_eq!(&FRAME_TEMPLATE[ENTERPRISE_FIELD], &[0x00, 0x00, 0x13, 0x11]);
    }
}
