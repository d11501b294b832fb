//! Handshake frame construction.
//!
//! This module contains:
//! - The immutable frame template and its region layout
//! - A builder that patches, tags and optionally obfuscates a copy
//! - A walker over the vendor attributes of the identity region

pub mod attribute;
pub mod frame;

pub use attribute::{
    find_attribute, vendor_attributes, VendorAttribute, VendorAttributes, ENTERPRISE_ID,
    HARDWARE_ADDRESS_KIND, VENDOR_ATTRIBUTE_TAG,
};
pub use frame::{
    frame_tag, materialize_frame, template_header_prefix, verify_tag, HandshakeFrameBuilder,
    ATTRIBUTE_LIST, ENTERPRISE_FIELD, EXECUTABLE_NAME_FIELD, FRAME_LEN, FRAME_TEMPLATE,
    HARDWARE_ADDRESS_FIELD, OBFUSCATED_FIELD, PREAMBLE_FIELD, TAGGED_REGION, TAG_RANGE,
};
