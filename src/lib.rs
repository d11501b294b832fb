//! rjsocks: 802.1X vendor client handshake frames
//!
//! Builds the vendor option payload an access-control client sends during
//! authentication, embeds its integrity tag, and provides the adapter,
//! text and lease helpers the client drives around it.

pub mod adapter;
pub mod config;
pub mod crypto;
pub mod error;
pub mod lease;
pub mod packet;
pub mod text;

use adapter::InterfaceSource;

// Re-export main types
pub use config::ClientConfig;
pub use crypto::{compute_tag, obfuscate_header, reverse_byte};
pub use error::{Error, Result};
pub use packet::{materialize_frame, HandshakeFrameBuilder};

// Default configuration constants
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Build a tagged handshake frame for the adapter described by `config`.
///
/// The hardware address comes from the configuration override when set,
/// otherwise from looking up `config.adapter` in `source`.
pub fn build_frame(config: &ClientConfig, source: &dyn InterfaceSource) -> Result<bytes::Bytes> {
    let mac = match config.hardware_address_override()? {
        Some(mac) => mac,
        None => adapter::select_adapter(source, &config.adapter)?,
    };
    HandshakeFrameBuilder::new()
        .hardware_address(mac)
        .obfuscate_leading_field(config.obfuscate_leading_field)
        .build()
}
