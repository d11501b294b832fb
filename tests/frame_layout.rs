// Conformance vectors for the tagged header and the template layout.

use rjsocks::crypto::{compute_tag, obfuscate_header, reverse_byte, OBFUSCATED_FIELD_LEN};
use rjsocks::packet::{
    find_attribute, materialize_frame, verify_tag, vendor_attributes, HandshakeFrameBuilder,
    FRAME_TEMPLATE, HARDWARE_ADDRESS_FIELD, HARDWARE_ADDRESS_KIND, TAGGED_REGION,
};
use rjsocks::Error;

#[test]
fn all_zero_buffer_vector() {
    let mut buf = [0u8; 30];
    compute_tag(&mut buf).unwrap();
    assert!(buf[..23].iter().all(|b| *b == 0xFF));
    assert!(buf[23..].iter().all(|b| *b == 0x00));
}

#[test]
fn four_zero_bytes_obfuscation_vector() {
    let mut buf = [0u8; 4];
    obfuscate_header(&mut buf, OBFUSCATED_FIELD_LEN).unwrap();
    assert_eq!(buf, [0xFF; 4]);
    obfuscate_header(&mut buf, OBFUSCATED_FIELD_LEN).unwrap();
    assert_eq!(buf, [0x00; 4]);
}

#[test]
fn template_header_is_tag_of_enterprise_prefix() {
    let mut header = [0u8; 23];
    header[..4].copy_from_slice(&[0x00, 0x00, 0x13, 0x11]);
    compute_tag(&mut header).unwrap();
    assert_eq!(&header[..], &FRAME_TEMPLATE[TAGGED_REGION]);
    assert_eq!(&header[21..], &[0xFD, 0x36]);
}

#[test]
fn compute_tag_on_template_copy_keeps_tail() {
    let mut frame = materialize_frame();
    compute_tag(&mut frame).unwrap();
    assert_eq!(&frame[23..], &FRAME_TEMPLATE[23..]);

    let expected_prefix: Vec<u8> = FRAME_TEMPLATE[..21].iter().map(|b| reverse_byte(*b)).collect();
    assert_eq!(&frame[..21], &expected_prefix[..]);
}

#[test]
fn short_buffer_is_reported() {
    let mut buf = vec![0xA5u8; 22];
    let err = compute_tag(&mut buf).unwrap_err();
    assert!(err.is_input_error());
    assert!(matches!(err, Error::BufferTooShort { needed: 23, actual: 22 }));
    assert!(buf.iter().all(|b| *b == 0xA5));
}

#[test]
fn built_frame_verifies_and_carries_mac() {
    let mac = [0x00, 0x1B, 0x21, 0x0A, 0x0B, 0x0C];
    let frame = HandshakeFrameBuilder::new().hardware_address(mac).build().unwrap();

    assert_eq!(frame.len(), FRAME_TEMPLATE.len());
    assert!(verify_tag(&frame).unwrap());

    let attr = find_attribute(&frame, HARDWARE_ADDRESS_KIND).unwrap().unwrap();
    assert_eq!(attr.value, &mac);
    assert_eq!(attr.value_range(), HARDWARE_ADDRESS_FIELD);

    let differing: Vec<usize> = (0..frame.len())
        .filter(|&i| frame[i] != FRAME_TEMPLATE[i])
        .collect();
    assert!(differing.iter().all(|i| HARDWARE_ADDRESS_FIELD.contains(i)));
}

#[test]
fn built_frame_attributes_parse() {
    let frame = HandshakeFrameBuilder::new().build().unwrap();
    let count = vendor_attributes(&frame)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
        .len();
    assert_eq!(count, 12);
}
