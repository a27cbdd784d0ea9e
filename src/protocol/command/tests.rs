use super::*;

#[test]
/// Node bytes map both ways; anything else is rejected.
fn test_node_bytes() {
    assert_eq!(Node::from_byte(Node::Can1.to_byte()), Some(Node::Can1));
    assert_eq!(Node::from_byte(Node::Can2.to_byte()), Some(Node::Can2));
    assert_eq!(Node::from_byte(0x00), None);
    assert_eq!(Node::from_byte(0x03), None);
}

#[test]
/// Every command code is wire-stable and round-trips through its byte.
fn test_command_code_bytes() {
    let all = [
        (CommandCode::Message, 0x01),
        (CommandCode::Ack, 0x02),
        (CommandCode::Nak, 0x03),
        (CommandCode::Baud, 0x04),
        (CommandCode::Info, 0x05),
        (CommandCode::Hardware, 0x06),
        (CommandCode::Version, 0x07),
        (CommandCode::Frequency, 0x08),
        (CommandCode::CanBtr, 0x09),
    ];
    for (code, byte) in all {
        assert_eq!(code.to_byte(), byte);
        assert_eq!(CommandCode::from_byte(byte), Some(code));
    }
    assert_eq!(CommandCode::from_byte(0x00), None);
    assert_eq!(CommandCode::from_byte(0xFF), None);
}
