use creditsafe_rs::{CreditsafeMessages, MessageKind, MessageLookup};

#[test]
fn informational_codes_are_not_errors() {
    for code in ["010", "011", "012", "013"] {
        let msg = CreditsafeMessages.for_code(code);
        assert_eq!(msg.kind, MessageKind::Info, "{code}");
        assert!(!msg.is_error, "{code}");
    }
}

#[test]
fn failure_codes_are_errors_with_their_category() {
    let msg = CreditsafeMessages.for_code("024");
    assert!(msg.is_error);
    assert_eq!(msg.kind, MessageKind::Request);
    assert_eq!(msg.message, "Invalid country code");

    let msg = CreditsafeMessages.for_code("040");
    assert!(msg.is_error);
    assert_eq!(msg.kind, MessageKind::Account);

    let msg = CreditsafeMessages.for_code("051");
    assert!(msg.is_error);
    assert_eq!(msg.kind, MessageKind::Processing);
}

#[test]
fn short_numeric_codes_are_zero_padded() {
    assert_eq!(CreditsafeMessages.for_code("10").code, "010");
    assert_eq!(CreditsafeMessages.for_code(" 33 ").message, "Company not found");
}

#[test]
fn unknown_codes_are_errors() {
    let msg = CreditsafeMessages.for_code("999");
    assert!(msg.is_error);
    assert_eq!(msg.code, "999");
    assert!(msg.message.contains("Unknown error"));

    let msg = CreditsafeMessages.for_code("ABC");
    assert!(msg.is_error);
    assert_eq!(msg.code, "ABC");
}
