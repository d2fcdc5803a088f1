//! Tests for `Channel`.

use super::Channel;

#[test]
fn whatsapp_prefixes_bare_number() {
    let channel = Channel::whatsapp();
    assert_eq!(channel.address("+905551234567"), "whatsapp:+905551234567");
}

#[test]
fn already_prefixed_address_is_unchanged() {
    let channel = Channel::whatsapp();
    assert_eq!(
        channel.address("whatsapp:+14155238886"),
        "whatsapp:+14155238886"
    );
}

#[test]
fn scheme_must_be_followed_by_colon_to_count_as_prefix() {
    let channel = Channel::whatsapp();
    assert_eq!(channel.address("whatsapp123"), "whatsapp:whatsapp123");
}

#[test]
fn trailing_colon_in_scheme_is_stripped() {
    let channel = Channel::new("whatsapp:");
    assert_eq!(channel.scheme(), "whatsapp");
    assert_eq!(channel.address("+1"), "whatsapp:+1");
}

#[test]
fn empty_scheme_leaves_address_untouched() {
    let channel = Channel::new("");
    assert_eq!(channel.address("+905551234567"), "+905551234567");
    assert_eq!(channel.to_string(), "sms");
}

#[test]
fn default_is_whatsapp() {
    assert_eq!(Channel::default(), Channel::whatsapp());
    assert_eq!(Channel::default().to_string(), "whatsapp");
}
