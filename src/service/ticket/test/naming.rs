use super::ticket_channel_name;

/// Tests the basic normalized ticket name.
///
/// Expected: lowercase with the ticket- prefix
#[test]
fn normalizes_simple_names() {
    assert_eq!(ticket_channel_name("Buyer"), "ticket-buyer");
    assert_eq!(ticket_channel_name("buyer42"), "ticket-buyer42");
}

/// Tests that runs of special characters collapse into single dashes.
///
/// Expected: one dash per run, no trailing dash
#[test]
fn collapses_special_characters() {
    assert_eq!(ticket_channel_name("Big   Spender!"), "ticket-big-spender");
    assert_eq!(ticket_channel_name("a__b..c"), "ticket-a-b-c");
    assert_eq!(ticket_channel_name("trailing..."), "ticket-trailing");
}

/// Tests that two distinct users can produce the same ticket name.
///
/// This collision is what makes the uniqueness check name-based rather than
/// identity-based; the behavior is preserved on purpose.
///
/// Expected: identical normalized names
#[test]
fn distinct_users_can_collide() {
    assert_eq!(
        ticket_channel_name("big spender"),
        ticket_channel_name("BIG.SPENDER")
    );
}
