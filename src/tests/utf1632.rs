use crate::entity::ProbingState;
use crate::probers::utf1632::Utf1632Prober;
use crate::probers::CharsetProber;

#[test]
fn test_detects_utf32be() {
    let mut prober = Utf1632Prober::new();
    let state = prober.feed(&b"\x00\x00\x00A".repeat(10));
    assert_eq!(state, ProbingState::FoundIt);
    assert_eq!(prober.charset_name(), Some("UTF-32BE"));
    assert_eq!(prober.get_confidence(), 0.99);
}

#[test]
fn test_detects_utf32le() {
    let mut prober = Utf1632Prober::new();
    prober.feed(&b"A\x00\x00\x00".repeat(10));
    assert_eq!(prober.charset_name(), Some("UTF-32LE"));
}

#[test]
fn test_detects_utf16be() {
    let mut prober = Utf1632Prober::new();
    prober.feed(&b"\x00A\x00B".repeat(10));
    assert_eq!(prober.charset_name(), Some("UTF-16BE"));
}

#[test]
fn test_detects_utf16le() {
    let mut prober = Utf1632Prober::new();
    prober.feed(&b"A\x00B\x00".repeat(10));
    assert_eq!(prober.charset_name(), Some("UTF-16LE"));
}

#[test]
fn test_no_name_while_undecided() {
    let mut prober = Utf1632Prober::new();
    let state = prober.feed(b"just some plain ascii text, no zeros anywhere");
    assert_eq!(state, ProbingState::Detecting);
    assert_eq!(prober.charset_name(), None);
    assert_eq!(prober.get_confidence(), 0.5);
}

#[test]
fn test_orphan_low_surrogate_invalidates_utf16be() {
    let mut prober = Utf1632Prober::new();
    prober.feed(b"\xdc\x00");
    assert!(prober.invalid_utf16be);
    // Read little-endian the same pair is the harmless U+00DC.
    assert!(!prober.invalid_utf16le);
}

#[test]
fn test_valid_surrogate_pair_keeps_utf16be_valid() {
    let mut prober = Utf1632Prober::new();
    // U+1F600 as UTF-16BE: high surrogate D83D, low surrogate DE00.
    prober.feed(b"\xd8\x3d\xde\x00");
    assert!(!prober.invalid_utf16be);
}

#[test]
fn test_orphan_low_surrogate_after_regular_units() {
    let mut prober = Utf1632Prober::new();
    prober.feed(b"\x00A\x00B\xde\x00");
    assert!(prober.invalid_utf16be);
}

#[test]
fn test_surrogate_invalidity_is_sticky() {
    let mut prober = Utf1632Prober::new();
    prober.feed(b"\xdc\x00");
    assert!(prober.invalid_utf16be);
    // Perfectly valid pairs afterwards do not clear the flag.
    prober.feed(&b"\x00A".repeat(16));
    assert!(prober.invalid_utf16be);
    assert_eq!(prober.charset_name(), None);
}

#[test]
fn test_invalid_utf32_codepoint() {
    let mut prober = Utf1632Prober::new();
    // 0x00110000 is above the Unicode ceiling in both byte orders.
    prober.feed(b"\x00\x11\x00\x00");
    assert!(prober.invalid_utf32be);
}

#[test]
fn test_detection_needs_minimum_bytes() {
    let mut prober = Utf1632Prober::new();
    let state = prober.feed(&b"\x00A".repeat(9));
    // 18 bytes seen: below the detection minimum.
    assert_eq!(state, ProbingState::Detecting);
    assert_eq!(prober.charset_name(), None);

    let state = prober.feed(b"\x00B");
    assert_eq!(state, ProbingState::FoundIt);
    assert_eq!(prober.charset_name(), Some("UTF-16BE"));
}

#[test]
fn test_reset_restores_initial_state() {
    let mut prober = Utf1632Prober::new();
    prober.feed(&b"\x00A".repeat(20));
    assert_eq!(prober.state(), ProbingState::FoundIt);

    prober.reset();
    assert_eq!(prober.state(), ProbingState::Detecting);
    assert_eq!(prober.charset_name(), None);
    assert!(!prober.invalid_utf16be);
}
