use crate::assets::{ISO_8859_5_MODEL, KOI8_R_MODEL, WINDOWS_1251_MODEL};
use crate::detect;
use crate::entity::ProbingState;
use crate::probers::sbcs::SingleByteProber;
use crate::probers::CharsetProber;

// "привет мир на самом деле просто набор слов текста" in three byte layouts.
const RUSSIAN_CP1251: &[u8] =
    b"\xef\xf0\xe8\xe2\xe5\xf2 \xec\xe8\xf0 \xed\xe0 \xf1\xe0\xec\xee\xec \xe4\xe5\xeb\xe5 \
      \xef\xf0\xee\xf1\xf2\xee \xed\xe0\xe1\xee\xf0 \xf1\xeb\xee\xe2 \xf2\xe5\xea\xf1\xf2\xe0 ";
const RUSSIAN_KOI8R: &[u8] =
    b"\xd0\xd2\xc9\xd7\xc5\xd4 \xcd\xc9\xd2 \xce\xc1 \xd3\xc1\xcd\xcf\xcd \xc4\xc5\xcc\xc5 \
      \xd0\xd2\xcf\xd3\xd4\xcf \xce\xc1\xc2\xcf\xd2 \xd3\xcc\xcf\xd7 \xd4\xc5\xcb\xd3\xd4\xc1 ";
const RUSSIAN_ISO_8859_5: &[u8] =
    b"\xdf\xe0\xd8\xd2\xd5\xe2 \xdc\xd8\xe0 \xdd\xd0 \xe1\xd0\xdc\xde\xdc \xd4\xd5\xdb\xd5 \
      \xdf\xe0\xde\xe1\xe2\xde \xdd\xd0\xd1\xde\xe0 \xe1\xdb\xde\xd2 \xe2\xd5\xda\xe1\xe2\xd0 ";

fn repeated(text: &[u8], times: usize) -> Vec<u8> {
    text.repeat(times)
}

#[test]
fn test_windows_1251_scores_its_own_text() {
    let mut prober = SingleByteProber::new(&WINDOWS_1251_MODEL);
    prober.feed(&repeated(RUSSIAN_CP1251, 3));
    assert_eq!(prober.state(), ProbingState::Detecting);
    assert!(prober.get_confidence() > 0.6);
}

#[test]
fn test_own_layout_beats_the_other_cyrillic_layouts() {
    for (text, winner) in [
        (RUSSIAN_CP1251, "windows-1251"),
        (RUSSIAN_KOI8R, "KOI8-R"),
        (RUSSIAN_ISO_8859_5, "ISO-8859-5"),
    ] {
        let input = repeated(text, 3);
        let mut best = ("", 0.0f64);
        for model in [&WINDOWS_1251_MODEL, &KOI8_R_MODEL, &ISO_8859_5_MODEL] {
            let mut prober = SingleByteProber::new(model);
            prober.feed(&input);
            let confidence = prober.get_confidence();
            if confidence > best.1 {
                best = (model.charset_name, confidence);
            }
        }
        assert_eq!(best.0, winner, "wrong winner for {}", winner);
    }
}

#[test]
fn test_ascii_only_input_is_inconclusive() {
    let mut prober = SingleByteProber::new(&WINDOWS_1251_MODEL);
    // ASCII letters sit outside the 64-order sample: no sequences form.
    prober.feed(b"the quick brown fox jumps over the lazy dog");
    assert_eq!(prober.get_confidence(), 0.01);
}

#[test]
fn test_rare_bigrams_go_not_me() {
    let mut prober = SingleByteProber::new(&WINDOWS_1251_MODEL);
    // An endless run of a very unlikely bigram crosses the negative
    // shortcut once enough sequences accumulated.
    let state = prober.feed(&b"\xfd\xf4".repeat(1100));
    assert_eq!(state, ProbingState::NotMe);
    assert_eq!(prober.get_confidence(), 0.01);
}

#[test]
fn test_reset_restores_initial_state() {
    let mut prober = SingleByteProber::new(&WINDOWS_1251_MODEL);
    prober.feed(&b"\xfd\xf4".repeat(1100));
    assert_eq!(prober.state(), ProbingState::NotMe);
    prober.reset();
    assert_eq!(prober.state(), ProbingState::Detecting);
    prober.feed(&repeated(RUSSIAN_CP1251, 3));
    assert!(prober.get_confidence() > 0.6);
}

#[test]
fn test_windows_1251_end_to_end() {
    let verdict = detect(&repeated(RUSSIAN_CP1251, 3));
    assert_eq!(verdict.encoding, Some("windows-1251"));
    assert_eq!(verdict.language, Some("Russian"));
    assert!(verdict.confidence > 0.2);
}

#[test]
fn test_koi8_r_end_to_end() {
    let verdict = detect(&repeated(RUSSIAN_KOI8R, 3));
    assert_eq!(verdict.encoding, Some("KOI8-R"));
    assert_eq!(verdict.language, Some("Russian"));
}

#[test]
fn test_iso_8859_5_rewritten_to_windows_1251() {
    // The text itself is ISO-8859-5, but a stray 0x90 byte marks the stream
    // as Windows-flavored, so the ISO name is upgraded on close.
    let mut input = repeated(RUSSIAN_ISO_8859_5, 3);
    input.extend_from_slice(b"\x90 ");
    input.extend_from_slice(RUSSIAN_ISO_8859_5);
    let verdict = detect(&input);
    assert_eq!(verdict.encoding, Some("Windows-1251"));
    assert_eq!(verdict.language, Some("Russian"));
}

#[test]
fn test_iso_8859_5_without_win_bytes_keeps_its_name() {
    let verdict = detect(&repeated(RUSSIAN_ISO_8859_5, 3));
    assert_eq!(verdict.encoding, Some("ISO-8859-5"));
}
