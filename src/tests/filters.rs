use crate::probers::{filter_international_words, remove_xml_tags};

#[test]
fn test_international_words_collapse_to_spaces() {
    // The word, its one trailing marker byte and nothing else become one
    // space; the ASCII tail stays.
    assert_eq!(filter_international_words(b"ab\x80cd ef"), b" ef");
}

#[test]
fn test_ascii_text_passes_through() {
    assert_eq!(
        filter_international_words(b"nothing international here"),
        b"nothing international here"
    );
}

#[test]
fn test_only_one_marker_is_absorbed_per_word() {
    assert_eq!(filter_international_words(b"x\xc5re... ok"), b" .. ok");
}

#[test]
fn test_consecutive_international_words() {
    assert_eq!(filter_international_words(b"\xc5\xc6 \xc7\xc8"), b"  ");
}

#[test]
fn test_attached_ascii_letters_belong_to_the_word() {
    // Leading and trailing ASCII letters are part of the replaced span.
    assert_eq!(filter_international_words(b"one t\x83sts two"), b"one  two");
}

#[test]
fn test_remove_xml_tags() {
    let filtered = remove_xml_tags(b"<html><body>caf\xe9 <b>cr\xe8me</b></body>");
    assert_eq!(filtered, b"caf\xe9 cr\xe8me");
}

#[test]
fn test_remove_xml_tags_without_markup_is_identity() {
    assert_eq!(remove_xml_tags(b"plain text"), b"plain text");
}

#[test]
fn test_unclosed_tag_swallows_the_rest() {
    assert_eq!(remove_xml_tags(b"before <tag never closes"), b"before ");
}
