use ahash::HashMap;
use once_cell::sync::Lazy;
use std::iter::FromIterator;

/// Confidence a prober must exceed on `close` for its verdict to be kept.
pub const MINIMUM_THRESHOLD: f64 = 0.20;

/// Confidence reported for the `windows-1252` fallback verdict.
pub(crate) const WINDOWS_1252_FALLBACK_CONFIDENCE: f64 = 0.90;

/// Byte-order marks, checked against the very start of the stream.
/// The four-byte UTF-32 marks must stay ahead of the UTF-16 ones: the
/// UTF-32LE mark begins with the UTF-16LE mark.
pub(crate) static ENCODING_MARKS: Lazy<Vec<(&'static str, &'static [u8])>> = Lazy::new(|| {
    vec![
        ("UTF-8-SIG", b"\xef\xbb\xbf".as_slice()),
        ("UTF-32LE", b"\xff\xfe\x00\x00".as_slice()),
        ("UTF-32BE", b"\x00\x00\xfe\xff".as_slice()),
        ("UTF-16LE", b"\xff\xfe".as_slice()),
        ("UTF-16BE", b"\xfe\xff".as_slice()),
    ]
});

/// ISO-8859-* labels rewritten to their Windows superset when bytes from the
/// `0x80..=0x9F` range were observed in the stream.
pub(crate) static ISO_WIN_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from_iter([
        ("iso-8859-1", "Windows-1252"),
        ("iso-8859-2", "Windows-1250"),
        ("iso-8859-5", "Windows-1251"),
        ("iso-8859-6", "Windows-1256"),
        ("iso-8859-7", "Windows-1253"),
        ("iso-8859-8", "Windows-1255"),
        ("iso-8859-9", "Windows-1254"),
        ("iso-8859-13", "Windows-1257"),
    ])
});
