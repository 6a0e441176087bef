//! charset-detector-rs
//! ===================
//!
//! Streaming universal character encoding detector, Rust version.
//!
//! This library guesses the character encoding of an opaque byte stream. It
//! fuses a set of independent statistical probers (byte-order marks,
//! zero-byte positional analysis for UTF-16/32, multi-byte CJK character
//! distributions, single-byte bigram models, Latin-1 heuristics and the
//! ISO-2022 escape family) into a single verdict with a confidence in
//! `[0.0, 1.0]` and an optional language tag.
//!
//! Detection is incremental: push chunks with [`UniversalDetector::feed`],
//! stop as soon as [`UniversalDetector::done`] turns true, and always call
//! [`UniversalDetector::close`] to obtain a best-effort verdict even when no
//! prober crossed its own acceptance threshold.
//!
//! # Examples:
//!
//! One-shot detection over a complete buffer:
//!
//! ```rust
//! use charset_detector_rs::detect;
//!
//! let verdict = detect(b"Hello, World!");
//! assert_eq!(verdict.encoding, Some("ascii"));
//! assert_eq!(verdict.confidence, 1.0);
//! ```
//!
//! Incremental detection with early termination on a byte-order mark:
//!
//! ```rust
//! use charset_detector_rs::entity::LanguageFilter;
//! use charset_detector_rs::UniversalDetector;
//!
//! let mut detector = UniversalDetector::new(LanguageFilter::ALL);
//! detector.feed(b"\xef\xbb\xbfHello");
//! assert!(detector.done());
//! assert_eq!(detector.close().encoding, Some("UTF-8-SIG"));
//! ```
//!
//! # CLI tool:
//!
//! A `chardetect` binary ships behind the `cli` feature:
//!
//! ```shell
//! cargo install charset-detector-rs --features cli
//! chardetect path/to/file.txt
//! ```
use crate::consts::{
    ENCODING_MARKS, ISO_WIN_MAP, MINIMUM_THRESHOLD, WINDOWS_1252_FALLBACK_CONFIDENCE,
};
use crate::entity::{DetectionResult, InputState, LanguageFilter, ProbingState};
use crate::probers::escape::EscCharsetProber;
use crate::probers::latin1::Latin1Prober;
use crate::probers::utf1632::Utf1632Prober;
use crate::probers::{mbcs, sbcs, CharsetProber};
use log::{debug, trace, warn};

mod assets;
pub mod consts;
mod distribution;
pub mod entity;
mod probers;
mod tests;

/// Coordinates all of the different charset probers and produces the final
/// verdict. See the crate documentation for the overall flow.
pub struct UniversalDetector {
    lang_filter: LanguageFilter,
    result: DetectionResult,
    done: bool,
    got_data: bool,
    input_state: InputState,
    last_byte: u8,
    has_win_bytes: bool,
    esc_charset_prober: Option<EscCharsetProber>,
    utf1632_prober: Option<Utf1632Prober>,
    charset_probers: Vec<Box<dyn CharsetProber>>,
}

impl UniversalDetector {
    pub fn new(lang_filter: LanguageFilter) -> Self {
        UniversalDetector {
            lang_filter,
            result: DetectionResult::default(),
            done: false,
            got_data: false,
            input_state: InputState::PureAscii,
            last_byte: 0,
            has_win_bytes: false,
            esc_charset_prober: None,
            utf1632_prober: None,
            charset_probers: vec![],
        }
    }

    /// The current best verdict. Only final once [`done`](Self::done) is true
    /// or [`close`](Self::close) has been called.
    pub fn result(&self) -> &DetectionResult {
        &self.result
    }

    /// True once a verdict has been latched; further `feed` calls are no-ops.
    pub fn done(&self) -> bool {
        self.done
    }

    /// Take a chunk of the document and run it through the relevant probers.
    pub fn feed(&mut self, byte_str: &[u8]) {
        if self.done || byte_str.is_empty() {
            return;
        }

        if !self.got_data {
            self.got_data = true;
            // The UTF-32 marks must be tried before the UTF-16 ones; the
            // list is ordered accordingly.
            for &(name, mark) in ENCODING_MARKS.iter() {
                if byte_str.starts_with(mark) {
                    debug!("detected {} by byte-order mark", name);
                    self.result = DetectionResult::new(name, 1.0, Some(""));
                    self.done = true;
                    return;
                }
            }
        }

        for &byte in byte_str {
            match self.input_state {
                InputState::PureAscii => {
                    if byte > 0x7F {
                        // Only a byte above 0xC0 jumps straight to
                        // high-byte mode; 0x80..=0xC0 passes through the
                        // escape class first.
                        if byte > 0xC0 {
                            trace!("input escalated to high-byte mode");
                            self.input_state = InputState::HighByte;
                        } else {
                            trace!("input escalated to escape-sequence mode");
                            self.input_state = InputState::EscAscii;
                        }
                    } else if byte == 0x1B || (byte == b'{' && self.last_byte == b'~') {
                        trace!("input escalated to escape-sequence mode");
                        self.input_state = InputState::EscAscii;
                    }
                }
                InputState::EscAscii => {
                    if byte > 0x7F {
                        trace!("input escalated to high-byte mode");
                        self.input_state = InputState::HighByte;
                    }
                }
                InputState::HighByte => {
                    if (0x80..=0x9F).contains(&byte) {
                        self.has_win_bytes = true;
                    }
                }
            }
            self.last_byte = byte;
        }

        // BOM-less UTF-16/32 of ASCII-range text never leaves the pure-ASCII
        // input class, so the positional prober sees every chunk.
        let utf1632 = self.utf1632_prober.get_or_insert_with(Utf1632Prober::new);
        if utf1632.state() == ProbingState::Detecting
            && utf1632.feed(byte_str) == ProbingState::FoundIt
        {
            self.result = verdict_from(utf1632);
            self.done = true;
            return;
        }

        match self.input_state {
            InputState::EscAscii => {
                let lang_filter = self.lang_filter;
                let prober = self
                    .esc_charset_prober
                    .get_or_insert_with(|| EscCharsetProber::new(lang_filter));
                if prober.feed(byte_str) == ProbingState::FoundIt {
                    self.result = verdict_from(prober);
                    self.done = true;
                }
            }
            InputState::HighByte => {
                if self.charset_probers.is_empty() {
                    trace!("high-byte data: setting up the charset prober bank");
                    self.charset_probers
                        .push(Box::new(mbcs::new_group(self.lang_filter)));
                    if self.lang_filter.intersects(LanguageFilter::NON_CJK) {
                        self.charset_probers
                            .push(Box::new(sbcs::new_group(self.lang_filter)));
                    }
                    self.charset_probers.push(Box::new(Latin1Prober::new()));
                }
                let mut latched = None;
                for prober in &mut self.charset_probers {
                    if prober.feed(byte_str) == ProbingState::FoundIt {
                        latched = Some(verdict_from(prober.as_ref()));
                        break;
                    }
                }
                if let Some(result) = latched {
                    debug!("prober locked in {}", result);
                    self.result = result;
                    self.done = true;
                }
            }
            InputState::PureAscii => {}
        }
    }

    /// Stop analyzing the current document and come up with a final verdict.
    /// Idempotent: repeated calls return the same result.
    pub fn close(&mut self) -> &DetectionResult {
        if self.done {
            return &self.result;
        }
        self.done = true;

        if !self.got_data {
            warn!("no data received!");
            return &self.result;
        }

        match self.input_state {
            InputState::PureAscii => {
                self.result = DetectionResult::new("ascii", 1.0, Some(""));
            }
            InputState::HighByte => {
                // Best confidence wins, considering only probers that have
                // settled on a concrete charset; the positional prober has
                // none while it is still undecided.
                let mut best: Option<(&'static str, f64, Option<&'static str>)> = None;
                let candidates = self
                    .utf1632_prober
                    .iter()
                    .map(|prober| prober as &dyn CharsetProber)
                    .chain(self.charset_probers.iter().map(|prober| prober.as_ref()));
                for prober in candidates {
                    if let Some(name) = prober.charset_name() {
                        let confidence = prober.get_confidence();
                        if best.map_or(true, |(_, top, _)| confidence > top) {
                            best = Some((name, confidence, prober.language()));
                        }
                    }
                }
                match best {
                    Some((name, confidence, language)) if confidence > MINIMUM_THRESHOLD => {
                        let name = if self.has_win_bytes {
                            iso_to_windows(name)
                        } else {
                            name
                        };
                        self.result = DetectionResult {
                            encoding: Some(name),
                            confidence,
                            language,
                        };
                    }
                    _ if self.has_win_bytes => {
                        self.result = DetectionResult::new(
                            "windows-1252",
                            WINDOWS_1252_FALLBACK_CONFIDENCE,
                            Some(""),
                        );
                    }
                    _ => {}
                }
            }
            // Escape-heavy input that never matched a known escape family
            // stays undecided.
            InputState::EscAscii => {}
        }

        if self.result.is_undecided() {
            debug!("unable to determine any suitable charset");
        } else {
            debug!("final verdict: {}", self.result);
        }
        &self.result
    }

    /// Return the detector and all of its probers to their initial states,
    /// ready for a new document.
    pub fn reset(&mut self) {
        self.result = DetectionResult::default();
        self.done = false;
        self.got_data = false;
        self.input_state = InputState::PureAscii;
        self.last_byte = 0;
        self.has_win_bytes = false;
        self.esc_charset_prober = None;
        self.utf1632_prober = None;
        self.charset_probers.clear();
    }
}

impl Default for UniversalDetector {
    fn default() -> Self {
        UniversalDetector::new(LanguageFilter::ALL)
    }
}

/// One-shot convenience over [`UniversalDetector`]: feed the whole buffer
/// and close.
pub fn detect(byte_str: &[u8]) -> DetectionResult {
    let mut detector = UniversalDetector::new(LanguageFilter::ALL);
    detector.feed(byte_str);
    detector.close().clone()
}

fn verdict_from(prober: &dyn CharsetProber) -> DetectionResult {
    DetectionResult {
        encoding: prober.charset_name(),
        confidence: prober.get_confidence(),
        language: prober.language(),
    }
}

/// Single-byte verdicts on streams carrying `0x80..=0x9F` bytes are almost
/// always the Windows superset of the detected ISO page.
fn iso_to_windows(name: &'static str) -> &'static str {
    ISO_WIN_MAP
        .get(name.to_lowercase().as_str())
        .copied()
        .unwrap_or(name)
}
