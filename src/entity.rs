use bitflags::bitflags;
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};

/////////////////////////////////////////////////////////////////////////////////////
// Probing & input states
/////////////////////////////////////////////////////////////////////////////////////

/// Lifecycle of a single prober. `FoundIt` and `NotMe` are terminal until the
/// prober is reset.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ProbingState {
    Detecting,
    FoundIt,
    NotMe,
}

/// Coarse classification of the byte stream seen so far. Transitions are
/// monotonic: `PureAscii -> EscAscii -> HighByte`, never backward.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub(crate) enum InputState {
    PureAscii,
    EscAscii,
    HighByte,
}

/////////////////////////////////////////////////////////////////////////////////////
// LanguageFilter
/////////////////////////////////////////////////////////////////////////////////////

/// Selects which language-specific probers the detector instantiates.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct LanguageFilter(u32);

bitflags! {
    impl LanguageFilter: u32 {
        const CHINESE_SIMPLIFIED  = 0b0000_0001;
        const CHINESE_TRADITIONAL = 0b0000_0010;
        const JAPANESE            = 0b0000_0100;
        const KOREAN              = 0b0000_1000;
        const NON_CJK             = 0b0001_0000;
        const CHINESE = Self::CHINESE_SIMPLIFIED.bits() | Self::CHINESE_TRADITIONAL.bits();
        const CJK = Self::CHINESE.bits() | Self::JAPANESE.bits() | Self::KOREAN.bits();
        const ALL = Self::CJK.bits() | Self::NON_CJK.bits();
    }
}

impl Default for LanguageFilter {
    fn default() -> Self {
        LanguageFilter::ALL
    }
}

impl fmt::Debug for LanguageFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/////////////////////////////////////////////////////////////////////////////////////
// DetectionResult
/////////////////////////////////////////////////////////////////////////////////////

/// The verdict of a detection run: a best-guess encoding label, a confidence
/// in `[0.0, 1.0]` and the language tag carried by the winning prober.
///
/// A result with `encoding == None` means the input was undecidable (or that
/// no data was ever fed).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionResult {
    pub encoding: Option<&'static str>,
    pub confidence: f64,
    pub language: Option<&'static str>,
}

impl DetectionResult {
    pub(crate) fn new(
        encoding: &'static str,
        confidence: f64,
        language: Option<&'static str>,
    ) -> Self {
        DetectionResult {
            encoding: Some(encoding),
            confidence,
            language,
        }
    }

    /// True when no encoding could be determined.
    pub fn is_undecided(&self) -> bool {
        self.encoding.is_none()
    }
}

impl Default for DetectionResult {
    fn default() -> Self {
        DetectionResult {
            encoding: None,
            confidence: 0.0,
            language: None,
        }
    }
}

impl Display for DetectionResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (confidence {:.2})",
            self.encoding.unwrap_or("undecided"),
            self.confidence
        )
    }
}
