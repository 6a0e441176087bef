use crate::entity::{LanguageFilter, ProbingState};
use crate::probers::CharsetProber;

//
// Escape-sequence detection for the 7-bit ISO-2022 family and HZ. These
// encodings announce themselves with fixed shift sequences, so detection is
// exact signature matching rather than statistics.
//

struct EscapeSequenceSet {
    charset_name: &'static str,
    language: &'static str,
    sequences: &'static [&'static [u8]],
}

static ISO_2022_JP: EscapeSequenceSet = EscapeSequenceSet {
    charset_name: "ISO-2022-JP",
    language: "Japanese",
    sequences: &[b"\x1b\x24\x40", b"\x1b\x24\x42", b"\x1b\x28\x4a"],
};

static ISO_2022_KR: EscapeSequenceSet = EscapeSequenceSet {
    charset_name: "ISO-2022-KR",
    language: "Korean",
    sequences: &[b"\x1b\x24\x29\x43"],
};

static ISO_2022_CN: EscapeSequenceSet = EscapeSequenceSet {
    charset_name: "ISO-2022-CN",
    language: "Chinese",
    sequences: &[b"\x1b\x24\x29\x41", b"\x1b\x24\x29\x47"],
};

static HZ_GB_2312: EscapeSequenceSet = EscapeSequenceSet {
    charset_name: "HZ-GB-2312",
    language: "Chinese",
    sequences: &[b"\x7e\x7b"],
};

pub(crate) struct EscCharsetProber {
    active: Vec<&'static EscapeSequenceSet>,
    found: Option<&'static EscapeSequenceSet>,
    state: ProbingState,
    // Rolling window over the last four bytes; signatures never span more.
    window: [u8; 4],
    filled: usize,
}

impl EscCharsetProber {
    pub(crate) fn new(lang_filter: LanguageFilter) -> Self {
        let mut active: Vec<&'static EscapeSequenceSet> = Vec::with_capacity(4);
        if lang_filter.intersects(LanguageFilter::JAPANESE) {
            active.push(&ISO_2022_JP);
        }
        if lang_filter.intersects(LanguageFilter::KOREAN) {
            active.push(&ISO_2022_KR);
        }
        if lang_filter.intersects(LanguageFilter::CHINESE_SIMPLIFIED) {
            active.push(&ISO_2022_CN);
            active.push(&HZ_GB_2312);
        }
        EscCharsetProber {
            active,
            found: None,
            state: if lang_filter.intersects(LanguageFilter::CJK) {
                ProbingState::Detecting
            } else {
                ProbingState::NotMe
            },
            window: [0; 4],
            filled: 0,
        }
    }

    fn window_ends_with(&self, sequence: &[u8]) -> bool {
        self.filled >= sequence.len() && self.window[4 - sequence.len()..] == *sequence
    }
}

impl CharsetProber for EscCharsetProber {
    fn feed(&mut self, byte_str: &[u8]) -> ProbingState {
        if self.state != ProbingState::Detecting {
            return self.state;
        }
        for &byte in byte_str {
            self.window.rotate_left(1);
            self.window[3] = byte;
            if self.filled < 4 {
                self.filled += 1;
            }
            for &set in &self.active {
                if set.sequences.iter().any(|seq| self.window_ends_with(seq)) {
                    self.found = Some(set);
                    self.state = ProbingState::FoundIt;
                    return self.state;
                }
            }
        }
        self.state
    }

    fn get_confidence(&self) -> f64 {
        if self.found.is_some() {
            0.99
        } else {
            0.00
        }
    }

    fn charset_name(&self) -> Option<&'static str> {
        self.found.map(|set| set.charset_name)
    }

    fn language(&self) -> Option<&'static str> {
        self.found.map(|set| set.language)
    }

    fn state(&self) -> ProbingState {
        self.state
    }

    fn reset(&mut self) {
        self.found = None;
        if !self.active.is_empty() {
            self.state = ProbingState::Detecting;
        }
        self.window = [0; 4];
        self.filled = 0;
    }
}
