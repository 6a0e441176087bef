use crate::assets::{
    BIG5_FREQ_TABLE, EUCKR_FREQ_TABLE, EUCTW_FREQ_TABLE, FreqTable, GB2312_FREQ_TABLE,
    JIS_FREQ_TABLE,
};
use crate::distribution::CharDistributionAnalysis;
use crate::entity::{LanguageFilter, ProbingState};
use crate::probers::utf8::Utf8Prober;
use crate::probers::{CharsetProber, GroupProber, SHORTCUT_THRESHOLD};

//
// Multi-byte charset probers. Each encoding contributes a coding spec (how
// bytes group into characters) and a frequency table; the prober itself is
// one generic engine that splits the stream into characters, rejects the
// encoding on the first illegal sequence, and otherwise lets the character
// distribution decide.
//

/// Byte-level grammar of one multi-byte encoding.
pub(crate) struct CodingSpec {
    pub charset_name: &'static str,
    pub language: &'static str,
    /// Character length implied by a lead byte, `None` for an illegal lead.
    pub char_len: fn(u8) -> Option<usize>,
    /// Whether `byte` may appear at (1-based) position `pos` of a character
    /// opened by `lead`.
    pub is_trail: fn(u8, usize, u8) -> bool,
}

pub(crate) struct MultiByteProber {
    spec: &'static CodingSpec,
    distribution: CharDistributionAnalysis,
    state: ProbingState,
    pending: [u8; 4],
    pending_len: usize,
    expected_len: usize,
}

impl MultiByteProber {
    pub(crate) fn new(spec: &'static CodingSpec, table: &'static FreqTable) -> Self {
        MultiByteProber {
            spec,
            distribution: CharDistributionAnalysis::new(table),
            state: ProbingState::Detecting,
            pending: [0; 4],
            pending_len: 0,
            expected_len: 0,
        }
    }
}

impl CharsetProber for MultiByteProber {
    fn feed(&mut self, byte_str: &[u8]) -> ProbingState {
        if self.state != ProbingState::Detecting {
            return self.state;
        }
        for &byte in byte_str {
            if self.pending_len == 0 {
                match (self.spec.char_len)(byte) {
                    None => {
                        self.state = ProbingState::NotMe;
                        break;
                    }
                    Some(1) => {}
                    Some(len) => {
                        self.pending[0] = byte;
                        self.pending_len = 1;
                        self.expected_len = len;
                    }
                }
            } else if (self.spec.is_trail)(self.pending[0], self.pending_len, byte) {
                self.pending[self.pending_len] = byte;
                self.pending_len += 1;
                if self.pending_len == self.expected_len {
                    self.distribution
                        .feed(&self.pending[..self.expected_len], self.expected_len);
                    self.pending_len = 0;
                }
            } else {
                self.state = ProbingState::NotMe;
                break;
            }
        }
        if self.state == ProbingState::Detecting
            && self.distribution.got_enough_data()
            && self.get_confidence() > SHORTCUT_THRESHOLD
        {
            self.state = ProbingState::FoundIt;
        }
        self.state
    }

    fn get_confidence(&self) -> f64 {
        match self.state {
            ProbingState::FoundIt => 0.99,
            ProbingState::NotMe => 0.01,
            ProbingState::Detecting => self.distribution.get_confidence(),
        }
    }

    fn charset_name(&self) -> Option<&'static str> {
        Some(self.spec.charset_name)
    }

    fn language(&self) -> Option<&'static str> {
        Some(self.spec.language)
    }

    fn state(&self) -> ProbingState {
        self.state
    }

    fn reset(&mut self) {
        self.state = ProbingState::Detecting;
        self.distribution.reset();
        self.pending_len = 0;
        self.expected_len = 0;
    }
}

/////////////////////////////////////////////////////////////////////////////////////
// Per-encoding coding specs
/////////////////////////////////////////////////////////////////////////////////////

pub(crate) static BIG5_CODING: CodingSpec = CodingSpec {
    charset_name: "Big5",
    language: "Chinese",
    char_len: |byte| match byte {
        0x00..=0x7F => Some(1),
        0x81..=0xFE => Some(2),
        _ => None,
    },
    is_trail: |_, _, byte| matches!(byte, 0x40..=0x7E | 0xA1..=0xFE),
};

pub(crate) static GB2312_CODING: CodingSpec = CodingSpec {
    charset_name: "GB2312",
    language: "Chinese",
    char_len: |byte| match byte {
        0x00..=0x7F => Some(1),
        0xA1..=0xF7 => Some(2),
        _ => None,
    },
    is_trail: |_, _, byte| matches!(byte, 0xA1..=0xFE),
};

pub(crate) static EUCTW_CODING: CodingSpec = CodingSpec {
    charset_name: "EUC-TW",
    language: "Chinese",
    char_len: |byte| match byte {
        0x00..=0x7F => Some(1),
        0x8E => Some(4),
        0xA1..=0xFE => Some(2),
        _ => None,
    },
    is_trail: |lead, pos, byte| match (lead, pos) {
        (0x8E, 1) => matches!(byte, 0xA1..=0xB0),
        _ => matches!(byte, 0xA1..=0xFE),
    },
};

pub(crate) static EUCKR_CODING: CodingSpec = CodingSpec {
    charset_name: "EUC-KR",
    language: "Korean",
    char_len: |byte| match byte {
        0x00..=0x7F => Some(1),
        0xA1..=0xFE => Some(2),
        _ => None,
    },
    is_trail: |_, _, byte| matches!(byte, 0xA1..=0xFE),
};

pub(crate) static JOHAB_CODING: CodingSpec = CodingSpec {
    charset_name: "Johab",
    language: "Korean",
    char_len: |byte| match byte {
        0x00..=0x7F => Some(1),
        // Hangul syllable leads, then the symbol/hanja leads.
        0x84..=0xD3 => Some(2),
        0xD8..=0xDE | 0xE0..=0xF9 => Some(2),
        _ => None,
    },
    is_trail: |lead, _, byte| match lead {
        0x84..=0xD3 => matches!(byte, 0x41..=0x7E | 0x81..=0xFE),
        _ => matches!(byte, 0x31..=0x7E | 0x91..=0xFE),
    },
};

pub(crate) static SJIS_CODING: CodingSpec = CodingSpec {
    charset_name: "Shift_JIS",
    language: "Japanese",
    char_len: |byte| match byte {
        0x00..=0x7F => Some(1),
        // Half-width katakana.
        0xA1..=0xDF => Some(1),
        0x81..=0x9F | 0xE0..=0xFC => Some(2),
        _ => None,
    },
    is_trail: |_, _, byte| matches!(byte, 0x40..=0x7E | 0x80..=0xFC),
};

pub(crate) static EUCJP_CODING: CodingSpec = CodingSpec {
    charset_name: "EUC-JP",
    language: "Japanese",
    char_len: |byte| match byte {
        0x00..=0x7F => Some(1),
        // Half-width katakana prefix and the three-byte plane-2 prefix.
        0x8E => Some(2),
        0x8F => Some(3),
        0xA1..=0xFE => Some(2),
        _ => None,
    },
    is_trail: |lead, _, byte| match lead {
        0x8E => matches!(byte, 0xA1..=0xDF),
        _ => matches!(byte, 0xA1..=0xFE),
    },
};

/// The multi-byte bank in probing order; UTF-8 runs regardless of filter,
/// the CJK probers follow the language filter.
pub(crate) fn new_group(lang_filter: LanguageFilter) -> GroupProber {
    let mut probers: Vec<Box<dyn CharsetProber>> = vec![Box::new(Utf8Prober::new())];
    if lang_filter.intersects(LanguageFilter::JAPANESE) {
        probers.push(Box::new(MultiByteProber::new(&SJIS_CODING, &JIS_FREQ_TABLE)));
        probers.push(Box::new(MultiByteProber::new(&EUCJP_CODING, &JIS_FREQ_TABLE)));
    }
    if lang_filter.intersects(LanguageFilter::CHINESE_SIMPLIFIED) {
        probers.push(Box::new(MultiByteProber::new(
            &GB2312_CODING,
            &GB2312_FREQ_TABLE,
        )));
    }
    if lang_filter.intersects(LanguageFilter::KOREAN) {
        probers.push(Box::new(MultiByteProber::new(
            &EUCKR_CODING,
            &EUCKR_FREQ_TABLE,
        )));
        probers.push(Box::new(MultiByteProber::new(
            &JOHAB_CODING,
            &EUCKR_FREQ_TABLE,
        )));
    }
    if lang_filter.intersects(LanguageFilter::CHINESE_TRADITIONAL) {
        probers.push(Box::new(MultiByteProber::new(&BIG5_CODING, &BIG5_FREQ_TABLE)));
        probers.push(Box::new(MultiByteProber::new(
            &EUCTW_CODING,
            &EUCTW_FREQ_TABLE,
        )));
    }
    GroupProber::new(probers)
}
