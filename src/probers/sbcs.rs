use crate::assets::{ISO_8859_5_MODEL, KOI8_R_MODEL, WINDOWS_1251_MODEL};
use crate::entity::{LanguageFilter, ProbingState};
use crate::probers::{filter_international_words, CharsetProber, GroupProber};

//
// Single-byte charset probers. One engine scores byte bigrams against a
// per-language likelihood matrix; each charset contributes only its own
// byte-to-letter-order table. Shipped models cover Cyrillic in its three
// common byte layouts.
//

pub(crate) const SAMPLE_SIZE: usize = 64;
const SB_ENOUGH_REL_THRESHOLD: usize = 1024;
const POSITIVE_SHORTCUT_THRESHOLD: f64 = 0.95;
const NEGATIVE_SHORTCUT_THRESHOLD: f64 = 0.05;

// Byte categories above the letter orders: 251 control, 252 digit,
// 253 symbol, 254 line feed, 255 undefined.
const CONTROL: u8 = 251;
const UNDEFINED: u8 = 255;

// Bigram likelihood levels stored in the precedence matrix.
const POSITIVE: usize = 3;

/// A single-byte detection model: the byte classification for one charset
/// plus the (shared) bigram likelihood matrix of its language.
pub(crate) struct SequenceModel {
    pub char_to_order: &'static [u8; 256],
    pub precedence_matrix: &'static [u8; SAMPLE_SIZE * SAMPLE_SIZE],
    pub typical_positive_ratio: f64,
    /// Strip foreign words before analysis. Off for the Cyrillic models:
    /// the international words are exactly the evidence they score.
    pub filter_international: bool,
    pub charset_name: &'static str,
    pub language: &'static str,
}

pub(crate) struct SingleByteProber {
    model: &'static SequenceModel,
    state: ProbingState,
    last_order: u8,
    seq_counters: [usize; 4],
    total_seqs: usize,
    total_char: usize,
    control_char: usize,
    freq_char: usize,
}

impl SingleByteProber {
    pub(crate) fn new(model: &'static SequenceModel) -> Self {
        SingleByteProber {
            model,
            state: ProbingState::Detecting,
            last_order: UNDEFINED,
            seq_counters: [0; 4],
            total_seqs: 0,
            total_char: 0,
            control_char: 0,
            freq_char: 0,
        }
    }
}

impl CharsetProber for SingleByteProber {
    fn feed(&mut self, byte_str: &[u8]) -> ProbingState {
        if self.state != ProbingState::Detecting {
            return self.state;
        }
        let filtered;
        let byte_str = if self.model.filter_international {
            filtered = filter_international_words(byte_str);
            &filtered[..]
        } else {
            byte_str
        };
        for &byte in byte_str {
            let order = self.model.char_to_order[byte as usize];
            if order <= CONTROL {
                self.total_char += 1;
                if order == CONTROL {
                    self.control_char += 1;
                }
            }
            if (order as usize) < SAMPLE_SIZE {
                self.freq_char += 1;
                if (self.last_order as usize) < SAMPLE_SIZE {
                    self.total_seqs += 1;
                    let likelihood = self.model.precedence_matrix
                        [self.last_order as usize * SAMPLE_SIZE + order as usize];
                    self.seq_counters[likelihood as usize] += 1;
                }
            }
            self.last_order = order;
        }
        if self.state == ProbingState::Detecting && self.total_seqs > SB_ENOUGH_REL_THRESHOLD {
            let confidence = self.get_confidence();
            if confidence > POSITIVE_SHORTCUT_THRESHOLD {
                self.state = ProbingState::FoundIt;
            } else if confidence < NEGATIVE_SHORTCUT_THRESHOLD {
                self.state = ProbingState::NotMe;
            }
        }
        self.state
    }

    fn get_confidence(&self) -> f64 {
        if self.state == ProbingState::NotMe {
            return 0.01;
        }
        if self.total_seqs == 0 || self.total_char == 0 {
            return 0.01;
        }
        let mut r = self.seq_counters[POSITIVE] as f64
            / self.total_seqs as f64
            / self.model.typical_positive_ratio;
        r *= (self.total_char - self.control_char) as f64 / self.total_char as f64;
        r *= self.freq_char as f64 / self.total_char as f64;
        if r >= 1.0 {
            r = 0.99;
        }
        r
    }

    fn charset_name(&self) -> Option<&'static str> {
        Some(self.model.charset_name)
    }

    fn language(&self) -> Option<&'static str> {
        Some(self.model.language)
    }

    fn state(&self) -> ProbingState {
        self.state
    }

    fn reset(&mut self) {
        *self = SingleByteProber::new(self.model);
    }
}

/// The single-byte bank in probing order.
pub(crate) fn new_group(_lang_filter: LanguageFilter) -> GroupProber {
    GroupProber::new(vec![
        Box::new(SingleByteProber::new(&WINDOWS_1251_MODEL)),
        Box::new(SingleByteProber::new(&KOI8_R_MODEL)),
        Box::new(SingleByteProber::new(&ISO_8859_5_MODEL)),
    ])
}
