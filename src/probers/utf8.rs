use crate::entity::ProbingState;
use crate::probers::{CharsetProber, SHORTCUT_THRESHOLD};

//
// Streaming UTF-8 validation. Every completed multi-byte sequence makes the
// stream exponentially less likely to be anything else; one malformed
// sequence rules UTF-8 out entirely.
//

const ONE_CHAR_PROB: f64 = 0.5;

pub(crate) struct Utf8Prober {
    state: ProbingState,
    lead: u8,
    bytes_left: usize,
    num_mb_chars: u32,
}

impl Utf8Prober {
    pub(crate) fn new() -> Self {
        Utf8Prober {
            state: ProbingState::Detecting,
            lead: 0,
            bytes_left: 0,
            num_mb_chars: 0,
        }
    }

    /// Valid continuation range, tightened for the leads whose first
    /// continuation byte excludes overlong or surrogate encodings.
    fn continuation_valid(&self, byte: u8) -> bool {
        let first_continuation = match self.lead {
            0xE0 => self.bytes_left == 2,
            0xED => self.bytes_left == 2,
            0xF0 | 0xF4 => self.bytes_left == 3,
            _ => false,
        };
        if first_continuation {
            return match self.lead {
                0xE0 => (0xA0..=0xBF).contains(&byte),
                0xED => (0x80..=0x9F).contains(&byte),
                0xF0 => (0x90..=0xBF).contains(&byte),
                0xF4 => (0x80..=0x8F).contains(&byte),
                _ => unreachable!(),
            };
        }
        (0x80..=0xBF).contains(&byte)
    }
}

impl CharsetProber for Utf8Prober {
    fn feed(&mut self, byte_str: &[u8]) -> ProbingState {
        if self.state != ProbingState::Detecting {
            return self.state;
        }
        for &byte in byte_str {
            if self.bytes_left == 0 {
                match byte {
                    0x00..=0x7F => {}
                    0xC2..=0xDF => {
                        self.lead = byte;
                        self.bytes_left = 1;
                    }
                    0xE0..=0xEF => {
                        self.lead = byte;
                        self.bytes_left = 2;
                    }
                    0xF0..=0xF4 => {
                        self.lead = byte;
                        self.bytes_left = 3;
                    }
                    _ => {
                        self.state = ProbingState::NotMe;
                        break;
                    }
                }
            } else if self.continuation_valid(byte) {
                self.bytes_left -= 1;
                if self.bytes_left == 0 {
                    self.num_mb_chars += 1;
                }
            } else {
                self.state = ProbingState::NotMe;
                break;
            }
        }
        if self.state == ProbingState::Detecting && self.get_confidence() > SHORTCUT_THRESHOLD {
            self.state = ProbingState::FoundIt;
        }
        self.state
    }

    fn get_confidence(&self) -> f64 {
        if self.state == ProbingState::NotMe {
            return 0.01;
        }
        if self.num_mb_chars < 6 {
            1.0 - 0.99 * ONE_CHAR_PROB.powi(self.num_mb_chars as i32)
        } else {
            0.99
        }
    }

    fn charset_name(&self) -> Option<&'static str> {
        Some("utf-8")
    }

    fn language(&self) -> Option<&'static str> {
        Some("")
    }

    fn state(&self) -> ProbingState {
        self.state
    }

    fn reset(&mut self) {
        *self = Utf8Prober::new();
    }
}
