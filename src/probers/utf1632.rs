use crate::entity::ProbingState;
use crate::probers::CharsetProber;

//
// Zero-byte positional analysis for BOM-less UTF-16 / UTF-32 streams.
//
// Text encoded as UTF-16 or UTF-32 places its zero bytes at characteristic
// positions modulo 2 or 4; for instance `( 00 00 00 xx )+` is almost
// certainly UTF-32BE. Counting zero and non-zero bytes per position and
// validating the code units along the way is enough to pick the width and
// the endianness.
//

/// How many bytes to scan before trusting the positional statistics.
const MIN_CHARS_FOR_DETECTION: usize = 20;
/// Required fraction of bytes conforming to the candidate zero/non-zero layout.
const EXPECTED_RATIO: f64 = 0.94;

pub(crate) struct Utf1632Prober {
    state: ProbingState,
    charset_name: Option<&'static str>,
    position: usize,
    zeros_at_mod: [usize; 4],
    nonzeros_at_mod: [usize; 4],
    quad: [u8; 4],
    pub(crate) invalid_utf16be: bool,
    pub(crate) invalid_utf16le: bool,
    pub(crate) invalid_utf32be: bool,
    pub(crate) invalid_utf32le: bool,
    first_half_surrogate_pair_detected_16be: bool,
    first_half_surrogate_pair_detected_16le: bool,
}

impl Utf1632Prober {
    pub(crate) fn new() -> Self {
        Utf1632Prober {
            state: ProbingState::Detecting,
            charset_name: None,
            position: 0,
            zeros_at_mod: [0; 4],
            nonzeros_at_mod: [0; 4],
            quad: [0; 4],
            invalid_utf16be: false,
            invalid_utf16le: false,
            invalid_utf32be: false,
            invalid_utf32le: false,
            first_half_surrogate_pair_detected_16be: false,
            first_half_surrogate_pair_detected_16le: false,
        }
    }

    /// Pick the first width/endianness whose byte layout fits and whose code
    /// units validated so far. UTF-32 goes first: its layout subsumes the
    /// UTF-16 one.
    fn check_encoding(&mut self) -> bool {
        let total = self.zeros_at_mod.iter().sum::<usize>()
            + self.nonzeros_at_mod.iter().sum::<usize>();
        if total < MIN_CHARS_FOR_DETECTION {
            return false;
        }
        let total = total as f64;
        let [z0, z1, z2, z3] = self.zeros_at_mod.map(|n| n as f64);
        let [n0, n1, n2, n3] = self.nonzeros_at_mod.map(|n| n as f64);

        let utf32be_ratio = (z0 + z1 + z2 + n3) / total;
        let utf32le_ratio = (z1 + z2 + z3 + n0) / total;
        let utf16be_ratio = (z0 + z2 + n1 + n3) / total;
        let utf16le_ratio = (z1 + z3 + n0 + n2) / total;

        if utf32be_ratio > EXPECTED_RATIO && !self.invalid_utf32be {
            self.charset_name = Some("UTF-32BE");
        } else if utf32le_ratio > EXPECTED_RATIO && !self.invalid_utf32le {
            self.charset_name = Some("UTF-32LE");
        } else if utf16be_ratio > EXPECTED_RATIO && !self.invalid_utf16be {
            self.charset_name = Some("UTF-16BE");
        } else if utf16le_ratio > EXPECTED_RATIO && !self.invalid_utf16le {
            self.charset_name = Some("UTF-16LE");
        } else {
            return false;
        }
        true
    }

    fn validate_utf32_pending(&mut self) {
        if !self.invalid_utf32be && !validate_utf32_character(u32::from_be_bytes(self.quad)) {
            self.invalid_utf32be = true;
        }
        if !self.invalid_utf32le && !validate_utf32_character(u32::from_le_bytes(self.quad)) {
            self.invalid_utf32le = true;
        }
    }

    fn validate_utf16_pending(&mut self) {
        // The pair ending at the current position.
        let pair = if self.position % 4 == 1 {
            [self.quad[0], self.quad[1]]
        } else {
            [self.quad[2], self.quad[3]]
        };

        if !self.invalid_utf16be {
            let unit = u16::from_be_bytes(pair);
            if !validate_utf16_unit(unit) {
                self.invalid_utf16be = true;
            } else if (0xD800..=0xDBFF).contains(&unit) {
                self.first_half_surrogate_pair_detected_16be = true;
            } else if (0xDC00..=0xDFFF).contains(&unit) {
                if !self.first_half_surrogate_pair_detected_16be {
                    // Orphan low surrogate.
                    self.invalid_utf16be = true;
                }
                self.first_half_surrogate_pair_detected_16be = false;
            }
        }

        if !self.invalid_utf16le {
            let unit = u16::from_le_bytes(pair);
            if !validate_utf16_unit(unit) {
                self.invalid_utf16le = true;
            } else if (0xD800..=0xDBFF).contains(&unit) {
                self.first_half_surrogate_pair_detected_16le = true;
            } else if (0xDC00..=0xDFFF).contains(&unit) {
                if !self.first_half_surrogate_pair_detected_16le {
                    self.invalid_utf16le = true;
                }
                self.first_half_surrogate_pair_detected_16le = false;
            }
        }
    }
}

impl CharsetProber for Utf1632Prober {
    fn feed(&mut self, byte_str: &[u8]) -> ProbingState {
        if self.state != ProbingState::Detecting {
            return self.state;
        }
        for &byte in byte_str {
            self.quad[self.position % 4] = byte;
            if byte == 0 {
                self.zeros_at_mod[self.position % 4] += 1;
            } else {
                self.nonzeros_at_mod[self.position % 4] += 1;
            }

            if self.position % 4 == 3 {
                self.validate_utf32_pending();
            }
            if self.position % 2 == 1 {
                self.validate_utf16_pending();
            }

            self.position += 1;
            if self.position >= MIN_CHARS_FOR_DETECTION && self.check_encoding() {
                self.state = ProbingState::FoundIt;
                break;
            }
        }
        self.state
    }

    fn get_confidence(&self) -> f64 {
        match self.state {
            ProbingState::FoundIt => 0.99,
            ProbingState::NotMe => 0.01,
            ProbingState::Detecting => 0.5,
        }
    }

    fn charset_name(&self) -> Option<&'static str> {
        self.charset_name
    }

    fn language(&self) -> Option<&'static str> {
        // Byte-order detection carries no language signal.
        None
    }

    fn state(&self) -> ProbingState {
        self.state
    }

    fn reset(&mut self) {
        *self = Utf1632Prober::new();
    }
}

/// UTF-32 allows `0 ..= 0x10FFFF` minus the surrogate range.
fn validate_utf32_character(value: u32) -> bool {
    value <= 0x0010_FFFF && !(0xD800..=0xDFFF).contains(&value)
}

/// Surrogate halves are acceptable on their own here; their ordering is
/// enforced separately by the pairing logic.
fn validate_utf16_unit(unit: u16) -> bool {
    matches!(unit, 0x0000..=0xD7FF | 0xD800..=0xDBFF | 0xDC00..=0xDFFF | 0xE000..=0xFFFF)
}
