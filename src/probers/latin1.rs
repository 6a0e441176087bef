use crate::entity::ProbingState;
use crate::probers::{remove_xml_tags, CharsetProber};
use once_cell::sync::Lazy;

//
// ISO-8859-1 heuristics. Every byte is mapped to a coarse character class
// and consecutive class pairs are scored against a small frequency model:
// real Latin-1 text alternates ASCII letters and isolated accented letters,
// while decoding artifacts produce runs of accented characters.
//

const CLASS_NUM: usize = 8;
const UDF: u8 = 0; // undefined (0x80..=0x9F are C1 controls in ISO-8859-1)
const OTH: u8 = 1; // other
const ASC: u8 = 2; // ascii capital letter
const ASS: u8 = 3; // ascii small letter
const ACV: u8 = 4; // accent capital vowel
const ACO: u8 = 5; // accent capital other
const ASV: u8 = 6; // accent small vowel
const ASO: u8 = 7; // accent small other

const FREQ_CAT_NUM: usize = 4;

static LATIN1_CHAR_TO_CLASS: Lazy<[u8; 256]> = Lazy::new(|| {
    let mut classes = [OTH; 256];
    for byte in 0x41..=0x5A {
        classes[byte] = ASC;
    }
    for byte in 0x61..=0x7A {
        classes[byte] = ASS;
    }
    for byte in 0x80..=0x9F {
        classes[byte] = UDF;
    }
    for byte in 0xC0..=0xDE {
        classes[byte] = match byte {
            0xC7 | 0xD0 | 0xD1 | 0xDE => ACO,
            0xD7 => OTH, // multiplication sign
            _ => ACV,
        };
    }
    for byte in 0xDF..=0xFF {
        classes[byte] = match byte {
            0xDF | 0xE7 | 0xF0 | 0xF1 | 0xFE => ASO,
            0xF7 => OTH, // division sign
            _ => ASV,
        };
    }
    classes
});

// Frequency categories for class pairs; category 0 never occurs in Latin-1.
#[rustfmt::skip]
static LATIN1_CLASS_MODEL: [u8; CLASS_NUM * CLASS_NUM] = [
    // UDF OTH ASC ASS ACV ACO ASV ASO
        0,  0,  0,  0,  0,  0,  0,  0, // UDF
        0,  3,  3,  3,  3,  3,  3,  3, // OTH
        0,  3,  3,  3,  3,  3,  3,  3, // ASC
        0,  3,  3,  3,  1,  1,  3,  3, // ASS
        0,  3,  3,  3,  1,  2,  1,  2, // ACV
        0,  3,  3,  3,  3,  3,  3,  3, // ACO
        0,  3,  1,  3,  1,  1,  1,  3, // ASV
        0,  3,  1,  3,  1,  1,  3,  3, // ASO
];

pub(crate) struct Latin1Prober {
    state: ProbingState,
    last_char_class: u8,
    freq_counter: [usize; FREQ_CAT_NUM],
}

impl Latin1Prober {
    pub(crate) fn new() -> Self {
        Latin1Prober {
            state: ProbingState::Detecting,
            last_char_class: OTH,
            freq_counter: [0; FREQ_CAT_NUM],
        }
    }
}

impl CharsetProber for Latin1Prober {
    fn feed(&mut self, byte_str: &[u8]) -> ProbingState {
        if self.state != ProbingState::Detecting {
            return self.state;
        }
        let byte_str = remove_xml_tags(byte_str);
        for &byte in &byte_str {
            let char_class = LATIN1_CHAR_TO_CLASS[byte as usize];
            let freq = LATIN1_CLASS_MODEL
                [self.last_char_class as usize * CLASS_NUM + char_class as usize];
            if freq == 0 {
                self.state = ProbingState::NotMe;
                break;
            }
            self.freq_counter[freq as usize] += 1;
            self.last_char_class = char_class;
        }
        self.state
    }

    fn get_confidence(&self) -> f64 {
        if self.state == ProbingState::NotMe {
            return 0.01;
        }
        let total: usize = self.freq_counter.iter().sum();
        if total == 0 {
            return 0.0;
        }
        let confidence =
            (self.freq_counter[3] as f64 - 20.0 * self.freq_counter[1] as f64) / total as f64;
        // Latin-1 matches a lot of garbage; keep it below the specialized
        // probers so they can take priority.
        (confidence.max(0.0)) * 0.73
    }

    fn charset_name(&self) -> Option<&'static str> {
        Some("ISO-8859-1")
    }

    fn language(&self) -> Option<&'static str> {
        Some("")
    }

    fn state(&self) -> ProbingState {
        self.state
    }

    fn reset(&mut self) {
        *self = Latin1Prober::new();
    }
}
