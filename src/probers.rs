use crate::entity::ProbingState;
use once_cell::sync::Lazy;
use ordered_float::OrderedFloat;
use regex::bytes::Regex;

pub(crate) mod escape;
pub(crate) mod latin1;
pub(crate) mod mbcs;
pub(crate) mod sbcs;
pub(crate) mod utf1632;
pub(crate) mod utf8;

/// Confidence past which a prober may short-circuit its own work and report
/// `FoundIt` from `feed` directly.
pub(crate) const SHORTCUT_THRESHOLD: f64 = 0.95;

/// Capability set every sub-detector exposes to the coordinator.
///
/// `feed` is monotonic in state: once a prober answered `FoundIt` or `NotMe`,
/// further calls return the terminal state without accumulating evidence.
pub(crate) trait CharsetProber: Send {
    fn feed(&mut self, byte_str: &[u8]) -> ProbingState;
    fn get_confidence(&self) -> f64;
    /// `None` until the prober has settled on a concrete charset.
    fn charset_name(&self) -> Option<&'static str>;
    fn language(&self) -> Option<&'static str>;
    fn state(&self) -> ProbingState;
    fn reset(&mut self);
}

/////////////////////////////////////////////////////////////////////////////////////
// Shared byte filters
/////////////////////////////////////////////////////////////////////////////////////

static INTERNATIONAL_WORDS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u)[a-zA-Z]*[\x80-\xff]+[a-zA-Z]*[^a-zA-Z\x80-\xff]?").unwrap());

/// Replace every word containing at least one high byte (`>= 0x80`), along
/// with its single trailing marker byte, by one ASCII space. Pure-ASCII text
/// and the markers between words pass through untouched. Offered to probers
/// whose models only hold once foreign words are stripped.
pub(crate) fn filter_international_words(buf: &[u8]) -> Vec<u8> {
    INTERNATIONAL_WORDS_PATTERN
        .replace_all(buf, &b" "[..])
        .into_owned()
}

/// Drop everything between `<` and `>`. Markup tags are ASCII-heavy and would
/// drown the statistics of the Latin-1 prober.
pub(crate) fn remove_xml_tags(buf: &[u8]) -> Vec<u8> {
    let mut filtered = Vec::with_capacity(buf.len());
    let mut inside_tag = false;
    for &byte in buf {
        match byte {
            b'<' => inside_tag = true,
            b'>' => inside_tag = false,
            _ if !inside_tag => filtered.push(byte),
            _ => {}
        }
    }
    filtered
}

/////////////////////////////////////////////////////////////////////////////////////
// GroupProber
/////////////////////////////////////////////////////////////////////////////////////

/// An ordered bank of probers presented to the coordinator as one prober.
///
/// The group reports `FoundIt` as soon as any child does, `NotMe` once every
/// child has given up, and otherwise delegates confidence and charset name to
/// its currently best-scoring active child.
pub(crate) struct GroupProber {
    probers: Vec<Box<dyn CharsetProber>>,
    state: ProbingState,
    found: Option<usize>,
}

impl GroupProber {
    pub(crate) fn new(probers: Vec<Box<dyn CharsetProber>>) -> Self {
        GroupProber {
            probers,
            state: ProbingState::Detecting,
            found: None,
        }
    }

    fn best(&self) -> Option<&dyn CharsetProber> {
        if let Some(idx) = self.found {
            return Some(self.probers[idx].as_ref());
        }
        // First strict maximum wins, so ties resolve to the earlier prober.
        let mut best: Option<(&dyn CharsetProber, OrderedFloat<f64>)> = None;
        for prober in &self.probers {
            if prober.state() == ProbingState::NotMe {
                continue;
            }
            let confidence = OrderedFloat(prober.get_confidence());
            if best.map_or(true, |(_, top)| confidence > top) {
                best = Some((prober.as_ref(), confidence));
            }
        }
        best.map(|(prober, _)| prober)
    }
}

impl CharsetProber for GroupProber {
    fn feed(&mut self, byte_str: &[u8]) -> ProbingState {
        if self.state != ProbingState::Detecting {
            return self.state;
        }
        let mut active = 0;
        for (idx, prober) in self.probers.iter_mut().enumerate() {
            if prober.state() == ProbingState::NotMe {
                continue;
            }
            match prober.feed(byte_str) {
                ProbingState::FoundIt => {
                    self.found = Some(idx);
                    self.state = ProbingState::FoundIt;
                    return self.state;
                }
                ProbingState::Detecting => active += 1,
                ProbingState::NotMe => {}
            }
        }
        if active == 0 {
            self.state = ProbingState::NotMe;
        }
        self.state
    }

    fn get_confidence(&self) -> f64 {
        match self.state {
            ProbingState::NotMe => 0.01,
            _ => self.best().map_or(0.0, CharsetProber::get_confidence),
        }
    }

    fn charset_name(&self) -> Option<&'static str> {
        self.best().and_then(CharsetProber::charset_name)
    }

    fn language(&self) -> Option<&'static str> {
        self.best().and_then(CharsetProber::language)
    }

    fn state(&self) -> ProbingState {
        self.state
    }

    fn reset(&mut self) {
        self.state = ProbingState::Detecting;
        self.found = None;
        for prober in &mut self.probers {
            prober.reset();
        }
    }
}
