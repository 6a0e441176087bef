use crate::assets::FreqTable;

//
// Character distribution analysis for the two-byte CJK encodings.
//
// Each analyzer counts how many of the two-byte characters it has seen carry
// a frequency rank in its table, and how many of those fall inside the
// "frequent" prefix of the rank order. Genuine text of the right encoding
// shows a characteristic ratio between the two counts.
//

pub(crate) const ENOUGH_DATA_THRESHOLD: usize = 1024;
const MINIMUM_DATA_THRESHOLD: usize = 3;
const SURE_YES: f64 = 0.99;
const SURE_NO: f64 = 0.01;

pub(crate) struct CharDistributionAnalysis {
    table: &'static FreqTable,
    total_chars: usize,
    freq_chars: usize,
}

impl CharDistributionAnalysis {
    pub(crate) fn new(table: &'static FreqTable) -> Self {
        CharDistributionAnalysis {
            table,
            total_chars: 0,
            freq_chars: 0,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.total_chars = 0;
        self.freq_chars = 0;
    }

    /// Feed one complete character. Only two-byte characters take part in the
    /// distribution analysis; everything else is ignored.
    pub(crate) fn feed(&mut self, char_bytes: &[u8], char_len: usize) {
        if char_len != 2 || char_bytes.len() < 2 {
            return;
        }
        let order = self.table.order_of(char_bytes[0], char_bytes[1]);
        if order >= 0 {
            self.total_chars += 1;
            if (order as u16) < self.table.table_size {
                self.freq_chars += 1;
            }
        }
    }

    pub(crate) fn get_confidence(&self) -> f64 {
        if self.total_chars == 0 || self.freq_chars <= MINIMUM_DATA_THRESHOLD {
            return SURE_NO;
        }
        if self.total_chars != self.freq_chars {
            let r = self.freq_chars as f64
                / ((self.total_chars - self.freq_chars) as f64
                    * self.table.typical_distribution_ratio);
            if r < SURE_YES {
                return r;
            }
        }
        // All observed characters were frequent ones.
        SURE_YES
    }

    /// Advisory for callers that may want to stop feeding once the sample is
    /// large enough to be conclusive.
    pub(crate) fn got_enough_data(&self) -> bool {
        self.total_chars >= ENOUGH_DATA_THRESHOLD
    }

    #[cfg(test)]
    pub(crate) fn counts(&self) -> (usize, usize) {
        (self.total_chars, self.freq_chars)
    }
}
