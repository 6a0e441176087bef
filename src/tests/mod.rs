#![cfg(test)]
use crate::assets::FreqTable;

mod filters;
mod sbcs;
mod utf1632;

/// The `n` top-ranked characters of a frequency table as raw byte pairs,
/// most frequent first.
pub fn frequent_chars(table: &FreqTable, n: usize) -> Vec<[u8; 2]> {
    let mut pairs: Vec<(u16, u16)> = table.pairs.to_vec();
    pairs.sort_by_key(|&(_, rank)| rank);
    pairs
        .iter()
        .take(n)
        .map(|&(key, _)| key.to_le_bytes())
        .collect()
}

/// Cycle through the given two-byte characters until `count` characters were
/// emitted.
pub fn repeat_chars(chars: &[[u8; 2]], count: usize) -> Vec<u8> {
    chars
        .iter()
        .cycle()
        .take(count)
        .flat_map(|pair| pair.iter().copied())
        .collect()
}
