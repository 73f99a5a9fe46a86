//! Local Counter
//!
//! A word is a maximal run of ASCII letters, folded to lowercase. Anything else,
//! including non-ASCII bytes, separates words.

use crate::count::{FrequencyMap, Segment, TextBuffer};

/// Count the words inside one segment of `buffer`
pub fn count(buffer: &TextBuffer, segment: Segment) -> FrequencyMap {
    count_bytes(buffer.slice(segment))
}

/// Count the words in a raw byte slice
pub fn count_bytes(bytes: &[u8]) -> FrequencyMap {
    let mut local = FrequencyMap::new();
    let mut current = String::with_capacity(32);

    for &byte in bytes {
        if byte.is_ascii_alphabetic() {
            current.push(byte.to_ascii_lowercase() as char);
        } else if !current.is_empty() {
            bump(&mut local, &current);
            current.clear();
        }
    }

    // Trailing word at the end of the segment
    if !current.is_empty() {
        bump(&mut local, &current);
    }

    local
}

fn bump(map: &mut FrequencyMap, word: &str) {
    match map.get_mut(word) {
        Some(count) => *count += 1,
        None => {
            map.insert(word.to_owned(), 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, u64)]) -> FrequencyMap {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_case_folding_and_punctuation() {
        let counts = count_bytes(b"the cat sat. The CAT sat!");
        assert_eq!(counts, map(&[("the", 2), ("cat", 2), ("sat", 2)]));
    }

    #[test]
    fn test_trailing_word_is_flushed() {
        let counts = count_bytes(b"end of file");
        assert_eq!(counts.get("file"), Some(&1));
    }

    #[test]
    fn test_digits_and_non_ascii_split_words() {
        let counts = count_bytes("abc123def caf\u{e9}s".as_bytes());
        assert_eq!(counts, map(&[("abc", 1), ("def", 1), ("caf", 1), ("s", 1)]));
    }

    #[test]
    fn test_empty_and_separator_only_input() {
        assert!(count_bytes(b"").is_empty());
        assert!(count_bytes(b" \n\t.,;!? 42").is_empty());
    }

    #[test]
    fn test_count_respects_segment_bounds() {
        let buffer = TextBuffer::from("alpha beta gamma");
        let counts = count(&buffer, Segment::new(6, 10));
        assert_eq!(counts, map(&[("beta", 1)]));

        // A cut through "gamma" yields two fragments
        let left = count(&buffer, Segment::new(0, 13));
        let right = count(&buffer, Segment::new(13, 16));
        assert_eq!(left.get("ga"), Some(&1));
        assert_eq!(right.get("mma"), Some(&1));
    }
}
