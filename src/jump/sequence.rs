//! Key sequence generation for hint labels
//!
//! Every target in a round gets a sequence of the same length, so no
//! sequence is ever a prefix of another. Sequences are enumerated in
//! odometer order over the hint keys: the last position varies fastest.

use crate::error::JumpError;

/// Default hint characters - home row, index fingers first
pub const DEFAULT_HINT_KEYS: &str = "fjdksla;";

/// Smallest length `L >= 1` such that `keys_len^L >= count`
pub fn sequence_length(count: usize, keys_len: usize) -> usize {
    // A unary alphabet never grows
    if keys_len < 2 {
        return 1;
    }
    let mut len = 1;
    let mut capacity = keys_len;
    while capacity < count {
        capacity = capacity.saturating_mul(keys_len);
        len += 1;
    }
    len
}

/// Odometer over the hint keys, yielding every sequence of a fixed length
pub struct KeySequencer<'a> {
    keys: &'a [char],
    digits: Vec<usize>,
    exhausted: bool,
}

impl<'a> KeySequencer<'a> {
    pub fn new(length: usize, keys: &'a [char]) -> Self {
        Self {
            keys,
            digits: vec![0; length],
            exhausted: keys.is_empty(),
        }
    }
}

impl Iterator for KeySequencer<'_> {
    type Item = Vec<char>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let seq = self.digits.iter().map(|&d| self.keys[d]).collect();

        // Increment the least significant position, carrying leftwards
        let last = self.keys.len() - 1;
        let mut carry = true;
        for digit in self.digits.iter_mut().rev() {
            if *digit == last {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        // Wrapped all the way around
        self.exhausted = carry;

        Some(seq)
    }
}

/// Generate `count` distinct, equal-length key sequences
///
/// The output depends only on `count` and `keys`, so the i-th sequence
/// can be paired positionally with the i-th target.
///
/// # Errors
/// `EmptyTargetSet` when `count` is zero, `InvalidHintKeys` when `keys`
/// is empty.
pub fn generate_key_sequences(count: usize, keys: &[char]) -> Result<Vec<Vec<char>>, JumpError> {
    if count == 0 {
        return Err(JumpError::EmptyTargetSet);
    }
    if keys.is_empty() {
        return Err(JumpError::InvalidHintKeys("no hint keys configured".to_string()));
    }
    if keys.len() == 1 && count > 1 {
        return Err(JumpError::InvalidHintKeys(format!(
            "a single hint key cannot label {} targets",
            count
        )));
    }

    let length = sequence_length(count, keys.len());
    Ok(KeySequencer::new(length, keys).take(count).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn joined(seqs: &[Vec<char>]) -> Vec<String> {
        seqs.iter().map(|s| s.iter().collect()).collect()
    }

    #[test]
    fn test_sequence_length() {
        assert_eq!(sequence_length(1, 2), 1);
        assert_eq!(sequence_length(2, 2), 1);
        assert_eq!(sequence_length(3, 2), 2);
        assert_eq!(sequence_length(8, 2), 3);
        assert_eq!(sequence_length(10, 2), 4);
        assert_eq!(sequence_length(5, 8), 1);
        assert_eq!(sequence_length(9, 8), 2);
        assert_eq!(sequence_length(65, 8), 3);
    }

    #[test]
    fn test_single_char_sequences() {
        let seqs = generate_key_sequences(5, &keys("fjdksla;")).unwrap();
        assert_eq!(joined(&seqs), vec!["f", "j", "d", "k", "s"]);
    }

    #[test]
    fn test_odometer_order() {
        let seqs = generate_key_sequences(3, &keys("xy")).unwrap();
        assert_eq!(joined(&seqs), vec!["xx", "xy", "yx"]);

        let seqs = generate_key_sequences(10, &keys("ab")).unwrap();
        assert_eq!(
            joined(&seqs),
            vec![
                "aaaa", "aaab", "aaba", "aabb", "abaa", "abab", "abba", "abbb", "baaa", "baab"
            ]
        );
    }

    #[test]
    fn test_sequences_are_distinct_and_equal_length() {
        let alphabet = keys("asdf");
        for count in 1..=70 {
            let seqs = generate_key_sequences(count, &alphabet).unwrap();
            assert_eq!(seqs.len(), count);

            let len = sequence_length(count, alphabet.len());
            assert!(seqs.iter().all(|s| s.len() == len));
            assert!(alphabet.len().pow(len as u32) >= count);
            assert!(len == 1 || alphabet.len().pow(len as u32 - 1) < count);

            let mut unique = joined(&seqs);
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), count);
        }
    }

    #[test]
    fn test_deterministic() {
        let alphabet = keys("fjdksla;");
        assert_eq!(
            generate_key_sequences(40, &alphabet).unwrap(),
            generate_key_sequences(40, &alphabet).unwrap()
        );
    }

    #[test]
    fn test_exact_capacity() {
        let seqs = generate_key_sequences(4, &keys("ab")).unwrap();
        assert_eq!(joined(&seqs), vec!["aa", "ab", "ba", "bb"]);
    }

    #[test]
    fn test_zero_count_fails() {
        assert!(matches!(
            generate_key_sequences(0, &keys("ab")),
            Err(JumpError::EmptyTargetSet)
        ));
    }

    #[test]
    fn test_empty_keys_fail() {
        assert!(matches!(
            generate_key_sequences(3, &[]),
            Err(JumpError::InvalidHintKeys(_))
        ));
        assert!(matches!(
            generate_key_sequences(3, &['a']),
            Err(JumpError::InvalidHintKeys(_))
        ));
        assert_eq!(generate_key_sequences(1, &['a']).unwrap(), vec![vec!['a']]);
    }
}
