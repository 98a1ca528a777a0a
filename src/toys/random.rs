//! Random strings for generated content.

use rand::seq::SliceRandom;
use rand::Rng;

/// ASCII letters and digits.
pub const ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// ASCII letters and digits, `min..=max` characters long.
pub fn random_alphanum(min: usize, max: usize) -> String {
    random_string(ALPHANUMERIC, min, max)
}

/// Characters drawn from `charset`, `min..=max` characters long.
///
/// Reversed bounds are swapped. An empty charset gives an empty string.
pub fn random_string(charset: &str, min: usize, max: usize) -> String {
    let chars: Vec<char> = charset.chars().collect();
    if chars.is_empty() {
        return String::new();
    }

    let mut rng = rand::thread_rng();
    let len = random_len(&mut rng, min, max);
    (0..len)
        .filter_map(|_| chars.choose(&mut rng).copied())
        .collect()
}

fn random_len<R: Rng>(rng: &mut R, min: usize, max: usize) -> usize {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    rng.gen_range(low..=high)
}
