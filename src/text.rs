//! Small string cleanup helpers.

/// Keep only the ASCII digits of `input`.
pub fn remove_non_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Title-case each space-separated word: `"  new YORK "` → `"New York"`.
///
/// Runs of spaces produce empty words, which are kept as-is, so inner
/// spacing survives.
pub fn capitalize(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
