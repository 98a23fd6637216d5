//! Permissive parsing of comma-separated embedding text
//!
//! Each token contributes its longest leading decimal number, so `0.5abc`
//! reads as `0.5` and `1e` as `1`. Tokens with no leading number, or whose
//! number is not finite, are dropped without raising an error. Surviving
//! values keep their input order.

use tracing::debug;

/// Result of parsing an embedding field
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEmbedding {
    pub values: Vec<f64>,
    /// Non-blank tokens that were dropped
    pub discarded: usize,
}

/// Split on `,`, trim, and keep every token whose numeric prefix is a finite `f64`
pub fn parse_embedding(input: &str) -> ParsedEmbedding {
    let mut values = Vec::new();
    let mut discarded = 0;

    for token in input.split(',').map(str::trim) {
        match numeric_prefix(token).and_then(|prefix| prefix.parse::<f64>().ok()) {
            Some(value) if value.is_finite() => values.push(value),
            _ if token.is_empty() => {}
            _ => discarded += 1,
        }
    }

    if discarded > 0 {
        debug!(discarded, kept = values.len(), "Dropped non-numeric embedding tokens");
    }

    ParsedEmbedding { values, discarded }
}

/// Longest prefix of `token` shaped like `[+-]digits[.digits][(e|E)[+-]digits]`
///
/// The mantissa needs at least one digit. An exponent marker without digits
/// after it is left out of the prefix.
fn numeric_prefix(token: &str) -> Option<&str> {
    let bytes = token.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    Some(&token[..end])
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
