//! GeoAddress short codes.
//!
//! A code has the shape `GAN.` + letter + digit + letter + `.` + three letters,
//! for example `GAN.F84G.ABC` is *not* valid (four characters in the middle
//! group) while `GAN.F8G.ABC` is. Codes are decorative: they are drawn at
//! random and carry no location information.

use core::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Length of every well-formed code.
const CODE_LENGTH: usize = 11;

#[derive(Clone, Copy)]
enum Slot {
    Literal(u8),
    Letter,
    Digit,
}

const PATTERN: [Slot; CODE_LENGTH] = [
    Slot::Literal(b'G'),
    Slot::Literal(b'A'),
    Slot::Literal(b'N'),
    Slot::Literal(b'.'),
    Slot::Letter,
    Slot::Digit,
    Slot::Letter,
    Slot::Literal(b'.'),
    Slot::Letter,
    Slot::Letter,
    Slot::Letter,
];

/// Errors that can occur when parsing a [`GeoCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GeoCodeError {
    /// The input is empty.
    #[error("code cannot be empty")]
    Empty,
    /// The input has the wrong number of characters.
    #[error("code must be {expected} characters (got {found})")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Length of the input.
        found: usize,
    },
    /// A character does not fit the code shape.
    #[error("expected {expected} at position {position}")]
    Mismatch {
        /// Zero-based character position.
        position: usize,
        /// Description of what was expected there.
        expected: &'static str,
    },
}

/// A well-formed GeoAddress code such as `GAN.K7Q.XYZ`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GeoCode(String);

impl GeoCode {
    /// Generate a code from the thread-local random source.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Generate a code from the given random source.
    ///
    /// Each letter is uniform over `A-Z` and the digit uniform over `0-9`.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = PATTERN
            .iter()
            .map(|slot| match *slot {
                Slot::Literal(b) => char::from(b),
                Slot::Letter => char::from(b'A' + rng.random_range(0..26u8)),
                Slot::Digit => char::from(b'0' + rng.random_range(0..10u8)),
            })
            .collect();
        Self(code)
    }

    /// Parse and validate a code. Matching is case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns an error if the input does not have the `GAN.XDX.XXX` shape.
    pub fn parse(s: &str) -> Result<Self, GeoCodeError> {
        if s.is_empty() {
            return Err(GeoCodeError::Empty);
        }
        let found = s.chars().count();
        if found != CODE_LENGTH {
            return Err(GeoCodeError::WrongLength {
                expected: CODE_LENGTH,
                found,
            });
        }

        for (position, (byte, slot)) in s.bytes().zip(PATTERN.iter()).enumerate() {
            let (ok, expected) = match *slot {
                Slot::Literal(b'.') => (byte == b'.', "'.'"),
                Slot::Literal(b) => (byte == b, "the GAN prefix"),
                Slot::Letter => (byte.is_ascii_uppercase(), "an uppercase letter"),
                Slot::Digit => (byte.is_ascii_digit(), "a digit"),
            };
            if !ok {
                return Err(GeoCodeError::Mismatch { position, expected });
            }
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the code and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for GeoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for GeoCode {
    type Err = GeoCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for GeoCode {
    type Error = GeoCodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<GeoCode> for String {
    fn from(code: GeoCode) -> Self {
        code.0
    }
}

impl AsRef<str> for GeoCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn matches_grammar(code: &str) -> bool {
        let b = code.as_bytes();
        b.len() == 11
            && code.starts_with("GAN.")
            && b[4].is_ascii_uppercase()
            && b[5].is_ascii_digit()
            && b[6].is_ascii_uppercase()
            && b[7] == b'.'
            && b[8..].iter().all(u8::is_ascii_uppercase)
    }

    #[test]
    fn test_generated_codes_match_grammar() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let code = GeoCode::generate_with(&mut rng);
            assert!(matches_grammar(code.as_str()), "bad code {code}");
            assert!(GeoCode::parse(code.as_str()).is_ok());
        }
    }

    #[test]
    fn test_thread_rng_generation_matches_grammar() {
        let code = GeoCode::generate();
        assert!(matches_grammar(code.as_str()));
    }

    #[test]
    fn test_same_seed_same_code() {
        let a = GeoCode::generate_with(&mut StdRng::seed_from_u64(42));
        let b = GeoCode::generate_with(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_letter_and_digit_is_reachable() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut letters = [false; 26];
        let mut digits = [false; 10];
        for _ in 0..5_000 {
            let code = GeoCode::generate_with(&mut rng);
            let b = code.as_str().as_bytes();
            letters[usize::from(b[4] - b'A')] = true;
            digits[usize::from(b[5] - b'0')] = true;
        }
        assert!(letters.iter().all(|seen| *seen));
        assert!(digits.iter().all(|seen| *seen));
    }

    #[test]
    fn test_parse_valid() {
        let code = GeoCode::parse("GAN.F8G.ABC").unwrap();
        assert_eq!(code.to_string(), "GAN.F8G.ABC");
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            GeoCode::parse("GAN.F84G.ABC"),
            Err(GeoCodeError::WrongLength {
                expected: 11,
                found: 12
            })
        );
        assert_eq!(GeoCode::parse(""), Err(GeoCodeError::Empty));
    }

    #[test]
    fn test_parse_rejects_lowercase_and_bad_prefix() {
        assert!(matches!(
            GeoCode::parse("gan.F8G.ABC"),
            Err(GeoCodeError::Mismatch { position: 0, .. })
        ));
        assert!(matches!(
            GeoCode::parse("GAN.F8g.ABC"),
            Err(GeoCodeError::Mismatch { position: 6, .. })
        ));
        assert!(matches!(
            GeoCode::parse("GAN.FXG.ABC"),
            Err(GeoCodeError::Mismatch { position: 5, .. })
        ));
        assert!(matches!(
            GeoCode::parse("GAN-F8G.ABC"),
            Err(GeoCodeError::Mismatch { position: 3, .. })
        ));
    }

    #[test]
    fn test_serde_rejects_malformed_code() {
        let ok: GeoCode = serde_json::from_str("\"GAN.A1B.CDE\"").unwrap();
        assert_eq!(ok.as_str(), "GAN.A1B.CDE");
        assert!(serde_json::from_str::<GeoCode>("\"GAN.A1B\"").is_err());
    }
}
