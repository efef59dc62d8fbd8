use std::{fmt, str::FromStr};

use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

const STAR: char = '\u{2B50}';
const VARIATION_SELECTOR: char = '\u{FE0F}';

/// One of five discrete rating levels.
///
/// Stored comments carry the rating as a repetition of the star
/// emoji (`"⭐️⭐️⭐️"`), so that is also the canonical string
/// representation of this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum StarRating {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

impl StarRating {
    pub const fn stars(self) -> u8 {
        self as u8
    }

    pub fn from_stars(stars: u8) -> Option<Self> {
        Self::iter().find(|r| r.stars() == stars)
    }

    pub fn to_emoji(self) -> String {
        let mut s = String::with_capacity(usize::from(self.stars()) * 6);
        for _ in 0..self.stars() {
            s.push(STAR);
            s.push(VARIATION_SELECTOR);
        }
        s
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid star rating: {0:?}")]
pub struct StarRatingParseError(pub String);

impl FromStr for StarRating {
    type Err = StarRatingParseError;

    /// Accepts the emoji representation (with or without
    /// variation selectors) as well as a plain digit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || StarRatingParseError(s.to_owned());
        if let Ok(n) = trimmed.parse::<u8>() {
            return Self::from_stars(n).ok_or_else(err);
        }
        let mut count = 0u8;
        for c in trimmed.chars() {
            match c {
                STAR => count = count.saturating_add(1),
                VARIATION_SELECTOR => {}
                _ => return Err(err()),
            }
        }
        Self::from_stars(count).ok_or_else(err)
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_emoji())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emoji_representation() {
        assert_eq!("\u{2B50}\u{FE0F}", StarRating::One.to_emoji());
        assert_eq!("\u{2B50}\u{FE0F}".repeat(3), StarRating::Three.to_emoji());
        assert_eq!("\u{2B50}\u{FE0F}".repeat(5), StarRating::Five.to_string());
    }

    #[test]
    fn parse_emoji_strings() {
        for rating in StarRating::iter() {
            assert_eq!(Ok(rating), rating.to_emoji().parse());
        }
        // without variation selectors
        assert_eq!(Ok(StarRating::Two), "\u{2B50}\u{2B50}".parse());
    }

    #[test]
    fn parse_digits() {
        assert_eq!(Ok(StarRating::Four), "4".parse());
        assert!("0".parse::<StarRating>().is_err());
        assert!("6".parse::<StarRating>().is_err());
    }

    #[test]
    fn reject_invalid() {
        assert!("".parse::<StarRating>().is_err());
        assert!("\u{2B50}\u{FE0F}".repeat(6).parse::<StarRating>().is_err());
        assert!("great".parse::<StarRating>().is_err());
    }

    #[test]
    fn ordering_follows_star_count() {
        assert!(StarRating::One < StarRating::Five);
        assert_eq!(3, StarRating::Three.stars());
    }
}
