//! Score band value object

use std::fmt;

/// Lower bound (inclusive) of the caution band
pub const CAUTION_THRESHOLD: i64 = 10;

/// Lower bound (inclusive) of the positive band
pub const POSITIVE_THRESHOLD: i64 = 50;

/// Coarse classification of an overall score, used for iconography
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreBand {
    Positive,
    Caution,
    Negative,
}

impl ScoreBand {
    /// Classify an overall score
    pub const fn from_overall(overall: i64) -> Self {
        if overall >= POSITIVE_THRESHOLD {
            Self::Positive
        } else if overall >= CAUTION_THRESHOLD {
            Self::Caution
        } else {
            Self::Negative
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Caution => "caution",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries() {
        assert_eq!(ScoreBand::from_overall(0), ScoreBand::Negative);
        assert_eq!(ScoreBand::from_overall(9), ScoreBand::Negative);
        assert_eq!(ScoreBand::from_overall(10), ScoreBand::Caution);
        assert_eq!(ScoreBand::from_overall(49), ScoreBand::Caution);
        assert_eq!(ScoreBand::from_overall(50), ScoreBand::Positive);
        assert_eq!(ScoreBand::from_overall(100), ScoreBand::Positive);
    }

    #[test]
    fn banding_is_monotonic_over_range() {
        let rank = |band: ScoreBand| match band {
            ScoreBand::Negative => 0,
            ScoreBand::Caution => 1,
            ScoreBand::Positive => 2,
        };

        let mut previous = rank(ScoreBand::from_overall(0));
        for overall in 1..=100 {
            let current = rank(ScoreBand::from_overall(overall));
            assert!(current >= previous, "band decreased at {}", overall);
            previous = current;
        }
    }

    #[test]
    fn every_score_has_exactly_one_band() {
        for overall in 0..=100 {
            let band = ScoreBand::from_overall(overall);
            let matches = [
                overall >= 50,
                (10..50).contains(&overall),
                overall < 10,
            ];
            assert_eq!(matches.iter().filter(|m| **m).count(), 1);
            let expected = if matches[0] {
                ScoreBand::Positive
            } else if matches[1] {
                ScoreBand::Caution
            } else {
                ScoreBand::Negative
            };
            assert_eq!(band, expected);
        }
    }
}
