//! Playback speed and its per-tick delay.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::{SortError, SortResult};

pub const MIN_SPEED: u8 = 1;
pub const MAX_SPEED: u8 = 100;
const MIN_DELAY_MS: u64 = 4;

/// Speed on a 1..=100 scale; higher is faster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Speed(u8);

impl Speed {
    pub fn new(value: u8) -> SortResult<Self> {
        if !(MIN_SPEED..=MAX_SPEED).contains(&value) {
            return Err(SortError::InvalidArgument(format!(
                "speed {value} outside {MIN_SPEED}..={MAX_SPEED}"
            )));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// `max(4, round(140 - 1.36 * speed))` milliseconds.
    pub fn delay(self) -> Duration {
        // In hundredths of a millisecond; always positive on 1..=100.
        let hundredths = 14_000 - 136 * u64::from(self.0);
        let ms = (hundredths + 50) / 100;
        Duration::from_millis(ms.max(MIN_DELAY_MS))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(60)
    }
}

impl TryFrom<u8> for Speed {
    type Error = SortError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Speed> for u8 {
    fn from(speed: Speed) -> Self {
        speed.0
    }
}

impl FromStr for Speed {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| SortError::InvalidArgument(format!("invalid speed {s:?}")))?;
        Self::new(value)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_endpoints() {
        assert_eq!(Speed::new(1).expect("speed").delay(), Duration::from_millis(139));
        assert_eq!(Speed::new(100).expect("speed").delay(), Duration::from_millis(4));
        assert_eq!(Speed::new(50).expect("speed").delay(), Duration::from_millis(72));
    }

    #[test]
    fn delay_never_increases_with_speed() {
        let delays: Vec<_> = (MIN_SPEED..=MAX_SPEED)
            .map(|s| Speed::new(s).expect("speed").delay())
            .collect();
        assert!(delays.windows(2).all(|w| w[0] >= w[1]));
        assert!(delays.iter().all(|d| *d >= Duration::from_millis(MIN_DELAY_MS)));
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Speed::new(0).is_err());
        assert!(Speed::new(101).is_err());
        assert!("abc".parse::<Speed>().is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: Speed = serde_json::from_str("25").expect("speed");
        assert_eq!(ok.get(), 25);
        assert!(serde_json::from_str::<Speed>("0").is_err());
    }
}
