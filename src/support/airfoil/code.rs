use std::{fmt, str::FromStr};

use thiserror::Error;

use super::AirfoilProfile;

/// A validated NACA four-digit airfoil code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AirfoilCode {
    digits: [u8; 4],
}

/// Errors that can occur while parsing an [`AirfoilCode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AirfoilCodeError {
    /// The code does not have exactly four characters.
    #[error("NACA code must have 4 digits, got {len}")]
    Length {
        /// Character count of the rejected code.
        len: usize,
    },

    /// The code contains a character that is not an ASCII digit.
    #[error("NACA code contains non-digit character {found:?}")]
    NonDigit {
        /// The offending character.
        found: char,
    },
}

impl AirfoilCode {
    /// The section used for wing meshes when no other code is requested.
    pub const NACA_2412: Self = Self {
        digits: [2, 4, 1, 2],
    };

    /// Maximum camber as a fraction of chord.
    #[must_use]
    pub fn camber(&self) -> f64 {
        f64::from(self.digits[0]) / 100.0
    }

    /// Chordwise position of maximum camber as a fraction of chord.
    #[must_use]
    pub fn camber_position(&self) -> f64 {
        f64::from(self.digits[1]) / 10.0
    }

    /// Maximum thickness as a fraction of chord.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        f64::from(self.digits[2] * 10 + self.digits[3]) / 100.0
    }

    /// Samples this section with the given chord and station count.
    #[must_use]
    pub fn profile(&self, chord: f64, n_points: usize) -> AirfoilProfile {
        AirfoilProfile::naca4(
            self.camber(),
            self.camber_position(),
            self.thickness(),
            chord,
            n_points,
        )
    }
}

impl Default for AirfoilCode {
    fn default() -> Self {
        Self::NACA_2412
    }
}

impl FromStr for AirfoilCode {
    type Err = AirfoilCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != 4 {
            return Err(AirfoilCodeError::Length { len });
        }

        let mut digits = [0_u8; 4];
        for (slot, ch) in digits.iter_mut().zip(s.chars()) {
            let digit = ch
                .to_digit(10)
                .ok_or(AirfoilCodeError::NonDigit { found: ch })?;
            *slot = u8::try_from(digit).map_err(|_| AirfoilCodeError::NonDigit { found: ch })?;
        }

        Ok(Self { digits })
    }
}

impl fmt::Display for AirfoilCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.digits;
        write!(f, "{a}{b}{c}{d}")
    }
}
