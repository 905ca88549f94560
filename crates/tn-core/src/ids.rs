use core::fmt;
use core::str::FromStr;

use crate::TnError;

/// Identifier of a station in the transport network.
///
/// Ids come from the data files and user input, so they are plain integers
/// rather than dense indices. Ordering follows the integer value, which is
/// what every ordered container in the workspace relies on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StationId(i64);

impl StationId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Recover the raw integer.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for StationId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl FromStr for StationId {
    type Err = TnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| TnError::InvalidStationId {
                text: s.to_string(),
            })
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
