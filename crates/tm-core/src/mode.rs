//! The caller's travel-mode preference for a planning request.

use std::fmt;
use std::str::FromStr;

/// How aggressively the planner should choose flights over driving.
///
/// | Variant   | Policy                                                     |
/// |-----------|------------------------------------------------------------|
/// | `Auto`    | Fly only when it is long enough and not much less efficient |
/// | `Driving` | Never fly                                                  |
/// | `Flying`  | Fly whenever the segment is plausibly flyable              |
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ModePreference {
    #[default]
    Auto,
    Driving,
    Flying,
}

impl ModePreference {
    /// Wire label, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ModePreference::Auto    => "auto",
            ModePreference::Driving => "driving",
            ModePreference::Flying  => "flying",
        }
    }

    /// `false` only for `Driving`.
    #[inline]
    pub fn allows_flight(self) -> bool {
        !matches!(self, ModePreference::Driving)
    }
}

impl fmt::Display for ModePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "auto"    => Ok(ModePreference::Auto),
            "driving" => Ok(ModePreference::Driving),
            "flying"  => Ok(ModePreference::Flying),
            other     => Err(format!(
                "unknown preference {other:?}: expected \"auto\", \"driving\", or \"flying\""
            )),
        }
    }
}
