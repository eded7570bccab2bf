//! Letter grades and grade-point averages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A letter grade. `W` (withdrawn) carries no points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Grade {
    #[default]
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "D+")]
    DPlus,
    D,
    F,
    W,
}

impl Grade {
    /// Every grade, best first.
    pub const ALL: [Self; 9] = [
        Self::A,
        Self::BPlus,
        Self::B,
        Self::CPlus,
        Self::C,
        Self::DPlus,
        Self::D,
        Self::F,
        Self::W,
    ];

    /// Returns the grade points, or `None` for a withdrawal.
    #[must_use]
    pub const fn points(self) -> Option<f64> {
        match self {
            Self::A => Some(4.0),
            Self::BPlus => Some(3.5),
            Self::B => Some(3.0),
            Self::CPlus => Some(2.5),
            Self::C => Some(2.0),
            Self::DPlus => Some(1.5),
            Self::D => Some(1.0),
            Self::F => Some(0.0),
            Self::W => None,
        }
    }

    /// Returns the letter as written on a transcript.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::F => "F",
            Self::W => "W",
        }
    }

    /// Returns true for a failing grade.
    #[must_use]
    pub const fn is_failing(self) -> bool {
        matches!(self, Self::F)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown grade label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown grade {0:?}")]
pub struct ParseGradeError(String);

impl FromStr for Grade {
    type Err = ParseGradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.label() == s)
            .ok_or_else(|| ParseGradeError(s.to_string()))
    }
}

/// Mean grade points over `grades`, skipping withdrawals.
///
/// Returns `None` when no grade carries points.
pub fn grade_point_average<I>(grades: I) -> Option<f64>
where
    I: IntoIterator<Item = Grade>,
{
    let (sum, count) = grades
        .into_iter()
        .filter_map(Grade::points)
        .fold((0.0, 0u32), |(sum, count), p| (sum + p, count + 1));
    (count > 0).then(|| sum / f64::from(count))
}

/// Formats an average to two decimals, or `-` when there is none.
#[must_use]
pub fn format_gpa(gpa: Option<f64>) -> String {
    gpa.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

/// The last computed average and whether the list changed since.
///
/// The average is only recomputed on request; any list mutation marks the
/// reading stale until the next [`GpaReading::compute`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GpaReading {
    value: Option<f64>,
    computed: bool,
    stale: bool,
}

impl GpaReading {
    /// Creates a reading that has never been computed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes from `grades`.
    pub fn compute<I>(&mut self, grades: I) -> Option<f64>
    where
        I: IntoIterator<Item = Grade>,
    {
        self.value = grade_point_average(grades);
        self.computed = true;
        self.stale = false;
        self.value
    }

    /// Marks the reading out of date. No effect before the first compute.
    pub fn invalidate(&mut self) {
        if self.computed {
            self.stale = true;
        }
    }

    /// Returns the last computed average.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        self.value
    }

    /// Returns true if the list changed since the last compute.
    #[must_use]
    pub const fn is_stale(&self) -> bool {
        self.stale
    }

    /// Returns true once computed at least once.
    #[must_use]
    pub const fn is_computed(&self) -> bool {
        self.computed
    }

    /// Returns the display text for the last computed average.
    #[must_use]
    pub fn display(&self) -> String {
        format_gpa(self.value)
    }
}
