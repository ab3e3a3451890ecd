use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Regression models that project a multi-rep set onto a single-rep maximum.
///
/// The set is closed: every variant has a closed-form equation in
/// [`crate::calculations::estimate`]. Free-text names are mapped onto it with
/// [`Formula::parse`] (strict) or [`Formula::parse_or_default`] (lenient).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    Epley,
    McGlothin,
    Lombardi,
    Mayhew,
    OConner,
    Wathen,
    #[default]
    Brzycki,
}

/// Error returned by [`Formula::from_str`] for names outside the closed set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown formula '{0}'")]
pub struct ParseFormulaError(pub String);

impl Formula {
    /// Every formula, in display order.
    pub const ALL: [Formula; 7] = [
        Formula::Epley,
        Formula::McGlothin,
        Formula::Lombardi,
        Formula::Mayhew,
        Formula::OConner,
        Formula::Wathen,
        Formula::Brzycki,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Epley => "Epley",
            Self::McGlothin => "McGlothin",
            Self::Lombardi => "Lombardi",
            Self::Mayhew => "Mayhew",
            Self::OConner => "OConner",
            Self::Wathen => "Wathen",
            Self::Brzycki => "Brzycki",
        }
    }

    /// Matches a formula name, ignoring ASCII case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|formula| formula.as_str().eq_ignore_ascii_case(s))
    }

    /// Like [`Formula::parse`], but unrecognized names fall back to
    /// [`Formula::Brzycki`].
    ///
    /// ```
    /// use e1rm_core::Formula;
    ///
    /// assert_eq!(Formula::parse_or_default("epley"), Formula::Epley);
    /// assert_eq!(Formula::parse_or_default("NotAFormula"), Formula::Brzycki);
    /// ```
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            warn!(input = %s, "unrecognized formula, using {}", Self::default());
            Self::default()
        })
    }
}

impl fmt::Display for Formula {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Formula {
    type Err = ParseFormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseFormulaError(s.to_string()))
    }
}
