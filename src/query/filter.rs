//! Query parameter types and prompt-answer parsing.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AnnocatError;

/// A tri-state flag filter: require the flag, require its absence, or ignore it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    #[default]
    Any,
    Yes,
    No,
}

impl TriState {
    pub const ALL: [TriState; 3] = [TriState::Any, TriState::Yes, TriState::No];
}

impl FromStr for TriState {
    type Err = AnnocatError;

    /// Accepts `""`, `a`, `all` (Any), `y`, `yes` (Yes), `n`, `no` (No),
    /// ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "a" | "all" => Ok(TriState::Any),
            "y" | "yes" => Ok(TriState::Yes),
            "n" | "no" => Ok(TriState::No),
            other => Err(AnnocatError::invalid_input(
                "flag filter",
                format!("'{other}' (expected yes, no or all)"),
            )),
        }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TriState::Any => "all",
            TriState::Yes => "yes",
            TriState::No => "no",
        };
        f.write_str(name)
    }
}

/// Parameters of a dimension/flag search.
///
/// `None` bounds are filled in at query time: minima default to 0 and maxima
/// to the largest dimension observed so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DimensionQuery {
    pub min_width: Option<u32>,
    pub max_width: Option<u32>,
    pub min_height: Option<u32>,
    pub max_height: Option<u32>,
    pub difficult: TriState,
    pub truncated: TriState,
}

impl DimensionQuery {
    /// Query with explicit inclusive bounds on both axes.
    pub fn with_bounds(min_width: u32, max_width: u32, min_height: u32, max_height: u32) -> Self {
        Self {
            min_width: Some(min_width),
            max_width: Some(max_width),
            min_height: Some(min_height),
            max_height: Some(max_height),
            ..Default::default()
        }
    }

    pub fn difficult(mut self, filter: TriState) -> Self {
        self.difficult = filter;
        self
    }

    pub fn truncated(mut self, filter: TriState) -> Self {
        self.truncated = filter;
        self
    }
}

/// Inclusive bounds with every default resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedBounds {
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
}

impl ResolvedBounds {
    /// True if `width` and `height` both fall inside the bounds.
    ///
    /// A min above its max matches nothing.
    pub fn contains(&self, width: u32, height: u32) -> bool {
        (self.min_width..=self.max_width).contains(&width)
            && (self.min_height..=self.max_height).contains(&height)
    }
}

/// Parse a range prompt answer.
///
/// Blank input means "use the default" and yields `None`. Otherwise the input
/// must be a non-negative integer.
pub fn parse_bound(field: &str, input: &str) -> Result<Option<u32>, AnnocatError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed.parse::<u32>().map(Some).map_err(|_| {
        AnnocatError::invalid_input(
            field,
            format!("'{trimmed}' (expected an integer greater than or equal to zero)"),
        )
    })
}
