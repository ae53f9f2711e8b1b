use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex_lite::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

use crate::constants::FIELD_SEPARATOR;
use crate::error::{RankError, Result};

/// One ranked participant as stored in the item's hidden input:
/// `RANK--USERNAME--TEAM`. The team may be empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: String,
    pub username: String,
    pub team: String,
}

fn check_field(field: &str) -> Result<()> {
    if field.contains(FIELD_SEPARATOR) {
        return Err(RankError::Separator(field.to_string()));
    }
    Ok(())
}

impl RankedEntry {
    pub fn new(
        rank: impl Into<String>,
        username: impl Into<String>,
        team: impl Into<String>,
    ) -> Result<Self> {
        let entry = RankedEntry {
            rank: rank.into(),
            username: username.into(),
            team: team.into(),
        };
        check_field(&entry.rank)?;
        check_field(&entry.username)?;
        check_field(&entry.team)?;
        Ok(entry)
    }

    /// Parse an encoded value. Anything other than exactly three fields is
    /// rejected rather than partially applied.
    pub fn parse(value: &str) -> Result<Self> {
        let parts: Vec<&str> = value.split(FIELD_SEPARATOR).collect();
        match parts.as_slice() {
            [rank, username, team] => Ok(RankedEntry {
                rank: rank.to_string(),
                username: username.to_string(),
                team: team.to_string(),
            }),
            _ => Err(RankError::Malformed {
                value: value.to_string(),
                fields: parts.len(),
            }),
        }
    }

    pub fn with_team(&self, team: &str) -> Result<Self> {
        check_field(team)?;
        Ok(RankedEntry {
            team: team.to_string(),
            ..self.clone()
        })
    }

    pub fn with_rank(&self, rank: &str) -> Result<Self> {
        check_field(rank)?;
        Ok(RankedEntry {
            rank: rank.to_string(),
            ..self.clone()
        })
    }

    /// Numeric rank, when the rank field is a plain non-negative integer.
    pub fn rank_number(&self) -> Option<u32> {
        if self.rank.is_empty() || !self.rank.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.rank.parse().ok()
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.rank,
            self.username,
            self.team,
            sep = FIELD_SEPARATOR
        )
    }
}

impl FromStr for RankedEntry {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self> {
        RankedEntry::parse(s)
    }
}

// ASCII only, matching the page's `/\d+/`.
static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+").expect("digit run pattern"));

/// Replace the first run of ASCII digits in `value` with `replacement`,
/// leaving the rest untouched. Returns `value` unchanged when it has no
/// digits. This is the rewrite the page historically applied on drop.
pub fn replace_first_digit_run(value: &str, replacement: &str) -> String {
    DIGIT_RUN
        .replacen(value, 1, NoExpand(replacement))
        .into_owned()
}
