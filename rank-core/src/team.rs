use crate::constants::USER_ID_PREFIX;
use crate::dom::Dom;
use crate::encoding::RankedEntry;
use crate::error::{RankError, Result};

pub fn user_input_id(username: &str) -> String {
    format!("{USER_ID_PREFIX}{username}")
}

/// Set the team of `username`'s ranked input, keeping rank and username.
/// Returns the rewritten entry.
pub fn update_team<D: Dom>(dom: &mut D, username: &str, team_name: &str) -> Result<RankedEntry> {
    let id = user_input_id(username);
    let input = dom.element_by_id(&id).ok_or(RankError::NotFound(id))?;
    let entry = RankedEntry::parse(&dom.value(&input))?.with_team(team_name)?;
    dom.set_value(&input, &entry.encode())?;
    Ok(entry)
}
