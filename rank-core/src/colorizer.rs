use crate::constants::{TEAM_SELECTION_CLASS, TEAMS_DATALIST_ID};
use crate::dom::Dom;
use crate::error::{RankError, Result};
use crate::palette::{border_class, is_border_class};

/// Distinct team names in first-seen order. A team's position is its colour
/// index. Rebuilt from the document on every pass, so removing or renaming an
/// earlier team shifts the colours of the later ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamColors {
    teams: Vec<String>,
}

impl TeamColors {
    /// Record `team` if new; returns its index, `None` for an empty value.
    pub fn observe(&mut self, team: &str) -> Option<usize> {
        if team.is_empty() {
            return None;
        }
        if let Some(i) = self.index_of(team) {
            return Some(i);
        }
        self.teams.push(team.to_string());
        Some(self.teams.len() - 1)
    }

    pub fn index_of(&self, team: &str) -> Option<usize> {
        self.teams.iter().position(|t| t == team)
    }

    pub fn class_for(&self, team: &str) -> Option<String> {
        self.index_of(team).map(border_class)
    }

    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

/// Recolour every team-selection input and rebuild the `teams` datalist.
pub fn update_team_datalist<D: Dom>(dom: &mut D) -> Result<TeamColors> {
    let datalist = dom
        .element_by_id(TEAMS_DATALIST_ID)
        .ok_or_else(|| RankError::NotFound(TEAMS_DATALIST_ID.to_string()))?;
    dom.clear_children(&datalist)?;

    let mut colors = TeamColors::default();
    for input in dom.query_class(None, TEAM_SELECTION_CLASS)? {
        let value = dom.value(&input);
        let known = colors.len();
        let index = colors.observe(&value);
        if let Some(i) = index
            && i == known
        {
            dom.append_option(&datalist, &value)?;
        }
        for class in dom.classes(&input) {
            if is_border_class(&class) {
                dom.remove_class(&input, &class)?;
            }
        }
        if let Some(i) = index {
            dom.add_class(&input, &border_class(i))?;
        }
    }
    Ok(colors)
}
