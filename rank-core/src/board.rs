use std::collections::BTreeMap;

use serde::Serialize;

use crate::colorizer::TeamColors;
use crate::constants::SORTABLE_CLASS;
use crate::dom::Dom;
use crate::encoding::RankedEntry;
use crate::error::Result;

/// Snapshot of the ranked inputs currently on the page, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RankBoard {
    pub entries: Vec<RankedEntry>,
}

/// Everything the page usually wants from a board in one serializable value.
#[derive(Clone, Debug, Serialize)]
pub struct BoardSummary {
    pub entries: Vec<RankedEntry>,
    pub grouped: BTreeMap<u32, Vec<String>>,
    pub unranked: Vec<String>,
    pub teams: Vec<String>,
}

impl RankBoard {
    /// Read the hidden input of every item in every sortable container.
    /// Any malformed value aborts the snapshot.
    pub fn collect<D: Dom>(dom: &D) -> Result<Self> {
        let mut entries = Vec::new();
        for container in dom.query_class(None, SORTABLE_CLASS)? {
            for input in dom.inputs(&container)? {
                entries.push(RankedEntry::parse(&dom.value(&input))?);
            }
        }
        Ok(RankBoard { entries })
    }

    /// Usernames per numeric rank. Every rank from 1 up to the larger of
    /// `max_rank` and the number of entries is present even when empty; ranks
    /// above that bound appear only when occupied. Rank 0 holds players not
    /// ranked yet; non-numeric ranks are left out.
    pub fn grouped_to(&self, max_rank: u32) -> BTreeMap<u32, Vec<String>> {
        let mut groups: BTreeMap<u32, Vec<String>> = BTreeMap::new();
        for e in &self.entries {
            if let Some(rank) = e.rank_number() {
                groups.entry(rank).or_default().push(e.username.clone());
            }
        }
        let players = u32::try_from(self.entries.len()).unwrap_or(u32::MAX);
        for rank in 1..=max_rank.max(players) {
            groups.entry(rank).or_default();
        }
        groups
    }

    pub fn grouped(&self) -> BTreeMap<u32, Vec<String>> {
        self.grouped_to(0)
    }

    /// Encoded values ordered by rank; non-numeric ranks sort last, ties keep
    /// document order.
    pub fn flat(&self) -> Vec<String> {
        let mut sorted: Vec<&RankedEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.rank_number().unwrap_or(u32::MAX));
        sorted.into_iter().map(RankedEntry::encode).collect()
    }

    pub fn unranked(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.rank_number() == Some(0))
            .map(|e| e.username.clone())
            .collect()
    }

    pub fn teams(&self) -> Vec<String> {
        let mut colors = TeamColors::default();
        for e in &self.entries {
            colors.observe(&e.team);
        }
        colors.teams().to_vec()
    }

    pub fn summary(&self) -> BoardSummary {
        BoardSummary {
            entries: self.entries.clone(),
            grouped: self.grouped(),
            unranked: self.unranked(),
            teams: self.teams(),
        }
    }
}
