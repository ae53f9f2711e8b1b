//! Team colouring and drag-and-drop rank bookkeeping for the fixture page.
//!
//! Everything here runs against the [`dom::Dom`] trait so it can be driven by
//! the browser (see the `rank-wasm` crate) or by [`dom::Tree`] in tests.

pub mod board;
pub mod colorizer;
pub mod constants;
pub mod dom;
pub mod encoding;
pub mod error;
pub mod palette;
pub mod sorter;
pub mod team;

pub use board::{BoardSummary, RankBoard};
pub use colorizer::{TeamColors, update_team_datalist};
pub use dom::{Dom, NodeId, Tree};
pub use encoding::RankedEntry;
pub use error::{RankError, Result};
pub use palette::{PALETTE, color_for};
pub use sorter::{
    FlagHandle, RankRewrite, Registration, SortableHandle, SortableOptions, SortableRegistry,
    WireReport, on_drop, wire_subtree,
};
pub use team::update_team;
