/// Markup contract shared with the fixture page templates.
/// Class names are given without the leading dot.
pub const TEAM_SELECTION_CLASS: &str = "team-selection";
/// Id of the `<datalist>` holding team name suggestions.
pub const TEAMS_DATALIST_ID: &str = "teams";
pub const SORTABLE_CLASS: &str = "sortable";
/// Marks a sortable container whose controller starts disabled.
pub const DISABLED_CLASS: &str = "disabled";
/// Marks an item that cannot be dragged nor used as a drop reference.
pub const NO_SORT_CLASS: &str = "no-sort";
/// Prefix of the hidden input ids, followed by the username.
pub const USER_ID_PREFIX: &str = "user-";
/// Field separator of the `RANK--USERNAME--TEAM` encoding.
pub const FIELD_SEPARATOR: &str = "--";
/// Event dispatched on an item after it has been dropped.
pub const SORTED_EVENT: &str = "sorted";
/// Event htmx fires on the document after swapping content in.
pub const AFTER_SWAP_EVENT: &str = "htmx:afterSwap";

// Sortable defaults
pub const ANIMATION_MS: u32 = 150;
pub const SHARED_GROUP: &str = "shared";
pub const HANDLE_SELECTOR: &str = ".handle";
pub const GHOST_CLASS: &str = "blue-background-class";
pub const FILTER_SELECTOR: &str = ".no-sort";
