/// Bootstrap contextual colour names, in assignment order.
pub const PALETTE: [&str; 7] = [
    "primary", // 0
    "success", // 1
    "danger",  // 2
    "warning", // 3
    "info",    // 4
    "light",   // 5
    "dark",    // 6
];

/// Prefix of every class the colorizer owns on a team input.
pub const BORDER_PREFIX: &str = "border-";

/// Colour for the `index`-th distinct team. Cycles once the palette runs out,
/// so the eighth team shares a colour with the first.
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

pub fn border_class(index: usize) -> String {
    format!("{}{}", BORDER_PREFIX, color_for(index))
}

pub fn is_border_class(class: &str) -> bool {
    class.starts_with(BORDER_PREFIX)
}
