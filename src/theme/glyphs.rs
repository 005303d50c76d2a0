pub const SEP_RIGHT: &str = "\u{e0b0}";
pub const LOGO: &str = "\u{f0e7}";
pub const SEARCH: &str = "\u{f002}";
pub const CARD: &str = "▌";
pub const DRAG: &str = "⠿";
pub const SELECTED: &str = "›";
pub const SKELETON: &str = "░";
pub const FEED: &str = "•";
