//! Emoji used in bot replies and button labels

pub const GEM: &str = "\u{1F48E}";
pub const SMILE: &str = "\u{1F642}";
pub const SUNGLASSES: &str = "\u{1F60E}";
pub const WOW: &str = "\u{1F604}";
pub const DONT_KNOW: &str = "\u{1F937}";
pub const SAD: &str = "\u{1F63F}";
pub const BICEPS: &str = "\u{1F4AA}";
pub const BUTTON_START: &str = "\u{25B6}";
pub const BUTTON_END: &str = "\u{25C0}";
