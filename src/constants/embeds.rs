use serenity::all::{Colour, CreateEmbed};

// ============================================================================
// Color Palette
// ============================================================================

/// Primary brand color - Deep red (this is a bouncer, after all)
pub const PRIMARY_COLOR: Colour = Colour::from_rgb(255, 68, 68);

/// Success color - Green
pub const SUCCESS_COLOR: Colour = Colour::from_rgb(0, 255, 0);

/// Error/alert color - Red
pub const ERROR_COLOR: Colour = Colour::from_rgb(255, 0, 0);

/// Tracking color - Orange, used for active attempt records
pub const TRACKING_COLOR: Colour = Colour::from_rgb(255, 165, 0);

/// Info/neutral color - Slate
pub const INFO_COLOR: Colour = Colour::from_rgb(100, 116, 139);

// ============================================================================
// Text Formatting
// ============================================================================

/// Alert banner divider
pub const ALERT_DIVIDER: &str = "━━━━━━━━━━━━━━━━━━━━━━━━";

/// Bullet point character
pub const BULLET: &str = "•";

// ============================================================================
// Embed Builders
// ============================================================================

/// Create a standard/primary embed
pub fn standard_embed() -> CreateEmbed {
    CreateEmbed::new().color(PRIMARY_COLOR)
}

/// Create a success embed
pub fn success_embed() -> CreateEmbed {
    CreateEmbed::new().color(SUCCESS_COLOR)
}

/// Create an error embed
pub fn error_embed() -> CreateEmbed {
    CreateEmbed::new().color(ERROR_COLOR)
}

/// Create a tracking embed (active attempt records)
pub fn tracking_embed() -> CreateEmbed {
    CreateEmbed::new().color(TRACKING_COLOR)
}

/// Create an info/neutral embed
pub fn info_embed() -> CreateEmbed {
    CreateEmbed::new().color(INFO_COLOR)
}

/// Format a list of items with bullet points
pub fn bullet_list(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| format!("{} {}", BULLET, item))
        .collect::<Vec<_>>()
        .join("\n")
}
