pub mod cooldown;
pub mod formatting;
pub mod roles;
