pub mod embeds;
pub mod gate;
