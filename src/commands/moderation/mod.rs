pub mod ban;
pub mod kick;
pub mod purge;
pub mod timeout;
pub mod warn;
