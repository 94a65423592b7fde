pub mod access;
pub mod escalation;
pub mod store;
pub mod tracker;
