mod gate;
mod settings;

pub use gate::{CodeGrant, GateConfig, RoleButton};
pub use settings::Settings;
