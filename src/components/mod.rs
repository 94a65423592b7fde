pub mod bouncer_panel;
pub mod code_modal;
