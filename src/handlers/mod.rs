// Handlers module

pub mod screenshot;
pub mod whatsapp;

pub use screenshot::{get_screenshot_handler, save_screenshot_handler};
pub use whatsapp::whatsapp_handler;
