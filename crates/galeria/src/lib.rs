pub mod controller;
pub mod key_binds;
#[cfg(not(target_arch = "wasm32"))]
pub mod manifest;
pub mod media;
pub mod message;
pub mod page;
pub mod session;
pub mod view;

#[cfg(target_arch = "wasm32")]
mod dom;

pub use controller::GalleryLightboxController;
pub use message::{ClickTarget, Effect, LightboxMessage, Message};
