//! Combobox widget - a dropdown select with optional search and multi-select.

mod events;
mod layout;
mod render;
mod state;

pub use events::EventResult;
pub use render::MENU_Z;
pub use state::{ComboState, Combobox, InteractionMode};
