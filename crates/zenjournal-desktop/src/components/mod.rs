//! UI Components
//!
//! Reusable UI components for the desktop application.

mod button;
mod input;
mod navbar;

pub use button::{Button, ButtonVariant};
pub use input::Input;
pub use navbar::Navbar;
