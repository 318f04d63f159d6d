//! Application views

mod dashboard;
mod editor;
mod landing;

pub use dashboard::Dashboard;
pub use editor::Editor;
pub use landing::Landing;
