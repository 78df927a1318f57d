//! Page components for the linked views shell
//!
//! Every page reads the shared [`crate::AppHandle`] and the
//! [`crate::app::AppSnapshot`] signal that `App` provides as context.

mod dashboard;
mod navbar;
mod settings;

pub use dashboard::Dashboard;
pub use navbar::Navbar;
pub use settings::Settings;
