pub mod actions;
#[cfg(feature = "egui-desktop")]
pub mod app;
pub mod driver;
pub mod egui_render;
pub mod error;
pub mod prefs;
pub mod state;

#[cfg(feature = "egui-desktop")]
pub use app::launch;
