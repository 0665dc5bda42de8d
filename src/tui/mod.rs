pub mod app;
pub mod input;
pub mod layout;
pub mod render;
pub mod theme;
pub mod wrap;

pub use app::{RunOptions, run};
