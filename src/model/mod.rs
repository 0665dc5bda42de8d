pub mod board;
pub mod chan;
pub mod config;
pub mod page;

pub use board::*;
pub use config::*;
pub use page::*;
