pub mod cache;
pub mod config_io;
pub mod http_site;
pub mod site;
pub mod state;
