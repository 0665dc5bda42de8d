pub mod board_search;
pub mod pages;
pub mod routes;
pub mod rows;
pub mod text;
