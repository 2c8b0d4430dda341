pub mod config;
pub mod genius;
pub mod handlers;
pub mod http;
pub mod lyrics_page;
pub mod models;
pub mod routes;
pub mod spotify;
pub mod state;
