pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod news;
pub mod util;
