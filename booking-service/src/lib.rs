pub mod client;
pub mod controllers;
pub mod models;
