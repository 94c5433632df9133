pub mod controllers;
pub mod models;
