pub mod admin_movie_controller;
pub mod cinema_controller;
pub mod movie_controller;
