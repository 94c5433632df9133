pub mod cinema_model;
pub mod movie_model;
