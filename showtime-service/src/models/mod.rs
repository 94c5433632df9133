pub mod showtime_model;
