pub mod showtime_controller;
