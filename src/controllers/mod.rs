pub mod navigation_controller;
pub mod weather_controller;
