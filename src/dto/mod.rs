pub mod common_dto;
pub mod navigation_dto;
pub mod weather_dto;
