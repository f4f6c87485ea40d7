pub mod params;
pub mod user;
pub mod workout;
