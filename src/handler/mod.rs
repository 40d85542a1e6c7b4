pub mod appointments;
pub mod auth;
pub mod facility;
pub mod reports;
pub mod users;
