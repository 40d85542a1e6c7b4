pub mod appointment_service;
pub mod background_jobs;
pub mod error;
pub mod trust_service;
