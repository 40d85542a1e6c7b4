pub mod appointmentdtos;
pub mod facilitydtos;
pub mod reportdtos;
pub mod userdtos;
