pub mod appointmentmodel;
pub mod facilitymodel;
pub mod reportmodel;
pub mod usermodel;
