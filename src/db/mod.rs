pub mod appointmentdb;
pub mod db;
pub mod facilitydb;
pub mod reportdb;
pub mod userdb;

pub use appointmentdb::AppointmentExt;
pub use facilitydb::FacilityExt;
pub use reportdb::ReportExt;
pub use userdb::UserExt;
