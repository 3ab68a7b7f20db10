pub mod appointment;
pub mod contact;
pub mod datetime;
pub mod response;

pub use appointment::{Appointment, AppointmentStatus, PetType};
pub use contact::ContactMessage;
pub use response::{AppointmentResponse, CreatedResponse, MessageResponse};
