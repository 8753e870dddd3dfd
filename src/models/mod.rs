pub mod appointments;
pub mod pediatricians;
pub mod schedulings;
pub mod users;

pub mod auth_tokens;
