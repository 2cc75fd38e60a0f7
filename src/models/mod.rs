pub mod appointments;
pub mod artists;
pub mod chairs;
pub mod profiles;

pub mod profile_logins;
