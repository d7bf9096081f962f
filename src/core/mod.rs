pub mod dates;
pub mod services;
