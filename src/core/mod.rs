pub mod clock;
pub mod services;
pub mod session;
pub mod utils;
