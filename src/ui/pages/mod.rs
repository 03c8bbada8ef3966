//! Application pages module
//!
//! - Login page
//! - Register page
//! - Email verification notice
//! - Home (protected)
//! - Not found

mod home;
mod login;
mod not_found;
mod register;
mod verify_email;

pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use register::RegisterPage;
pub use verify_email::VerifyEmailPage;
