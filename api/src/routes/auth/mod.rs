//! Login endpoints: email OTP request and verification, token check

pub mod request_otp;
pub mod verify_otp;
pub mod verify_token;

pub use request_otp::request_otp;
pub use verify_otp::verify_otp;
pub use verify_token::verify_token;
