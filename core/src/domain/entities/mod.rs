//! Domain entities representing core business objects.

pub mod banner;
pub mod collection;
pub mod otp_entry;
pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use banner::{Banner, ImageType, ImageUpload, MAX_IMAGE_BYTES};
pub use collection::{Collection, CollectionImage};
pub use otp_entry::{OtpEntry, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS};
pub use token::{Claims, SESSION_TOKEN_EXPIRY_SECONDS};
