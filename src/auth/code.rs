//! Verification code generation

use rand::Rng;

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 100_000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 999_999;

/// Draw a 6-digit code uniformly from [`CODE_MIN`, `CODE_MAX`]
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(CODE_MIN..=CODE_MAX).to_string()
}

/// Draw a code from the thread-local generator
pub fn generate_verification_code() -> String {
    generate_code(&mut rand::thread_rng())
}
