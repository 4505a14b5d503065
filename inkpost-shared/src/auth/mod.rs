/// Authentication primitives
///
/// This module provides the building blocks of the Inkpost login flow:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`token`]: signed bearer token issuance and validation
///
/// # Security Properties
///
/// - **Password Hashing**: Argon2id with a random per-record salt; two
///   hashes of the same plaintext never match
/// - **Tokens**: symmetric HMAC signing with a configurable algorithm,
///   a subject claim and a hard expiry
/// - **Constant-time Comparison**: all verification uses constant-time
///   operations provided by the underlying crates
///
/// The issuer and verifier take the current time as an argument rather
/// than reading the system clock, so expiry behavior is testable without
/// sleeping.

pub mod password;
pub mod token;
