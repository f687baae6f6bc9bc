//! Credential hashing service
//!
//! One-way, salted password hashing on the bcrypt family. The rest of
//! the system only ever sees the digest; plaintext passwords end here.

mod hasher;

pub use hasher::PasswordHasher;
