//! Ed25519 keypair generation for reality mode.
//!
//! Private keys are hex-encoded in the 64-byte seed||public layout, which
//! is what Go's `crypto/ed25519` produces, so keys generated here can be
//! swapped with ones produced by the older Go bootstrap.
//!
//! CHANGELOG:
//! - 10/18/2026 - Derive public half from an operator-supplied private key
//! - 10/18/2026 - Initial implementation

use ed25519_dalek::SigningKey;
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

use super::random;
use crate::error::Result;

/// Hex-encoded Ed25519 keypair.
#[derive(Clone)]
pub struct KeyPair {
    pub public: String,
    private: Zeroizing<String>,
}

impl KeyPair {
    /// Generate a fresh keypair from 32 bytes of OS randomness.
    pub fn generate() -> Result<Self> {
        let mut seed = [0u8; 32];
        random::fill(&mut seed)?;
        let signing = SigningKey::from_bytes(&seed);
        seed.zeroize();
        Ok(Self::from_signing_key(&signing))
    }

    /// Assemble a keypair from already-encoded halves. No validation.
    pub fn from_parts(public: impl Into<String>, private: impl Into<String>) -> Self {
        Self {
            public: public.into(),
            private: Zeroizing::new(private.into()),
        }
    }

    fn from_signing_key(signing: &SigningKey) -> Self {
        let mut keypair_bytes = signing.to_keypair_bytes();
        let private = Zeroizing::new(hex::encode(keypair_bytes));
        keypair_bytes.zeroize();
        Self {
            public: hex::encode(signing.verifying_key().to_bytes()),
            private,
        }
    }

    /// Hex private half. Only the config renderer should read this.
    pub fn private(&self) -> &str {
        &self.private
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .field("private", &"<redacted>")
            .finish()
    }
}

/// Decode a hex private key into a signing key.
///
/// Accepts a 32-byte seed or the 64-byte seed||public layout (only the seed
/// is used). Returns `None` for anything else.
pub fn signing_key_from_hex(private_hex: &str) -> Option<SigningKey> {
    let bytes = Zeroizing::new(hex::decode(private_hex.trim()).ok()?);
    let seed: [u8; 32] = match bytes.len() {
        32 | 64 => bytes[..32].try_into().ok()?,
        _ => return None,
    };
    let key = SigningKey::from_bytes(&seed);
    Some(key)
}

/// Hex public half matching a hex private key, if it can be decoded.
pub fn public_from_private_hex(private_hex: &str) -> Option<String> {
    signing_key_from_hex(private_hex).map(|k| hex::encode(k.verifying_key().to_bytes()))
}
