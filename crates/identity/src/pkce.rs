//! Proof Key for Code Exchange (RFC 7636), S256 method.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use rand::distributions::Alphanumeric;
use sha2::{Digest, Sha256};

/// The challenge method sent alongside the authorization request.
pub const CHALLENGE_METHOD: &str = "S256";

const VERIFIER_LEN: usize = 64;

/// A verifier/challenge pair for one authorization request.
#[derive(Debug, Clone)]
pub struct PkceChallenge {
    /// Kept locally and sent with the code redemption.
    pub verifier: String,

    /// Sent with the authorization request.
    pub challenge: String,
}

impl PkceChallenge {
    /// Generate a fresh random verifier and its S256 challenge.
    pub fn generate() -> Self {
        let verifier = random_urlsafe(VERIFIER_LEN);
        let challenge = challenge_for(&verifier);
        Self {
            verifier,
            challenge,
        }
    }
}

/// `BASE64URL(SHA256(verifier))`, unpadded, per RFC 7636 §4.2.
pub fn challenge_for(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

/// Random URL-safe string, also used for the login `state` parameter.
pub fn random_urlsafe(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
