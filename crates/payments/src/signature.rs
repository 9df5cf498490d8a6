//! Checkout signature verification.
//!
//! After checkout the provider gives the client a signature over
//! `order_id|payment_id`, computed with the account's secret key. A valid
//! signature proves the payment was confirmed by the provider and not
//! fabricated by the client.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded `HMAC-SHA256(secret, order_id + "|" + payment_id)`.
pub fn expected_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Compare the supplied signature against the expected one, byte for byte.
///
/// A mismatch is an expected rejection outcome, never a fault.
pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, supplied: &str) -> bool {
    expected_signature(secret, order_id, payment_id) == supplied
}
