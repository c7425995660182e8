//! Random hex tokens from the OS secure random source.
//!
//! CHANGELOG:
//! - 10/18/2026 - Initial implementation

use crate::error::{BootstrapError, Result};

/// Fill `buf` from the OS random source.
///
/// There is no retry: a failing source means the host is broken and the
/// engine must not start with a weak identity.
pub fn fill(buf: &mut [u8]) -> Result<()> {
    getrandom::fill(buf).map_err(|e| BootstrapError::Random(e.to_string()))
}

/// Generate a lowercase hex string of exactly `len` characters.
///
/// Reads `len / 2` bytes, rounding up for odd lengths and trimming the
/// extra nibble. A zero length is rejected; generated values must never be
/// empty.
pub fn random_hex(len: usize) -> Result<String> {
    if len == 0 {
        return Err(BootstrapError::InvalidParameter {
            name: "random hex".to_string(),
            reason: "length must be at least 1".to_string(),
        });
    }
    let mut bytes = vec![0u8; len.div_ceil(2)];
    fill(&mut bytes)?;
    let mut hex = hex::encode(&bytes);
    hex.truncate(len);
    bytes.fill(0);
    Ok(hex)
}
