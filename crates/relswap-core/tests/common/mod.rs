pub mod release_server;

/// Deterministic payload of `len` bytes.
pub fn payload(len: usize) -> Vec<u8> {
    (0u8..251).cycle().take(len).collect()
}
