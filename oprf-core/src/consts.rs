//! Shared wire-format constants.
//!
//! Referenced symbolically everywhere a size appears on the wire; never
//! duplicated as a bare integer literal.

/// Canonical encoded size of a ristretto255 scalar, in bytes.
pub const SCALAR_BYTES: usize = 32;
/// Canonical encoded size of a ristretto255 group element, in bytes.
pub const ELEMENT_BYTES: usize = 32;
/// Size of a [`crate::share::Share`] on the wire: `index:1 || value:32`.
pub const SHARE_BYTES: usize = 1 + SCALAR_BYTES;
/// Size of a [`crate::share::Part`] on the wire: `index:1 || element:32`.
pub const PART_BYTES: usize = 1 + ELEMENT_BYTES;
/// Size of the final OPRF output, a SHA-512 digest.
pub const OPRF_BYTES: usize = 64;

/// Domain separation tag for hash-to-group, RFC 9497 `ristretto255-SHA512`,
/// mode 0 (`OPRFV1`). 43 bytes, including the embedded NUL byte.
pub const DST_HASH_TO_GROUP: &[u8] = b"HashToGroup-OPRFV1-\x00-ristretto255-SHA512";

/// Trailing label appended to the `Finalize` hash input.
pub const FINALIZE_LABEL: &[u8] = b"Finalize";

/// Maximum length (in bytes) of a domain separation tag accepted by
/// `expand_message_xmd`, per RFC 9380 §5.3.1.
pub const MAX_DST_LEN: usize = 255;

/// Maximum output length `expand_message_xmd` can produce with a SHA-512
/// backed hash (`255 * b_in_bytes`).
pub const MAX_EXPAND_LEN: usize = 255 * 64;
