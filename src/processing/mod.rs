//! # Image Processing and Steganography
//!
//! Embeds text into, and extracts text from, raw image buffers using LSB
//! (Least Significant Bit) steganography. Pure functions, no I/O.

pub mod error;
pub mod steganography;

// Re-export main functions for convenience
pub use error::StegoError;
pub use steganography::{
    bit_at, capacity_bits, decode_bytes, decode_message, embed_message, encode_message, set_lsb,
    CARRIER_START, HEADER_SIZE,
};
