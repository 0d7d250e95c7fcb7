//! # LSB Steganography Implementation
//!
//! Hides a text message in the least significant bits of a raw image buffer.
//!
//! ## Layout
//!
//! The buffer is treated as an opaque byte sequence. Nothing before
//! [`CARRIER_START`] is touched. Every message byte occupies 8 consecutive
//! carrier bytes, most significant bit first:
//!
//! ```text
//! [0 .. 55)             header, untouched
//! [55 .. 55 + 8L)       message bytes, one bit per carrier LSB
//! [55 + 8L .. 63 + 8L)  terminator, eight cleared LSBs
//! ```
//!
//! ### Capacity
//! The capacity check is computed against [`HEADER_SIZE`] (54) while the first
//! carrier byte is [`CARRIER_START`] (55). Both values are observable and must
//! stay distinct. A message that passes the check may still run off the end of
//! the buffer; writes past the end are dropped.
//!
//! ### Decoding
//! Groups of 8 carrier bytes are read from [`CARRIER_START`] while the group
//! start is below `len - 9`. The first group that reconstructs to zero ends the
//! message. There is no way to tell "no message" from noise, so decoding never
//! fails.

use super::error::{Result, StegoError};

/// Bytes reserved for the image header in the capacity arithmetic.
pub const HEADER_SIZE: usize = 54;

/// Index of the first carrier byte.
pub const CARRIER_START: usize = 55;

/// Carrier bytes consumed by one message byte.
pub const CARRIERS_PER_BYTE: usize = 8;

/// Decoding stops this many bytes before the end of the buffer.
const DECODE_TAIL: usize = 9;

/// Bit masks, most significant first.
const MASK: [u8; 8] = [128, 64, 32, 16, 8, 4, 2, 1];

/// Returns bit `position` of `byte`, counting from the most significant bit (0)
/// to the least significant bit (7).
///
/// # Panics
/// Panics if `position` is greater than 7.
pub fn bit_at(byte: u8, position: usize) -> bool {
    byte & MASK[position] != 0
}

/// Returns `carrier` with its least significant bit forced to `bit`.
///
/// All other bits are left as they were.
///
/// # Example
/// ```
/// use lsb_stego_web::processing::set_lsb;
///
/// assert_eq!(set_lsb(true, 0b1010_1010), 0b1010_1011);
/// assert_eq!(set_lsb(false, 0b1111_1111), 0b1111_1110);
/// ```
pub fn set_lsb(bit: bool, carrier: u8) -> u8 {
    if bit {
        carrier | 1
    } else {
        carrier & !1
    }
}

/// Number of carrier bytes an image of `image_len` bytes offers, or `None` if
/// the image is shorter than the header.
pub fn capacity_bits(image_len: usize) -> Option<usize> {
    image_len.checked_sub(HEADER_SIZE)
}

/// Embed `message` into `image` and return the modified buffer.
///
/// The buffer is taken by value and mutated in place, so the caller never sees
/// a half-written image.
///
/// # Arguments
/// - `image`: Raw bytes of the cover image, header included
/// - `message`: Text to hide; each UTF-8 byte is embedded as one character
///
/// # Returns
/// - `Ok(Vec<u8>)`: The image with the message and its terminator embedded
/// - `Err(StegoError::CapacityExceeded)`: `8 * message.len() > image.len() - 54`
///
/// # Example
/// ```
/// use lsb_stego_web::processing::{decode_message, encode_message};
///
/// let image = vec![0xFF; 100];
/// let encoded = encode_message(image, "Hi").unwrap();
/// assert_eq!(decode_message(&encoded), "Hi");
/// ```
pub fn encode_message(mut image: Vec<u8>, message: &str) -> Result<Vec<u8>> {
    embed_message(&mut image, message)?;
    Ok(image)
}

/// In-place variant of [`encode_message`].
///
/// On error the buffer is left untouched.
pub fn embed_message(image: &mut [u8], message: &str) -> Result<()> {
    let text = message.as_bytes();
    let required = text.len().saturating_mul(CARRIERS_PER_BYTE);

    match capacity_bits(image.len()) {
        Some(available) if required <= available => {}
        available => {
            return Err(StegoError::CapacityExceeded {
                required,
                available: available.unwrap_or(0),
            })
        }
    }

    for (i, &byte) in text.iter().enumerate() {
        write_byte(image, CARRIER_START + i * CARRIERS_PER_BYTE, byte);
    }

    // Terminator right after the last character (at CARRIER_START for "").
    write_byte(image, CARRIER_START + required, 0);

    Ok(())
}

/// Spread `value` over the LSBs of the 8 carrier bytes starting at `base`.
/// Carriers past the end of the buffer are skipped.
fn write_byte(image: &mut [u8], base: usize, value: u8) {
    for (position, carrier) in image
        .iter_mut()
        .skip(base)
        .take(CARRIERS_PER_BYTE)
        .enumerate()
    {
        *carrier = set_lsb(bit_at(value, position), *carrier);
    }
}

/// Rebuild one byte from the LSBs of `carriers`, most significant first.
fn read_byte(carriers: &[u8]) -> u8 {
    carriers
        .iter()
        .fold(0u8, |letter, &carrier| (letter << 1) | (carrier & 1))
}

/// Extract the raw hidden bytes from `image`, without the terminator.
pub fn decode_bytes(image: &[u8]) -> Vec<u8> {
    let end = image.len().saturating_sub(DECODE_TAIL);

    (CARRIER_START..end)
        .step_by(CARRIERS_PER_BYTE)
        .map(|index| read_byte(&image[index..index + CARRIERS_PER_BYTE]))
        .take_while(|&letter| letter != 0)
        .collect()
}

/// Extract the hidden message from `image`.
///
/// Each recovered byte becomes the character with the same code point, so
/// ASCII text round-trips exactly. Returns an empty string when the terminator
/// comes first or the buffer is too short to hold a single group.
///
/// # Example
/// ```
/// use lsb_stego_web::processing::decode_message;
///
/// assert_eq!(decode_message(&[0u8; 40]), "");
/// ```
pub fn decode_message(image: &[u8]) -> String {
    decode_bytes(image).into_iter().map(char::from).collect()
}
