pub mod common;
pub mod processing;
pub mod server;
pub mod utils;

pub use processing::{decode_message, encode_message, StegoError};
pub use server::StegoService;
