//! Decoders for the atom types the walker interprets,
//! one module per FourCC.

mod mvhd;
mod keys;
mod ilst;

pub use mvhd::Mvhd;
pub use keys::Keys;
pub(crate) use ilst::parse_ilst;
