//! Data model for bucket listings

pub mod analysis;
pub mod object;
