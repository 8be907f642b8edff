//! palc core - fundamental types
//!
//! This crate provides the core types used throughout palc:
//! - `Value`: scalar leaf of a domain graph (number or text)
//! - numeric fragments: integers, decimals and fractions glued to query tokens
//! - `PalcError`: structured errors for dataset loading

mod number;
mod value;
mod error;

pub use number::{
    Fragment, NumberError,
    parse_number, is_number, split_leading, split_trailing, split_number,
    as_decimal, as_plain,
};
pub use value::Value;
pub use error::{PalcError, Severity, codes};
