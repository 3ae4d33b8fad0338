//! Common types used across the application.

pub mod id;
pub mod number_format;

pub use id::*;
pub use number_format::{FormatMoney, NegativeFormat, NumberFormat};
