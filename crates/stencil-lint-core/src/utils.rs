//! Utility functions for rule implementations.

pub mod allowance;
pub mod layout;

#[doc(inline)]
pub use allowance::{check_allow_with_reason, AllowCheck};
#[doc(inline)]
pub use layout::{line_ending, line_indent};
