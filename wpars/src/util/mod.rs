//! Helpers shared by the station controller: reply parsing, input
//! validation and display conversions.

pub(crate) mod parser;
pub(crate) mod utils;
pub(crate) mod validation;
