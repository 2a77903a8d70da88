//! File-based inputs and outputs of the register.

pub mod csv;
