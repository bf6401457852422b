#![deny(unsafe_code)]

//! Library surface of the mapping CLI. Only the logging setup lives
//! here; commands stay in the binary.

pub mod logging;
