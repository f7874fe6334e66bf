//! Command implementations.

pub mod analyze;
pub mod classify;
pub mod config;
pub mod rules;
pub mod segment;

pub use self::analyze::execute_analyze;
pub use self::classify::execute_classify;
pub use self::config::execute_config;
pub use self::rules::execute_rules;
pub use self::segment::execute_segment;

use crate::error::Result;
use std::fs;
use std::io::{self, Read};

/// Read command input from a file, or from stdin when the path is `-`.
pub fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}
