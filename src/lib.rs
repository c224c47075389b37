//! Find movie directories and media files that are probably the same title,
//! judging by their noisy release names.

pub mod cli;
pub mod error;
pub mod grouper;
pub mod matcher;
pub mod metadata;
pub mod normalize;
pub mod report;
pub mod scanner;
pub mod similarity;
pub mod utils;

#[cfg(test)]
mod utils_tests;
