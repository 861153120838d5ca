//! Runtime: pieces of the `cartlog` binary that are worth testing on their own.

pub mod boot;
pub mod dump;
