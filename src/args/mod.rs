//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;

pub use cli::{ProbeArgs, normalize_flag_style};
pub use types::{PositiveU64, PositiveUsize};

pub(crate) use defaults::DEFAULT_USER_AGENT;
