//! Responsibility boundaries:
//! - run.rs: validate flow and fail-open mapping
//! - prompt.rs: prompt builder only
//! - client.rs: judge call with timeout and retry budget
//! - verdict.rs: reply parsing only

pub(crate) mod client;
pub(crate) mod prompt;
pub(crate) mod run;
pub(crate) mod verdict;

#[cfg(test)]
mod tests;
