//! CLI command implementations.

pub(crate) mod info;
pub(crate) mod replay;
pub(crate) mod run;
