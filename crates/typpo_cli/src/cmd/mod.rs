/// Value decode command.
pub mod read;
/// Schema and layout inspection command.
pub mod types;
/// Shared CLI helpers.
pub(crate) mod util;
/// Value encode command.
pub mod write;
