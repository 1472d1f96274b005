/// Stdin-driven batch decode command.
pub mod batch;
/// Single-file decode command.
pub mod decode;
/// Indented tree printer for decoded values.
pub mod print;
/// Order-preserving JSON view over decoded values.
pub mod render;
/// Schema inspection command.
pub mod schema;
/// Shared argument groups and output helpers.
pub mod util;
