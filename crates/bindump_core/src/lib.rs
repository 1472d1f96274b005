//! Schema-driven decoder for BinData serialized configuration records.

/// Primitive reader, schema graph, record decoders, and container driver.
pub mod bindata;
