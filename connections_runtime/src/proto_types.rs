//! Hand-written protobuf types for the file store log.
//!
//! Uses prost derive macros for encode/decode without prost-build.

use prost::Message;

/// One write to the store: `key` now holds `value` (JSON text).
#[derive(Clone, PartialEq, Message)]
pub struct ProtoRecord {
    #[prost(uint64, tag = "1")]
    pub sequence: u64,
    #[prost(string, tag = "2")]
    pub key: String,
    #[prost(string, tag = "3")]
    pub value: String,
}
