//! Object dictionary: generic `{key, storage, type}` entries whose
//! representation-specific behavior lives in shared type descriptors.
//!
//! The dictionary never inspects values itself. Reading, writing, sizing, and
//! validating an entry is delegated to its [`ObjType`](types::ObjType)
//! descriptor, so new representations plug in without touching dictionary
//! logic. Descriptors report value changes of event-driven, PDO-mapped entries
//! to the node's [`TpdoNotifier`](notify::TpdoNotifier).
pub mod dictionary;
pub mod entry;
pub mod key;
pub mod notify;
pub mod types;
