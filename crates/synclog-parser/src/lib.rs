// Error types
pub mod error;

// Source selection
pub mod config;

// Log text -> entries
pub mod segment;
pub(crate) mod group;

// Entries -> model
pub mod builder;
pub mod sections;
pub mod sync_queue;
pub mod verbose;

// Verbose object literals -> structured values
pub mod object_literal;

// Files, directories and archives -> parsed logs
pub mod discovery;

pub use builder::LogBuilder;
pub use config::{SourceConfig, SourceKind};
pub use discovery::{parse_file, process_path};
pub use error::{Error, Result};
pub use object_literal::{decode_object_literal, normalize_object_literal};
pub use sections::{Section, parse_log_file, parse_log_str};
pub use segment::{Segments, segment_entries};
pub use sync_queue::{SyncQueueMatch, extract_sync_queues};
