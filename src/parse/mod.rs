//! The flat task store format: one `name 0x06 True|False` record per line.

pub mod task_parser;
pub mod task_serializer;

pub use task_parser::{DoneFlagCompat, DropReason, DroppedRecord, parse_tasks};
pub use task_serializer::{name_is_encodable, serialize_task, serialize_tasks};

/// Field separator between a task's name and its done flag
pub const SEPARATOR: char = '\u{6}';

pub(crate) const TRUE_TOKEN: &str = "True";
pub(crate) const FALSE_TOKEN: &str = "False";
