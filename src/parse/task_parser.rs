use std::fmt;

use crate::model::task::Task;
use crate::parse::{FALSE_TOKEN, SEPARATOR, TRUE_TOKEN};

/// How the done flag of a record is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DoneFlagCompat {
    /// Compare the token with its line terminator removed. Only `True` and
    /// `False` are valid; anything else drops the record.
    #[default]
    Strict,
    /// Compare the raw token, line terminator included, against `"True\n"`.
    /// The last record of a file (which has no terminator) therefore never
    /// decodes as done, and unknown tokens decode as not done. Fields past
    /// the second are ignored.
    Legacy,
}

/// Why a record was dropped during parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// The line did not split into exactly name + flag
    FieldCount(usize),
    /// The flag was neither `True` nor `False`
    BadFlag(String),
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::FieldCount(n) => write!(f, "expected 2 fields, found {}", n),
            DropReason::BadFlag(token) => write!(f, "invalid done flag {:?}", token),
        }
    }
}

/// A record the parser could not turn into a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRecord {
    /// 1-based line number in the source
    pub line: usize,
    /// The line as read, without its terminator
    pub text: String,
    pub reason: DropReason,
}

/// Parse the flat store format into tasks.
///
/// Malformed records are skipped and returned alongside the tasks so the
/// caller can log them. Blank lines are ignored.
pub fn parse_tasks(source: &str, compat: DoneFlagCompat) -> (Vec<Task>, Vec<DroppedRecord>) {
    let mut tasks = Vec::new();
    let mut dropped = Vec::new();

    // split_inclusive keeps each line's terminator, which Legacy needs
    for (idx, raw) in source.split_inclusive('\n').enumerate() {
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = raw.split(SEPARATOR).collect();
        let too_many = fields.len() > 2 && compat == DoneFlagCompat::Strict;
        if fields.len() < 2 || too_many {
            dropped.push(DroppedRecord {
                line: idx + 1,
                text: line.to_string(),
                reason: DropReason::FieldCount(fields.len()),
            });
            continue;
        }
        let name = fields[0];
        let raw_flag = fields[1];

        let done = match compat {
            DoneFlagCompat::Legacy => raw_flag == "True\n",
            DoneFlagCompat::Strict => {
                let flag = raw_flag.strip_suffix('\n').unwrap_or(raw_flag);
                let flag = flag.strip_suffix('\r').unwrap_or(flag);
                match flag {
                    TRUE_TOKEN => true,
                    FALSE_TOKEN => false,
                    other => {
                        dropped.push(DroppedRecord {
                            line: idx + 1,
                            text: line.to_string(),
                            reason: DropReason::BadFlag(other.to_string()),
                        });
                        continue;
                    }
                }
            }
        };

        // Stored names are taken as-is, even an empty one
        tasks.push(Task {
            name: name.to_string(),
            done,
        });
    }

    (tasks, dropped)
}
