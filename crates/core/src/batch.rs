//! Batch read results

use crate::key::Key;
use crate::record::Record;

/// Driver outcome for one key of a batch read
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<'a> {
    /// The record exists
    Found(Record<'a>),
    /// No record for this key
    NotFound,
    /// The driver reported a per-key failure
    Failed {
        /// Driver status code
        code: i32,
    },
}

impl<'a> ReadOutcome<'a> {
    /// The record, if one was found
    pub fn record(&self) -> Option<&Record<'a>> {
        match self {
            ReadOutcome::Found(r) => Some(r),
            _ => None,
        }
    }
}

/// One entry of a batch read
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRead<'a> {
    /// Requested key
    pub key: Key<'a>,
    /// What the driver returned for it
    pub outcome: ReadOutcome<'a>,
}

impl<'a> BatchRead<'a> {
    /// A found record
    pub fn found(key: Key<'a>, record: Record<'a>) -> Self {
        BatchRead {
            key,
            outcome: ReadOutcome::Found(record),
        }
    }

    /// A miss
    pub fn not_found(key: Key<'a>) -> Self {
        BatchRead {
            key,
            outcome: ReadOutcome::NotFound,
        }
    }

    /// A per-key driver failure
    pub fn failed(key: Key<'a>, code: i32) -> Self {
        BatchRead {
            key,
            outcome: ReadOutcome::Failed { code },
        }
    }
}
