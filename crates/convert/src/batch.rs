//! Batch read externalization
//!
//! One `(key, meta, bins)` tuple per requested key, in request order. A key
//! with no record, or one the driver failed on, becomes `(key, None, None)`.
//! A found record that cannot be converted fails the whole batch.

use crate::converter::Converter;
use crate::record::{record_to_object_at, BinShape};
use kvmarshal_core::{BatchRead, ReadOutcome, Result};
use kvmarshal_host::Object;
use tracing::{debug, trace};

impl Converter {
    /// Externalize a batch read result
    pub fn batch_to_object(&self, reads: &[BatchRead<'_>]) -> Result<Object> {
        trace!(entries = reads.len(), "batch to object");
        let dec = self.decoder();
        let mut out = Vec::with_capacity(reads.len());
        for read in reads {
            let entry = match &read.outcome {
                ReadOutcome::Found(record) => {
                    record_to_object_at(&dec, record, Some(&read.key), BinShape::Canonical, 0)?
                }
                ReadOutcome::NotFound => self.missing_entry(read),
                ReadOutcome::Failed { code } => {
                    debug!(code, namespace = read.key.namespace(), "batch entry failed");
                    self.missing_entry(read)
                }
            };
            out.push(entry);
        }
        Ok(Object::List(out))
    }

    fn missing_entry(&self, read: &BatchRead<'_>) -> Object {
        Object::Tuple(vec![self.key_to_object(&read.key), Object::None, Object::None])
    }
}
