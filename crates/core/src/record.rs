//! Records and bins
//!
//! A record is an ordered sequence of named bins plus generation and
//! time-to-live metadata.
//!
//! ## Contract
//!
//! - Bin order is insertion order
//! - [`Record::set`] is the canonical write: one bin per name, a repeated name
//!   replaces the earlier value in place
//! - [`Record::push`] appends unconditionally and is used for operate results,
//!   where one call may return several results for the same bin name
//! - The bin name length limit is enforced by the converter under strict
//!   mode, not here

use crate::key::Key;
use crate::value::Value;

/// Maximum bin name length in bytes (strict mode)
pub const BIN_NAME_MAX_LEN: usize = 14;

/// A named value inside a record
#[derive(Debug, Clone, PartialEq)]
pub struct Bin<'a> {
    /// Bin name
    pub name: String,
    /// Bin value
    pub value: Value<'a>,
}

impl<'a> Bin<'a> {
    /// Create a bin
    pub fn new(name: impl Into<String>, value: impl Into<Value<'a>>) -> Self {
        Bin {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record<'a> {
    /// Key the record was read with, if the driver surfaced one
    pub key: Option<Key<'a>>,
    /// Bins in wire order
    pub bins: Vec<Bin<'a>>,
    /// Generation
    pub gen: u16,
    /// Time-to-live in seconds (`u32::MAX` never expires)
    pub ttl: u32,
}

impl<'a> Record<'a> {
    /// Empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty record with room for `n` bins
    pub fn with_capacity(n: usize) -> Self {
        Record {
            bins: Vec::with_capacity(n),
            ..Self::default()
        }
    }

    /// Set a bin, replacing an existing bin of the same name
    ///
    /// Returns `false` when the bin could not be set (empty name).
    pub fn set(&mut self, name: impl Into<String>, value: Value<'a>) -> bool {
        let name = name.into();
        if name.is_empty() {
            return false;
        }
        match self.bins.iter_mut().find(|b| b.name == name) {
            Some(bin) => bin.value = value,
            None => self.bins.push(Bin { name, value }),
        }
        true
    }

    /// Append a bin without checking for an existing name
    pub fn push(&mut self, name: impl Into<String>, value: Value<'a>) {
        self.bins.push(Bin {
            name: name.into(),
            value,
        });
    }

    /// First bin with the given name
    pub fn get(&self, name: &str) -> Option<&Value<'a>> {
        self.bins.iter().find(|b| b.name == name).map(|b| &b.value)
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// True when the record has no bins
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Iterate bins in wire order
    pub fn iter(&self) -> impl Iterator<Item = &Bin<'a>> {
        self.bins.iter()
    }

    /// Attach the key
    pub fn with_key(mut self, key: Key<'a>) -> Self {
        self.key = Some(key);
        self
    }

    /// Set generation and ttl
    pub fn with_meta(mut self, gen: u16, ttl: u32) -> Self {
        self.gen = gen;
        self.ttl = ttl;
        self
    }

    /// Detach from caller memory
    pub fn into_owned(self) -> Record<'static> {
        Record {
            key: self.key.map(Key::into_owned),
            bins: self
                .bins
                .into_iter()
                .map(|b| Bin {
                    name: b.name,
                    value: b.value.into_owned(),
                })
                .collect(),
            gen: self.gen,
            ttl: self.ttl,
        }
    }
}
