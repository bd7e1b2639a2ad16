//! Call-scoped byte pool
//!
//! Fallback serialization writes many small payloads during one conversion.
//! Instead of one heap allocation per payload, every payload is written into
//! a shared arena and split off as a frozen [`Bytes`] handle.
//!
//! ## Contract
//!
//! - A pool lives for exactly one top-level conversion call and is dropped
//!   when the call returns, on success and on error alike
//! - The number of slots is fixed at creation; running out is a hard
//!   `ClientError`, the pool never grows its slot count
//! - A failed fill leaves no partial payload behind

use bytes::{BufMut, Bytes, BytesMut};
use kvmarshal_core::{ConversionError, Result};
use std::io;
use tracing::debug;

/// Initial arena size in bytes
const ARENA_CHUNK: usize = 4 * 1024;

/// Byte arena with a fixed number of slots
#[derive(Debug)]
pub struct ConversionPool {
    arena: BytesMut,
    count: usize,
    capacity: usize,
}

impl ConversionPool {
    /// Pool handing out at most `capacity` buffers
    pub fn new(capacity: usize) -> Self {
        ConversionPool {
            arena: BytesMut::with_capacity(ARENA_CHUNK),
            count: 0,
            capacity,
        }
    }

    /// Take one slot and fill it through `fill`
    ///
    /// The returned handle stays valid after the pool is dropped.
    pub fn acquire_bytes(
        &mut self,
        fill: impl FnOnce(&mut dyn io::Write) -> Result<()>,
    ) -> Result<Bytes> {
        if self.count >= self.capacity {
            debug!(capacity = self.capacity, "conversion pool exhausted");
            return Err(ConversionError::client(format!(
                "Cannot allocate bytes: conversion pool of {} buffers exhausted",
                self.capacity
            )));
        }
        self.count += 1;

        let mut writer = (&mut self.arena).writer();
        if let Err(err) = fill(&mut writer) {
            self.arena.clear();
            return Err(err);
        }
        Ok(self.arena.split().freeze())
    }

    /// Slots handed out so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Total slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots still available
    pub fn remaining(&self) -> usize {
        self.capacity - self.count
    }
}
