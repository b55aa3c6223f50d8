/*
** This file is a part of Xylem (streaming XML engine for Jabber/XMPP)
** Copyright (C) 2023-2026 Deniz Arkan
**
** Xylem is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

const INITIAL_CAPACITY: usize = 4096;

/// Holds the bytes which have arrived from the transport but have not
/// been consumed into tokens yet.
///
/// A socket delivers a stream in arbitrary fragments, so the scan loop
/// regularly stops in the middle of a token. The unconsumed tail is kept
/// here between feed calls: [write()](ByteAccumulator::write) appends a
/// new fragment, [snapshot()](ByteAccumulator::snapshot) hands out the
/// whole pending sequence, and [release()](ByteAccumulator::release)
/// drops the prefix that the scan loop managed to consume.
///
/// There is no upper bound on the retained size; limiting what a peer
/// may send is the transport layer's framing policy.
pub struct ByteAccumulator {
    pending: Vec<u8>,
}

impl ByteAccumulator {
    pub fn new() -> ByteAccumulator {
        ByteAccumulator {
            pending: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Appends a fragment after the currently pending bytes.
    pub fn write(&mut self, bytes: &[u8]) {
        self.pending.extend_from_slice(bytes);
    }

    /// Returns an owned contiguous copy of all pending bytes.
    ///
    /// The copy stays valid while the parser mutates its own state and
    /// writes further fragments; pair it with a final
    /// [release()](ByteAccumulator::release) of the consumed prefix.
    pub fn snapshot(&self) -> Vec<u8> {
        self.pending.clone()
    }

    /// Drops every byte before `offset`, keeping the remainder as the
    /// new beginning of the pending sequence.
    ///
    /// `offset == 0` keeps everything (nothing was consumable) and
    /// `offset == len()` empties the accumulator. Offsets beyond the
    /// pending length are clamped.
    pub fn release(&mut self, offset: usize) {
        if offset == 0 {
            return;
        }
        if offset >= self.pending.len() {
            self.pending.clear();
        } else {
            self.pending.drain(..offset);
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Discards all pending bytes.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Default for ByteAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
