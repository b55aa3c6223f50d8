/*
** This file is a part of Xylem (streaming XML engine for Jabber/XMPP)
** Copyright (C) 2023-2026 Deniz Arkan
**
** Xylem is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Write;

use rand::RngCore;

/// Strategy for producing the `id` attributes of outgoing stanzas.
///
/// The engine itself never generates identifiers; the session layer
/// picks a strategy and threads it through the code that builds
/// stanzas.
pub trait IdGenerator {
    fn next_id(&mut self) -> String;
}

/// Eight random bytes as lowercase hex.
pub struct RandomIdGenerator;

impl RandomIdGenerator {
    pub fn new() -> RandomIdGenerator {
        RandomIdGenerator
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self) -> String {
        let mut bytes = [0u8; 8];
        rand::rng().fill_bytes(&mut bytes);
        let mut id = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            let _ = write!(id, "{byte:02x}");
        }
        id
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// A prefixed wrapping counter, `uid00000000`, `uid00000001`, ...
pub struct SequentialIdGenerator {
    prefix: String,
    value: u32,
}

impl SequentialIdGenerator {
    pub fn new() -> SequentialIdGenerator {
        SequentialIdGenerator::with_prefix("uid")
    }

    pub fn with_prefix(prefix: &str) -> SequentialIdGenerator {
        SequentialIdGenerator {
            prefix: prefix.to_string(),
            value: 0,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        let id = format!("{}{:08X}", self.prefix, self.value);
        self.value = if self.value >= u32::MAX - 1 {
            0
        } else {
            self.value + 1
        };
        id
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// A random version-4 UUID in the usual hyphenated lowercase form.
pub struct UuidIdGenerator;

impl UuidIdGenerator {
    pub fn new() -> UuidIdGenerator {
        UuidIdGenerator
    }
}

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> String {
        let mut bytes = [0u8; 16];
        rand::rng().fill_bytes(&mut bytes);
        bytes[6] = (bytes[6] & 0x0f) | 0x40;
        bytes[8] = (bytes[8] & 0x3f) | 0x80;

        let mut id = String::with_capacity(36);
        for (i, byte) in bytes.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                id.push('-');
            }
            let _ = write!(id, "{byte:02x}");
        }
        id
    }
}

impl Default for UuidIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
