/*
** This file is a part of Xylem (streaming XML engine for Jabber/XMPP)
** Copyright (C) 2023-2026 Deniz Arkan
**
** Xylem is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

pub mod constants;
mod error;
mod id;
mod jid;
mod stanza;

pub use error::BadJid;
pub use id::IdGenerator;
pub use id::RandomIdGenerator;
pub use id::SequentialIdGenerator;
pub use id::UuidIdGenerator;
pub use jid::Jid;
pub use stanza::IqType;
pub use stanza::Stanza;

#[cfg(test)]
mod tests;
