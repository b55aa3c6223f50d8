/*
** This file is a part of Xylem (streaming XML engine for Jabber/XMPP)
** Copyright (C) 2023-2026 Deniz Arkan
**
** Xylem is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod buffer;
mod element;
mod entities;
mod namespaces;
mod scanner;
mod stream;
#[cfg(feature = "xmpp")]
mod xmpp;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use buffer::ByteAccumulator;

pub use namespaces::NamespaceStack;
pub use namespaces::XMLNS_NAMESPACE;
pub use namespaces::XML_NAMESPACE;

pub use scanner::AttributeSpan;
pub use scanner::ScanError;
pub use scanner::Token;
pub use scanner::TokenKind;
pub use scanner::normalize_attribute_value;
pub use scanner::tokenize_cdata_section;
pub use scanner::tokenize_content;

pub use element::Element;
pub use element::ElementError;

pub use stream::StreamError;
pub use stream::StreamHandler;
pub use stream::StreamParser;

#[cfg(feature = "xmpp")]
pub use xmpp::BadJid;
#[cfg(feature = "xmpp")]
pub use xmpp::IdGenerator;
#[cfg(feature = "xmpp")]
pub use xmpp::IqType;
#[cfg(feature = "xmpp")]
pub use xmpp::Jid;
#[cfg(feature = "xmpp")]
pub use xmpp::RandomIdGenerator;
#[cfg(feature = "xmpp")]
pub use xmpp::SequentialIdGenerator;
#[cfg(feature = "xmpp")]
pub use xmpp::Stanza;
#[cfg(feature = "xmpp")]
pub use xmpp::UuidIdGenerator;
#[cfg(feature = "xmpp")]
pub use xmpp::constants;
