/*
** This file is a part of Xylem (streaming XML engine for Jabber/XMPP)
** Copyright (C) 2023-2026 Deniz Arkan
**
** Xylem is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::error::Error;
use std::fmt::Display;

use crate::ElementError;
use crate::ScanError;

/// A fault surfaced through [StreamHandler::handle_error](crate::StreamHandler::handle_error).
///
/// Faults do not stop the parser: it re-synchronizes and keeps going, and
/// the hosting session decides whether any given fault is fatal for the
/// connection.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum StreamError {
    /// A lexical or structural fault in the incoming XML.
    BadXml(&'static str),

    /// A fault reported by the stream handler while consuming a stanza.
    Handler(&'static str),
}

impl Display for StreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamError::BadXml(msg) => write!(f, "invalid XML syntax: {msg}"),
            StreamError::Handler(msg) => write!(f, "stream handler fault: {msg}"),
        }
    }
}

impl Error for StreamError {}

impl From<ScanError> for StreamError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::BadToken(msg) => StreamError::BadXml(msg),
            // recoverable outcomes are handled inside the feed loop and
            // never cross this boundary
            ScanError::Partial | ScanError::Extensible => {
                StreamError::BadXml(description::INCOMPLETE)
            }
        }
    }
}

impl From<ElementError> for StreamError {
    fn from(err: ElementError) -> Self {
        match err {
            ElementError::BadName(msg) => StreamError::BadXml(msg),
            ElementError::BadAttach(msg) => StreamError::BadXml(msg),
        }
    }
}

pub(super) mod description {
    pub(crate) const INCOMPLETE: &str = "incomplete token";
    pub(crate) const UTF8_INVALID: &str = "invalid UTF-8 sequence";
    pub(crate) const TAG_MISMATCH: &str = "start and end tags have different names";
    pub(crate) const TAG_AFTER_STREAM_END: &str = "tag after the stream has ended";
    pub(crate) const END_WITHOUT_OPEN: &str = "end tag without a matching start tag";
}
