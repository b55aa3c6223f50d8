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

/// Outcome of a failed scan over a byte window.
///
/// The first two variants are not faults: they tell the caller that the
/// window simply ends too early, and that the unscanned bytes must be
/// kept and retried once more input arrives. Only
/// [BadToken](ScanError::BadToken) is a lexical fault.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum ScanError {
    /// The window ends in the middle of a token; nothing is consumable
    /// yet.
    Partial,

    /// The window ends exactly on a boundary that is legal on its own
    /// but could still extend, such as a bare name that might be a
    /// longer name once more bytes arrive.
    Extensible,

    /// A hard lexical fault: an illegal character, a duplicate attribute
    /// name within one tag, or a construct this engine does not accept.
    BadToken(&'static str),
}

impl ScanError {
    /// True for the outcomes that are resolved by feeding more bytes.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ScanError::Partial | ScanError::Extensible => true,
            ScanError::BadToken(_) => false,
        }
    }
}

impl Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::Partial => write!(f, "partial token"),
            ScanError::Extensible => write!(f, "extensible token"),
            ScanError::BadToken(msg) => write!(f, "invalid token: {msg}"),
        }
    }
}

impl Error for ScanError {}

pub(super) mod description {
    pub(crate) const CHAR_ILLEGAL: &str = "illegal character in character data";
    pub(crate) const UTF8_INVALID: &str = "invalid UTF-8 sequence";
    pub(crate) const NAME_EMPTY: &str = "tag has no name";
    pub(crate) const NAME_ILLEGAL: &str = "illegal character at the start of a name";
    pub(crate) const DUPLICATE_ATTRIBUTE: &str = "attribute name already used in this tag";
    pub(crate) const ATTRIBUTE_BAD_NAME: &str = "illegal character in attribute name";
    pub(crate) const ATTRIBUTE_WITHOUT_SPACE: &str = "attributes must be separated by whitespace";
    pub(crate) const ATTRIBUTE_WITHOUT_EQUAL: &str = "attribute must have '=' before the value";
    pub(crate) const ATTRIBUTE_WITHOUT_QUOTE: &str =
        "attribute value must be in double or single quotes";
    pub(crate) const ATTRIBUTE_VALUE_LT: &str =
        "attribute value cannot have '<' without a reference";
    pub(crate) const END_TAG_ATTRIBUTES: &str = "end tag cannot have attributes";
    pub(crate) const EMPTY_TAG_MISSING_END: &str = "empty element tag must end after the '/'";
    pub(crate) const ENTITY_UNSUPPORTED: &str =
        "non-predefined entity references are not supported";
    pub(crate) const REFERENCE_BAD_DECIMAL: &str = "non-digit in decimal character reference";
    pub(crate) const REFERENCE_BAD_HEX: &str = "non-hex digit in hexadecimal character reference";
    pub(crate) const REFERENCE_ILLEGAL_CHAR: &str =
        "character reference to an illegal XML character";
    pub(crate) const COMMENT_UNSUPPORTED: &str = "comments are not accepted on this stream";
    pub(crate) const PI_UNSUPPORTED: &str =
        "processing instructions are not accepted on this stream";
    pub(crate) const DOCTYPE_UNSUPPORTED: &str =
        "document type declarations are not accepted on this stream";
    pub(crate) const MARKUP_UNRECOGNIZED: &str = "unrecognized markup after '<!'";
    pub(crate) const CDATA_BAD_START: &str = "character data sections must start with '<![CDATA['";
}
