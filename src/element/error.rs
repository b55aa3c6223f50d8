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

#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum ElementError {
    /// The tag or prefix is not a valid XML name.
    BadName(&'static str),

    /// The requested child attachment would create a cycle.
    BadAttach(&'static str),
}

impl Display for ElementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementError::BadName(msg) => write!(f, "invalid XML name: {msg}"),
            ElementError::BadAttach(msg) => write!(f, "invalid attachment: {msg}"),
        }
    }
}

impl Error for ElementError {}

pub(super) mod description {
    pub(crate) const NAME_EMPTY: &str = "name is empty";
    pub(crate) const NAME_BAD_START: &str = "name starts with an illegal character";
    pub(crate) const NAME_BAD_CHAR: &str = "name contains an illegal character";
    pub(crate) const PREFIX_EMPTY: &str = "prefix before ':' is empty";
    pub(crate) const ATTACH_SELF: &str = "element cannot be its own child";
    pub(crate) const ATTACH_ANCESTOR: &str = "element cannot adopt one of its ancestors";
}
