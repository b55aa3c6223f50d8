/*
** This file is a part of Xylem (streaming XML engine for Jabber/XMPP)
** Copyright (C) 2023-2026 Deniz Arkan
**
** Xylem is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Display;
use std::str::FromStr;

use crate::Element;
use crate::ElementError;

use super::IdGenerator;
use super::Jid;

/// A top-level protocol element with the attributes every stanza kind
/// shares: `id`, `xml:lang`, and the `from`/`to` addressing pair.
///
/// The wrapper owns a handle to a plain [Element]; everything else about
/// the stanza (children, payload namespaces) is manipulated through
/// [element()](Stanza::element).
pub struct Stanza {
    element: Element,
}

impl Stanza {
    pub fn new(tag: &str) -> Result<Stanza, ElementError> {
        Ok(Stanza {
            element: Element::new(tag)?,
        })
    }

    pub fn with_namespace(tag: &str, xmlns: &str) -> Result<Stanza, ElementError> {
        Ok(Stanza {
            element: Element::with_namespace(tag, xmlns)?,
        })
    }

    /// Wraps an element that came off the stream.
    pub fn from_element(element: Element) -> Stanza {
        Stanza { element }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn into_element(self) -> Element {
        self.element
    }

    pub fn id(&self) -> Option<String> {
        self.element.attribute("id")
    }

    pub fn set_id(&self, id: &str) {
        self.element.set_attribute("id", Some(id));
    }

    /// Stamps a fresh identifier from the given strategy, overwriting
    /// any existing one, and returns it.
    pub fn generate_id(&self, generator: &mut dyn IdGenerator) -> String {
        let id = generator.next_id();
        self.set_id(&id);
        id
    }

    pub fn lang(&self) -> Option<String> {
        self.element.attribute("xml:lang")
    }

    /// Sets `xml:lang`; an empty value removes it.
    pub fn set_lang(&self, lang: &str) {
        if lang.is_empty() {
            self.element.remove_attribute("xml:lang");
        } else {
            self.element.set_attribute("xml:lang", Some(lang));
        }
    }

    /// The sender address, if present and well formed.
    pub fn from_jid(&self) -> Option<Jid> {
        self.element
            .attribute("from")
            .and_then(|value| Jid::new(&value).ok())
    }

    pub fn set_from(&self, from: Option<&Jid>) {
        match from {
            Some(jid) => self
                .element
                .set_attribute("from", Some(&jid.to_string())),
            None => {
                self.element.remove_attribute("from");
            }
        }
    }

    /// The recipient address, if present and well formed.
    pub fn to_jid(&self) -> Option<Jid> {
        self.element
            .attribute("to")
            .and_then(|value| Jid::new(&value).ok())
    }

    pub fn set_to(&self, to: Option<&Jid>) {
        match to {
            Some(jid) => self.element.set_attribute("to", Some(&jid.to_string())),
            None => {
                self.element.remove_attribute("to");
            }
        }
    }

    /// Swaps the `from` and `to` addresses, for building a reply out of
    /// a received stanza.
    pub fn switch_direction(&self) {
        let from = self.from_jid();
        let to = self.to_jid();
        self.set_from(to.as_ref());
        self.set_to(from.as_ref());
    }
}

impl Display for Stanza {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.element.fmt(f)
    }
}

/// The four exchange semantics an `<iq/>` stanza can carry.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum IqType {
    Get,
    Set,
    Result,
    Error,
}

impl IqType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IqType::Get => "get",
            IqType::Set => "set",
            IqType::Result => "result",
            IqType::Error => "error",
        }
    }

    /// Case-insensitive parse; `None` for unknown values.
    pub fn parse(s: &str) -> Option<IqType> {
        for kind in [IqType::Get, IqType::Set, IqType::Result, IqType::Error] {
            if s.eq_ignore_ascii_case(kind.as_str()) {
                return Some(kind);
            }
        }
        None
    }
}

impl Display for IqType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IqType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IqType::parse(s).ok_or("unknown iq type")
    }
}
