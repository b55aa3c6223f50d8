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

use super::BadJid;
use super::error::description;

const MAX_PART_OCTETS: usize = 1023;

fn check_local(local: &str) -> Result<(), BadJid> {
    if local.is_empty() {
        return Err(BadJid(description::LOCAL_EMPTY));
    }
    if local.len() > MAX_PART_OCTETS {
        return Err(BadJid(description::LOCAL_TOO_LONG));
    }
    Ok(())
}

fn check_domain(domain: &str) -> Result<&str, BadJid> {
    if domain.is_empty() {
        return Err(BadJid(description::DOMAIN_EMPTY));
    }
    if domain.len() > MAX_PART_OCTETS {
        return Err(BadJid(description::DOMAIN_TOO_LONG));
    }
    // final dot is removed as per RFC 7622 section 3.2
    let domain = domain.strip_suffix('.').unwrap_or(domain);
    if domain.is_empty() {
        return Err(BadJid(description::DOMAIN_EMPTY));
    }
    Ok(domain)
}

fn check_resource(resource: &str) -> Result<(), BadJid> {
    if resource.is_empty() {
        return Err(BadJid(description::RESOURCE_EMPTY));
    }
    if resource.len() > MAX_PART_OCTETS {
        return Err(BadJid(description::RESOURCE_TOO_LONG));
    }
    Ok(())
}

/// The address of an entity in the XMPP protocol.
///
/// Each JID has three parts:
/// - Local part: Optionally identifies a local entity on the domain.
/// - Domain part: Identifies an XMPP server.
/// - Resource part: Optionally identifies a service or an object.
///
/// More details can be found in [RFC7622](https://datatracker.ietf.org/doc/rfc7622/)
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Jid {
    local: Option<String>,
    domain: String,
    resource: Option<String>,
}

impl Jid {
    /// Parses a JID of the form `local@domain/resource`, where the local
    /// and resource parts are optional.
    pub fn new(jid: &str) -> Result<Jid, BadJid> {
        let (bare, resource) = match jid.find('/') {
            Some(pos) => (&jid[..pos], Some(&jid[pos + 1..])),
            None => (jid, None),
        };
        let (local, domain) = match bare.find('@') {
            Some(pos) => (Some(&bare[..pos]), &bare[pos + 1..]),
            None => (None, bare),
        };

        if let Some(local) = local {
            check_local(local)?;
        }
        let domain = check_domain(domain)?;
        if let Some(resource) = resource {
            check_resource(resource)?;
        }

        Ok(Jid {
            local: local.map(str::to_string),
            domain: domain.to_string(),
            resource: resource.map(str::to_string),
        })
    }

    /// Builds a JID from already separated parts.
    pub fn from_parts(
        local: Option<&str>,
        domain: &str,
        resource: Option<&str>,
    ) -> Result<Jid, BadJid> {
        if let Some(local) = local {
            check_local(local)?;
        }
        let domain = check_domain(domain)?;
        if let Some(resource) = resource {
            check_resource(resource)?;
        }

        Ok(Jid {
            local: local.map(str::to_string),
            domain: domain.to_string(),
            resource: resource.map(str::to_string),
        })
    }

    /// Only the local part of the JID.
    pub fn localpart(&self) -> Option<&str> {
        self.local.as_deref()
    }

    /// Only the domain part of the JID.
    pub fn domainpart(&self) -> &str {
        &self.domain
    }

    /// Only the resource part of the JID.
    pub fn resourcepart(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// True if the JID does not contain a resource part.
    pub fn is_bare(&self) -> bool {
        self.resource.is_none()
    }

    /// True if the JID contains a resource part.
    pub fn is_full(&self) -> bool {
        self.resource.is_some()
    }

    /// The same address without the resource part.
    pub fn bare(&self) -> Jid {
        Jid {
            local: self.local.clone(),
            domain: self.domain.clone(),
            resource: None,
        }
    }

    /// Creates another JID by overriding the resource part.
    pub fn with_resource(&self, resource: &str) -> Result<Jid, BadJid> {
        check_resource(resource)?;
        Ok(Jid {
            local: self.local.clone(),
            domain: self.domain.clone(),
            resource: Some(resource.to_string()),
        })
    }

    /// True when both addresses match ignoring the resource parts.
    pub fn eq_bare(&self, other: &Jid) -> bool {
        self.local == other.local && self.domain == other.domain
    }
}

impl Display for Jid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(local) = &self.local {
            write!(f, "{local}@")?;
        }
        write!(f, "{}", self.domain)?;
        if let Some(resource) = &self.resource {
            write!(f, "/{resource}")?;
        }
        Ok(())
    }
}

impl FromStr for Jid {
    type Err = BadJid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Jid::new(s)
    }
}
