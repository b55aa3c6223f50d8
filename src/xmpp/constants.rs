/*
** This file is a part of Xylem (streaming XML engine for Jabber/XMPP)
** Copyright (C) 2023-2026 Deniz Arkan
**
** Xylem is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

pub const CLIENT_PORT: u16 = 5222;

pub const SERVER_PORT: u16 = 5269;

pub const STREAM_TAG: &str = "stream:stream";

pub const STREAM_NAMESPACE: &str = "http://etherx.jabber.org/streams";

pub const CLIENT_NAMESPACE: &str = "jabber:client";

pub const SERVER_NAMESPACE: &str = "jabber:server";

pub const STREAMS_ERROR_NAMESPACE: &str = "urn:ietf:params:xml:ns:xmpp-streams";
