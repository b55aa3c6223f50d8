/*
** This file is a part of Xylem (streaming XML engine for Jabber/XMPP)
** Copyright (C) 2023-2026 Deniz Arkan
**
** Xylem is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use crate::Element;
use crate::StreamError;
use crate::StreamHandler;
use crate::StreamParser;

use super::*;

#[test]
fn stanza_id_and_lang() {
    let message = Stanza::new("message").unwrap();
    assert_eq!(message.id(), None);

    message.set_id("a1");
    assert_eq!(message.id(), Some("a1".to_string()));

    let mut generator = SequentialIdGenerator::new();
    let id = message.generate_id(&mut generator);
    assert_eq!(id, "uid00000000");
    assert_eq!(message.id(), Some(id));

    message.set_lang("en");
    assert_eq!(message.lang(), Some("en".to_string()));
    message.set_lang("");
    assert_eq!(message.lang(), None);
}

#[test]
fn stanza_addressing() {
    let message = Stanza::new("message").unwrap();
    let alice = Jid::new("alice@example.com/desk").unwrap();
    let bob = Jid::new("bob@example.com").unwrap();

    message.set_from(Some(&alice));
    message.set_to(Some(&bob));
    assert_eq!(message.from_jid(), Some(alice.clone()));
    assert_eq!(message.to_jid(), Some(bob.clone()));

    message.switch_direction();
    assert_eq!(message.from_jid(), Some(bob));
    assert_eq!(message.to_jid(), Some(alice));

    message.set_from(None);
    assert_eq!(message.from_jid(), None);
    assert!(!message.element().has_attribute("from"));

    // a malformed address reads as absent
    message.element().set_attribute("to", Some("@broken"));
    assert_eq!(message.to_jid(), None);
}

#[test]
fn stanza_serializes_through_its_element() {
    let iq = Stanza::with_namespace("iq", constants::CLIENT_NAMESPACE).unwrap();
    iq.set_id("q1");
    iq.element()
        .set_attribute("type", Some(IqType::Get.as_str()));

    assert_eq!(
        iq.to_string(),
        "<iq id=\"q1\" type=\"get\" xmlns=\"jabber:client\"/>"
    );
}

#[test]
fn iq_types() {
    assert_eq!(IqType::parse("get"), Some(IqType::Get));
    assert_eq!(IqType::parse("SET"), Some(IqType::Set));
    assert_eq!(IqType::parse("Result"), Some(IqType::Result));
    assert_eq!(IqType::parse("error"), Some(IqType::Error));
    assert_eq!(IqType::parse("query"), None);

    assert_eq!(IqType::Get.to_string(), "get");
    assert_eq!("set".parse::<IqType>(), Ok(IqType::Set));
    assert!("bogus".parse::<IqType>().is_err());
}

#[test]
fn stream_header_round_trip() {
    // the opening tag a client sends; the end tag follows only when the
    // connection closes
    let header = Element::new(constants::STREAM_TAG).unwrap();
    header.set_prefixed_namespace("stream", constants::STREAM_NAMESPACE);
    header.set_attribute("xmlns", Some(constants::CLIENT_NAMESPACE));
    header.set_attribute("version", Some("1.0"));
    header.set_attribute("to", Some("example.com"));

    let wire = format!(
        "{}<message from='alice@example.com'><body>hi</body></message>{}",
        header.start_tag(),
        header.end_tag()
    );

    struct Session {
        stanzas: Vec<Stanza>,
        started: bool,
        ended: bool,
    }
    impl StreamHandler for Session {
        fn handle_stream_start(&mut self, root: &Element) {
            assert_eq!(root.qualified_name(), constants::STREAM_TAG);
            assert_eq!(
                root.namespace(),
                Some(constants::STREAM_NAMESPACE.to_string())
            );
            self.started = true;
        }
        fn handle_stream_element(&mut self, stanza: Element) -> Result<(), StreamError> {
            self.stanzas.push(Stanza::from_element(stanza));
            Ok(())
        }
        fn handle_stream_end(&mut self) {
            self.ended = true;
        }
        fn handle_error(&mut self, error: &StreamError) {
            panic!("unexpected error: {error}");
        }
    }

    let mut session = Session {
        stanzas: Vec::new(),
        started: false,
        ended: false,
    };
    let mut parser = StreamParser::new();
    parser.feed(&mut session, wire.as_bytes());

    assert!(session.started);
    assert!(session.ended);
    assert_eq!(session.stanzas.len(), 1);

    let message = &session.stanzas[0];
    assert_eq!(
        message.from_jid(),
        Some(Jid::new("alice@example.com").unwrap())
    );
    assert_eq!(
        message.element().namespace(),
        Some(constants::CLIENT_NAMESPACE.to_string())
    );

    // build the reply by flipping the direction of the original
    message.switch_direction();
    message.set_id("r1");
    assert_eq!(
        message.to_string(),
        "<message id=\"r1\" to=\"alice@example.com\" xmlns=\"jabber:client\">\
         <body>hi</body></message>"
    );
}
