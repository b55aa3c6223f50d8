/*
** This file is a part of Xylem (streaming XML engine for Jabber/XMPP)
** Copyright (C) 2023-2026 Deniz Arkan
**
** Xylem is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;

use memchr::memchr;

use crate::Element;
use crate::buffer::ByteAccumulator;
use crate::namespaces::NamespaceStack;
use crate::scanner::ScanError;
use crate::scanner::Token;
use crate::scanner::TokenKind;
use crate::scanner::normalize_attribute_value;
use crate::scanner::tokenize_cdata_section;
use crate::scanner::tokenize_content;

pub use error::StreamError;
use error::description;

/// Receives the events of one XMPP connection, synchronously from inside
/// [StreamParser::feed].
///
/// `handle_stream_element` may refuse a stanza by returning an error; the
/// parser reroutes it to [handle_error](StreamHandler::handle_error) and
/// carries on, so a misbehaving consumer cannot corrupt the parse state.
pub trait StreamHandler {
    /// The outermost element's start tag was recognized. Fired exactly
    /// once per stream; the root element stays alive for the whole
    /// connection and never closes as a normal node.
    fn handle_stream_start(&mut self, root: &Element);

    /// A complete top-level child of the root — one stanza. The element
    /// is detached from the root and owned by the handler from here on.
    fn handle_stream_element(&mut self, stanza: Element) -> Result<(), StreamError>;

    /// The root's end tag was recognized; the peer closed the stream.
    fn handle_stream_end(&mut self);

    /// A fault was found in the incoming bytes or reported by the
    /// handler itself. The parser continues on a best-effort basis.
    fn handle_error(&mut self, error: &StreamError);
}

/// Incremental, non-blocking parser for one XML stream.
///
/// Feed it the raw bytes exactly as they come off the socket, in
/// whatever fragments the transport delivers; it assembles complete
/// element subtrees and raises events on the injected handler. Bytes
/// that end in the middle of a token are kept for the next feed call, so
/// no framing of any kind is expected from the caller.
///
/// # Examples
///
/// ```
/// use xylem::{Element, StreamError, StreamHandler, StreamParser};
///
/// struct Printer;
///
/// impl StreamHandler for Printer {
///     fn handle_stream_start(&mut self, root: &Element) {
///         println!("stream open: {}", root.qualified_name());
///     }
///     fn handle_stream_element(&mut self, stanza: Element) -> Result<(), StreamError> {
///         println!("stanza: {}", stanza);
///         Ok(())
///     }
///     fn handle_stream_end(&mut self) {
///         println!("stream closed");
///     }
///     fn handle_error(&mut self, error: &StreamError) {
///         eprintln!("stream error: {}", error);
///     }
/// }
///
/// let mut parser = StreamParser::new();
/// let mut printer = Printer;
/// parser.feed(&mut printer, b"<stream:stream xmlns:stream='urn:example'>");
/// parser.feed(&mut printer, b"<message><body>Hello!</body></message>");
/// ```
///
/// A parser instance serves one connection at a time; exactly one feed
/// call may be active on it. [reset()](StreamParser::reset) returns it
/// to the freshly-constructed state for the in-place stream restarts
/// the protocol performs after negotiation.
pub struct StreamParser {
    depth: usize,
    root: Option<Element>,
    current: Option<Element>,
    ended: bool,
    in_cdata: bool,
    ns: NamespaceStack,
    accumulator: ByteAccumulator,
    token: Token,
}

impl StreamParser {
    pub fn new() -> StreamParser {
        StreamParser {
            depth: 0,
            root: None,
            current: None,
            ended: false,
            in_cdata: false,
            ns: NamespaceStack::new(),
            accumulator: ByteAccumulator::new(),
            token: Token::new(),
        }
    }

    /// Clears all parse state back to the freshly-constructed parser.
    pub fn reset(&mut self) {
        self.depth = 0;
        self.root = None;
        self.current = None;
        self.ended = false;
        self.in_cdata = false;
        self.ns.reset();
        self.accumulator.clear();
    }

    /// Current element nesting depth; the stream root counts as one.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The stream root, once `handle_stream_start` has fired.
    pub fn root(&self) -> Option<Element> {
        self.root.clone()
    }

    /// Consumes a fragment of the byte stream.
    ///
    /// Tokens that complete inside the accumulated bytes are applied and
    /// their events raised before the call returns; an incomplete token
    /// at the end is retained for the next call. Faults are reported
    /// through [StreamHandler::handle_error] and never stop the loop.
    pub fn feed(&mut self, handler: &mut impl StreamHandler, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.accumulator.write(bytes);
        let buf = self.accumulator.snapshot();
        let mut off = 0;

        while off < buf.len() {
            let scanned = if self.in_cdata {
                tokenize_cdata_section(&buf, off, &mut self.token)
            } else {
                tokenize_content(&buf, off, &mut self.token)
            };
            match scanned {
                Ok(kind) => {
                    let end = self.token.token_end();
                    if let Err(error) = self.apply_token(handler, &buf, off, kind) {
                        handler.handle_error(&error);
                    }
                    off = end;
                }
                Err(ScanError::Partial) | Err(ScanError::Extensible) => break,
                Err(ScanError::BadToken(msg)) => {
                    handler.handle_error(&StreamError::BadXml(msg));
                    off = resync(&buf, off);
                }
            }
        }

        self.accumulator.release(off);
    }

    fn apply_token(
        &mut self,
        handler: &mut impl StreamHandler,
        buf: &[u8],
        off: usize,
        kind: TokenKind,
    ) -> Result<(), StreamError> {
        match kind {
            TokenKind::StartTagNoAtts | TokenKind::StartTagWithAtts => {
                match self.start_tag(handler, buf, off) {
                    Ok(()) => Ok(()),
                    Err(error) => {
                        // scope stays paired even when assembly aborts
                        self.close_scope();
                        Err(error)
                    }
                }
            }
            TokenKind::EmptyElementNoAtts | TokenKind::EmptyElementWithAtts => {
                match self.start_tag(handler, buf, off) {
                    Ok(()) => self.end_tag(handler, None),
                    Err(error) => {
                        self.close_scope();
                        Err(error)
                    }
                }
            }
            TokenKind::EndTag => match str_slice(buf, off + 2, self.token.name_end()) {
                Ok(name) => self.end_tag(handler, Some(name)),
                Err(error) => self.end_tag(handler, None).and(Err(error)),
            },
            TokenKind::DataChars => {
                let text = str_slice(buf, off, self.token.token_end())?;
                self.add_text(text);
                Ok(())
            }
            TokenKind::DataNewline => {
                self.add_text("\n");
                Ok(())
            }
            TokenKind::CharRef | TokenKind::CharPairRef => {
                if let Some(c) = self.token.ref_char() {
                    let mut utf8 = [0u8; 4];
                    self.add_text(c.encode_utf8(&mut utf8));
                }
                Ok(())
            }
            TokenKind::CdataSectOpen => {
                self.in_cdata = true;
                Ok(())
            }
            TokenKind::CdataSectClose => {
                self.in_cdata = false;
                Ok(())
            }
            // the protocol mandates UTF-8 and XML 1.0; nothing to negotiate
            TokenKind::XmlDecl => Ok(()),
        }
    }

    /// Builds a node from the start tag at `off`, routing `xmlns`
    /// declarations into the namespace stack and resolving the tag's own
    /// namespace. The first node becomes the stream root.
    fn start_tag(
        &mut self,
        handler: &mut impl StreamHandler,
        buf: &[u8],
        off: usize,
    ) -> Result<(), StreamError> {
        self.depth += 1;
        self.ns.push_scope();

        if self.ended {
            return Err(StreamError::BadXml(description::TAG_AFTER_STREAM_END));
        }

        let spans = self.token.attributes().to_vec();
        let mut plain: Vec<(String, String)> = Vec::with_capacity(spans.len());
        for span in spans {
            let name = str_slice(buf, span.name_start, span.name_end)?;
            let value = if span.normalized {
                str_slice(buf, span.value_start, span.value_end)?.to_string()
            } else {
                normalize_attribute_value(&buf[span.value_start..span.value_end])?
            };
            if name == "xmlns" {
                self.ns.declare("", &value);
            } else if let Some(prefix) = name.strip_prefix("xmlns:") {
                self.ns.declare(prefix, &value);
            } else {
                plain.push((name.to_string(), value));
            }
        }

        let qualified = str_slice(buf, off + 1, self.token.name_end())?;
        let namespace = match qualified.find(':') {
            Some(pos) => self.ns.lookup(&qualified[..pos]),
            None => self.ns.default_namespace(),
        }
        .map(str::to_string);

        let element = Element::new(qualified)?;
        for (name, value) in &plain {
            element.set_attribute(name, Some(value));
        }
        if let Some(uri) = &namespace {
            element.set_namespace(uri);
        }

        match &self.current {
            None => {
                self.root = Some(element.clone());
                self.current = Some(element.clone());
                handler.handle_stream_start(&element);
            }
            Some(parent) => {
                parent.add_child(&element)?;
                self.current = Some(element);
            }
        }
        Ok(())
    }

    /// Closes the innermost open element. With `name` given, the pairing
    /// is verified against the open element's qualified name; a mismatch
    /// faults, and the close still happens unless it would take down the
    /// stream root itself.
    fn end_tag(
        &mut self,
        handler: &mut impl StreamHandler,
        name: Option<&str>,
    ) -> Result<(), StreamError> {
        let Some(current) = self.current.clone() else {
            // nothing is open, so this end tag has no paired scope
            return Err(StreamError::BadXml(description::END_WITHOUT_OPEN));
        };

        let mismatch = name.is_some_and(|name| name != current.qualified_name());
        if mismatch && current.parent().is_none() {
            // the opener of this end tag never made it into the tree;
            // its push/pop already netted out when the start tag faulted
            return Err(StreamError::BadXml(description::TAG_MISMATCH));
        }

        self.close_scope();

        match current.parent() {
            None => {
                // the root closing (it never closes as a normal node)
                // ends the stream
                self.current = None;
                self.ended = true;
                handler.handle_stream_end();
            }
            Some(parent) => {
                self.current = Some(parent.clone());
                let stanza_done = self
                    .root
                    .as_ref()
                    .is_some_and(|root| root.same_node(&parent));
                if stanza_done {
                    parent.remove_child(&current);
                    if !mismatch {
                        if let Err(error) = handler.handle_stream_element(current) {
                            handler.handle_error(&error);
                        }
                    }
                }
            }
        }

        if mismatch {
            return Err(StreamError::BadXml(description::TAG_MISMATCH));
        }
        Ok(())
    }

    fn close_scope(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.ns.pop_scope();
    }

    /// Appends decoded character data to the element being built.
    /// Whitespace keepalives between stanzas are not recorded on the
    /// long-lived root.
    fn add_text(&mut self, text: &str) {
        let Some(current) = &self.current else {
            return;
        };
        let at_root = self
            .root
            .as_ref()
            .is_some_and(|root| root.same_node(current));
        if at_root && text.trim().is_empty() {
            return;
        }
        current.append_text(text);
    }
}

impl Default for StreamParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Best-effort recovery point after a lexical fault: the next `<` in the
/// window, or the end of the window.
fn resync(buf: &[u8], off: usize) -> usize {
    match memchr(b'<', &buf[off + 1..]) {
        Some(i) => off + 1 + i,
        None => buf.len(),
    }
}

fn str_slice(buf: &[u8], start: usize, end: usize) -> Result<&str, StreamError> {
    std::str::from_utf8(&buf[start..end])
        .map_err(|_| StreamError::BadXml(description::UTF8_INVALID))
}
