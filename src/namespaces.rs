/*
** This file is a part of Xylem (streaming XML engine for Jabber/XMPP)
** Copyright (C) 2023-2026 Deniz Arkan
**
** Xylem is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::collections::HashMap;

/// Namespace bound to the `xmlns` prefix by the XML namespaces spec.
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// Namespace bound to the `xml` prefix by the XML namespaces spec.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Scoped mapping from namespace prefixes to URIs.
///
/// A scope is pushed when a start tag begins and popped when its matching
/// end tag is processed, so the visible bindings always correspond to the
/// element currently being built. Lookups scan from the innermost scope
/// outwards. The outermost scope is seeded with the two prefixes every
/// document has ([XMLNS_NAMESPACE] and [XML_NAMESPACE]) and is never
/// popped.
pub struct NamespaceStack {
    scopes: Vec<HashMap<String, String>>,
}

impl NamespaceStack {
    pub fn new() -> NamespaceStack {
        let mut stack = NamespaceStack { scopes: Vec::new() };
        stack.seed();
        stack
    }

    fn seed(&mut self) {
        self.scopes.push(HashMap::new());
        self.declare("xmlns", XMLNS_NAMESPACE);
        self.declare("xml", XML_NAMESPACE);
    }

    /// Opens a new scope, typically at the start of each element.
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Discards the innermost scope and its declarations.
    ///
    /// Popping with only the seeded scope left is a no-op; the pairing
    /// driven by the parser never reaches it.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Binds `prefix` to `uri` in the innermost scope. The empty prefix
    /// binds the default namespace.
    pub fn declare(&mut self, prefix: &str, uri: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(prefix.to_string(), uri.to_string());
        }
    }

    /// Finds the URI bound to `prefix`, scanning from the innermost
    /// scope outwards. Returns `None` if the prefix is undeclared
    /// everywhere.
    pub fn lookup(&self, prefix: &str) -> Option<&str> {
        for scope in self.scopes.iter().rev() {
            if let Some(uri) = scope.get(prefix) {
                return Some(uri.as_str());
            }
        }
        None
    }

    /// The URI bound to the empty prefix, if any.
    pub fn default_namespace(&self) -> Option<&str> {
        self.lookup("")
    }

    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Drops every scope and returns to the freshly-constructed state.
    pub fn reset(&mut self) {
        self.scopes.clear();
        self.seed();
    }
}

impl Default for NamespaceStack {
    fn default() -> Self {
        Self::new()
    }
}
