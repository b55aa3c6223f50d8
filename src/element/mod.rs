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

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Write;
use std::rc::Rc;
use std::rc::Weak;

use crate::entities::escape_to;
use crate::entities::escaped_size;
use crate::namespaces::NamespaceStack;

pub use error::ElementError;
use error::description;

struct NodeData {
    name: String,
    prefix: Option<String>,
    value: Option<String>,
    attributes: BTreeMap<String, String>,
    children: Vec<Element>,
    parent: Weak<RefCell<NodeData>>,
}

/// A node of the element tree.
///
/// `Element` is a cheap handle over a shared node: cloning it yields
/// another handle to the same node (the way a cursor into a document
/// works), and a fully independent copy is made with
/// [deep_clone()](Element::deep_clone). Ownership flows from the root
/// down through the child lists; the parent link is weak and only used
/// to ascend, so dropping every handle to a root releases the whole
/// tree.
///
/// Namespace declarations are ordinary attributes named `xmlns` or
/// `xmlns:<prefix>`. Resolving a prefix with
/// [get_namespace()](Element::get_namespace) checks the node's own
/// declarations first and then delegates to the parent chain, which is
/// how an unprefixed child under a namespaced parent inherits its
/// namespace.
///
/// The handle is not thread-safe; one mutator at a time is the caller's
/// contract.
///
/// # Examples
///
/// ```
/// use xylem::Element;
///
/// let message = Element::with_namespace("message", "jabber:client")?;
/// message.set_attribute("to", Some("user@example.com"));
/// let body = Element::new("body")?;
/// body.set_text(Some("Hello!"));
/// message.add_child(&body)?;
///
/// assert_eq!(
///     message.to_string(),
///     "<message to=\"user@example.com\" xmlns=\"jabber:client\"><body>Hello!</body></message>",
/// );
/// # Ok::<(), xylem::ElementError>(())
/// ```
pub struct Element {
    node: Rc<RefCell<NodeData>>,
}

fn is_name_start_char(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c) || c.is_ascii_digit() || c == '-' || c == '.'
}

fn check_name(name: &str) -> Result<(), ElementError> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err(ElementError::BadName(description::NAME_EMPTY)),
        Some(first) => {
            if !is_name_start_char(first) {
                return Err(ElementError::BadName(description::NAME_BAD_START));
            }
        }
    }
    for c in chars {
        if !is_name_char(c) {
            return Err(ElementError::BadName(description::NAME_BAD_CHAR));
        }
    }
    Ok(())
}

fn namespace_key(prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("xmlns:{prefix}"),
        _ => "xmlns".to_string(),
    }
}

/// The prefix declared by an attribute key, if the key is a namespace
/// declaration: `""` for `xmlns`, `"p"` for `xmlns:p`.
fn declared_prefix(key: &str) -> Option<&str> {
    if key == "xmlns" {
        Some("")
    } else {
        key.strip_prefix("xmlns:")
    }
}

impl Element {
    /// Creates a standalone element from a possibly prefixed tag such as
    /// `body` or `stream:features`. Both parts must be valid XML names.
    pub fn new(tag: &str) -> Result<Element, ElementError> {
        let (prefix, name) = match tag.find(':') {
            Some(0) => return Err(ElementError::BadName(description::PREFIX_EMPTY)),
            Some(pos) => (Some(&tag[..pos]), &tag[pos + 1..]),
            None => (None, tag),
        };
        if let Some(prefix) = prefix {
            check_name(prefix)?;
        }
        check_name(name)?;

        Ok(Element {
            node: Rc::new(RefCell::new(NodeData {
                name: name.to_string(),
                prefix: prefix.map(str::to_string),
                value: None,
                attributes: BTreeMap::new(),
                children: Vec::new(),
                parent: Weak::new(),
            })),
        })
    }

    /// Creates an element and declares `xmlns` for its own prefix (the
    /// default namespace when the tag is unprefixed).
    pub fn with_namespace(tag: &str, xmlns: &str) -> Result<Element, ElementError> {
        let element = Element::new(tag)?;
        element.set_namespace(xmlns);
        Ok(element)
    }

    /// True if both handles point at the same node.
    pub fn same_node(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }

    pub fn name(&self) -> String {
        self.node.borrow().name.clone()
    }

    pub fn prefix(&self) -> Option<String> {
        self.node.borrow().prefix.clone()
    }

    /// The name as it appears on the wire: `prefix:name` or `name`.
    pub fn qualified_name(&self) -> String {
        let data = self.node.borrow();
        match &data.prefix {
            Some(prefix) => format!("{}:{}", prefix, data.name),
            None => data.name.clone(),
        }
    }

    //
    // Text value
    //

    pub fn text(&self) -> Option<String> {
        self.node.borrow().value.clone()
    }

    pub fn set_text(&self, text: Option<&str>) {
        self.node.borrow_mut().value = text.map(str::to_string);
    }

    /// Appends to the existing text value, merging adjacent runs that
    /// arrive in separate pieces.
    pub fn append_text(&self, text: &str) {
        let mut data = self.node.borrow_mut();
        match &mut data.value {
            Some(value) => value.push_str(text),
            None => data.value = Some(text.to_string()),
        }
    }

    //
    // Attributes
    //

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.node.borrow().attributes.get(name).cloned()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.node.borrow().attributes.contains_key(name)
    }

    /// Sets an attribute; `None` removes it.
    pub fn set_attribute(&self, name: &str, value: Option<&str>) {
        let mut data = self.node.borrow_mut();
        match value {
            Some(value) => {
                data.attributes.insert(name.to_string(), value.to_string());
            }
            None => {
                data.attributes.remove(name);
            }
        }
    }

    pub fn remove_attribute(&self, name: &str) -> bool {
        self.node.borrow_mut().attributes.remove(name).is_some()
    }

    /// A snapshot of the attributes in key order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.node
            .borrow()
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    //
    // Namespaces
    //

    /// Declares `uri` for this element's own prefix, as an `xmlns` or
    /// `xmlns:<prefix>` attribute.
    pub fn set_namespace(&self, uri: &str) {
        let key = namespace_key(self.prefix().as_deref());
        self.set_attribute(&key, Some(uri));
    }

    /// Declares `uri` for an explicit prefix on this element.
    pub fn set_prefixed_namespace(&self, prefix: &str, uri: &str) {
        self.set_attribute(&namespace_key(Some(prefix)), Some(uri));
    }

    /// The namespace this element's own name lives in.
    pub fn namespace(&self) -> Option<String> {
        self.get_namespace(self.prefix().as_deref())
    }

    /// Resolves a prefix against this element's declarations, delegating
    /// to the parent chain when the element itself does not declare it.
    /// `None` (or an empty prefix) resolves the default namespace.
    pub fn get_namespace(&self, prefix: Option<&str>) -> Option<String> {
        let key = namespace_key(prefix);
        let mut current = self.clone();
        loop {
            if let Some(uri) = current.attribute(&key) {
                return Some(uri);
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => return None,
            }
        }
    }

    //
    // Tree structure
    //

    pub fn parent(&self) -> Option<Element> {
        self.node
            .borrow()
            .parent
            .upgrade()
            .map(|node| Element { node })
    }

    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    pub fn root(&self) -> Element {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// A snapshot of the child list in insertion order.
    pub fn children(&self) -> Vec<Element> {
        self.node.borrow().children.to_vec()
    }

    pub fn has_children(&self) -> bool {
        !self.node.borrow().children.is_empty()
    }

    /// The first child with the given local name.
    pub fn find_child(&self, name: &str) -> Option<Element> {
        self.node
            .borrow()
            .children
            .iter()
            .find(|child| child.name() == name)
            .cloned()
    }

    /// Appends `child`, detaching it from any previous parent first. A
    /// node has at most one parent at any time.
    pub fn add_child(&self, child: &Element) -> Result<(), ElementError> {
        if self.same_node(child) {
            return Err(ElementError::BadAttach(description::ATTACH_SELF));
        }
        let mut ancestor = self.parent();
        while let Some(current) = ancestor {
            if current.same_node(child) {
                return Err(ElementError::BadAttach(description::ATTACH_ANCESTOR));
            }
            ancestor = current.parent();
        }
        if let Some(parent) = child.parent() {
            if parent.same_node(self) {
                return Ok(());
            }
            parent.remove_child(child);
        }

        self.node.borrow_mut().children.push(child.clone());
        child.node.borrow_mut().parent = Rc::downgrade(&self.node);
        Ok(())
    }

    pub fn remove_child(&self, child: &Element) {
        match child.parent() {
            Some(parent) if parent.same_node(self) => (),
            _ => return,
        }
        self.node
            .borrow_mut()
            .children
            .retain(|current| !current.same_node(child));
        child.node.borrow_mut().parent = Weak::new();
    }

    /// Detaches this element from its parent, if it has one.
    pub fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent.remove_child(self);
        }
    }

    /// A fully independent copy: fresh attributes and text, recursively
    /// cloned children attached to the copy, no parent.
    pub fn deep_clone(&self) -> Element {
        let data = self.node.borrow();
        let clone = Element {
            node: Rc::new(RefCell::new(NodeData {
                name: data.name.clone(),
                prefix: data.prefix.clone(),
                value: data.value.clone(),
                attributes: data.attributes.clone(),
                children: Vec::new(),
                parent: Weak::new(),
            })),
        };
        for child in &data.children {
            let child_clone = child.deep_clone();
            child_clone.node.borrow_mut().parent = Rc::downgrade(&clone.node);
            clone.node.borrow_mut().children.push(child_clone);
        }
        clone
    }

    //
    // Serialization
    //

    /// Only the start tag of this element, attributes included, without
    /// any namespace elision. Useful for opening a long-lived stream
    /// root whose end tag will not follow for the lifetime of the
    /// connection.
    pub fn start_tag(&self) -> String {
        let data = self.node.borrow();
        let mut size = self.qualified_name().len() + 2;
        for (key, value) in &data.attributes {
            size += key.len() + escaped_size(value) + 4;
        }
        let mut buf = String::with_capacity(size);
        buf.push('<');
        buf.push_str(&self.qualified_name());
        for (key, value) in &data.attributes {
            buf.push(' ');
            buf.push_str(key);
            buf.push_str("=\"");
            let _ = escape_to(value, &mut buf);
            buf.push('"');
        }
        buf.push('>');
        buf
    }

    /// Only the end tag of this element.
    pub fn end_tag(&self) -> String {
        format!("</{}>", self.qualified_name())
    }

    /// The canonical form with one level of indentation per depth.
    pub fn to_pretty_string(&self, indent_width: usize) -> String {
        let mut buf = String::new();
        let mut scope = NamespaceStack::new();
        let _ = write_element(
            self,
            &mut buf,
            &mut scope,
            Some(indent_width.max(1)),
            0,
        );
        buf
    }

    fn fmt_wire<W: Write>(&self, w: &mut W) -> std::fmt::Result {
        let mut scope = NamespaceStack::new();
        write_element(self, w, &mut scope, None, 0)
    }
}

/// Depth-first canonical serialization: start tag with attributes
/// (redundant namespace declarations elided against the bindings already
/// in scope), children in insertion order, then the text value if it is
/// non-blank, then the end tag. Childless, textless nodes collapse to an
/// empty element tag.
fn write_element<W: Write>(
    element: &Element,
    w: &mut W,
    scope: &mut NamespaceStack,
    indent: Option<usize>,
    depth: usize,
) -> std::fmt::Result {
    let data = element.node.borrow();
    scope.push_scope();

    if let Some(width) = indent {
        if depth > 0 {
            w.write_char('\n')?;
            for _ in 0..depth * width {
                w.write_char(' ')?;
            }
        }
    }

    let qualified = match &data.prefix {
        Some(prefix) => format!("{}:{}", prefix, data.name),
        None => data.name.clone(),
    };
    w.write_char('<')?;
    w.write_str(&qualified)?;

    for (key, value) in &data.attributes {
        if let Some(prefix) = declared_prefix(key) {
            if scope.lookup(prefix) == Some(value.as_str()) {
                continue;
            }
            scope.declare(prefix, value);
        }
        w.write_char(' ')?;
        w.write_str(key)?;
        w.write_str("=\"")?;
        escape_to(value, w)?;
        w.write_char('"')?;
    }

    let text = data.value.as_deref().filter(|text| !text.trim().is_empty());
    if data.children.is_empty() && text.is_none() {
        w.write_str("/>")?;
        scope.pop_scope();
        return Ok(());
    }

    w.write_char('>')?;
    for child in &data.children {
        write_element(child, w, scope, indent, depth + 1)?;
    }
    if let Some(text) = text {
        if let Some(width) = indent {
            if !data.children.is_empty() {
                w.write_char('\n')?;
                for _ in 0..(depth + 1) * width {
                    w.write_char(' ')?;
                }
            }
        }
        escape_to(text, w)?;
    }
    if let Some(width) = indent {
        if !data.children.is_empty() {
            w.write_char('\n')?;
            for _ in 0..depth * width {
                w.write_char(' ')?;
            }
        }
    }
    w.write_str("</")?;
    w.write_str(&qualified)?;
    w.write_char('>')?;

    scope.pop_scope();
    Ok(())
}

impl Clone for Element {
    /// Clones the handle; both handles point at the same node. Use
    /// [deep_clone()](Element::deep_clone) for an independent copy.
    fn clone(&self) -> Self {
        Element {
            node: Rc::clone(&self.node),
        }
    }
}

impl Display for Element {
    /// The canonical wire form: UTF-8, no XML declaration, double-quoted
    /// attribute values.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_wire(f)
    }
}

impl Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Element({})", self.start_tag())
    }
}
