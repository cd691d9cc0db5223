// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An undirected DOT graph description.
//!
//! This is the accumulation target for the tree walks in
//! [`viz`](crate::viz): graph and default-node attributes, record nodes,
//! edges, and nested `cluster_*` subgraphs. [`Display`] prints DOT source
//! suitable for piping into the Graphviz `dot` executable.

use core::fmt::{self, Display};

/// An undirected graph or cluster in DOT syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DotGraph {
    id: String,
    attrs: Vec<(String, String)>,
    node_attrs: Vec<(String, String)>,
    nodes: Vec<String>,
    edges: Vec<DotEdge>,
    subgraphs: Vec<DotGraph>,
}

/// An undirected edge between two named entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotEdge {
    from: String,
    to: String,
    attrs: Vec<(String, String)>,
}

impl DotEdge {
    /// Creates an edge between the two named endpoints.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            attrs: Vec::new(),
        }
    }

    /// Adds a display attribute to the edge.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    /// Returns the edge endpoints.
    #[must_use]
    pub fn endpoints(&self) -> (&str, &str) {
        (&self.from, &self.to)
    }
}

impl DotGraph {
    /// Creates a new top-level graph with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Creates a subgraph that Graphviz lays out as a cluster.
    ///
    /// Graphviz only treats subgraphs whose id starts with `cluster` as
    /// visual groupings, so the prefix is applied here.
    #[must_use]
    pub fn cluster(name: &str) -> Self {
        Self::new(format!("cluster_{name}"))
    }

    /// Returns the id of this graph.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sets a graph-level attribute such as `label` or `rankdir`.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.push((key.into(), value.into()));
    }

    /// Sets a default attribute applied to every node declared in this
    /// graph and, per DOT semantics, inherited by its subgraphs.
    pub fn set_node_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.node_attrs.push((key.into(), value.into()));
    }

    /// Declares a node in this graph.
    pub fn add_node(&mut self, name: impl Into<String>) {
        self.nodes.push(name.into());
    }

    /// Adds an edge to this graph.
    pub fn add_edge(&mut self, edge: DotEdge) {
        self.edges.push(edge);
    }

    /// Attaches a fully-populated subgraph to this graph.
    pub fn add_subgraph(&mut self, subgraph: DotGraph) {
        self.subgraphs.push(subgraph);
    }

    /// Returns the nodes declared directly in this graph.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Returns the edges declared directly in this graph.
    pub fn edges(&self) -> impl Iterator<Item = &DotEdge> {
        self.edges.iter()
    }

    /// Returns the subgraphs attached to this graph.
    pub fn subgraphs(&self) -> impl Iterator<Item = &DotGraph> {
        self.subgraphs.iter()
    }

    fn fmt_body(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        for (key, value) in &self.attrs {
            writeln!(f, "{:indent$}{key}={};", "", fmt_value(value), indent = indent)?;
        }
        if !self.node_attrs.is_empty() {
            write!(f, "{:indent$}node [", "", indent = indent)?;
            fmt_attr_list(f, &self.node_attrs)?;
            writeln!(f, "];")?;
        }
        for subgraph in &self.subgraphs {
            writeln!(f, "{:indent$}subgraph {} {{", "", quote(&subgraph.id), indent = indent)?;
            subgraph.fmt_body(f, indent + 4)?;
            writeln!(f, "{:indent$}}}", "", indent = indent)?;
        }
        for node in &self.nodes {
            writeln!(f, "{:indent$}{};", "", quote(node), indent = indent)?;
        }
        for edge in &self.edges {
            write!(
                f,
                "{:indent$}{} -- {}",
                "",
                quote(&edge.from),
                quote(&edge.to),
                indent = indent
            )?;
            if !edge.attrs.is_empty() {
                write!(f, " [")?;
                fmt_attr_list(f, &edge.attrs)?;
                write!(f, "]")?;
            }
            writeln!(f, ";")?;
        }
        Ok(())
    }
}

impl Display for DotGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "graph {} {{", quote(&self.id))?;
        self.fmt_body(f, 4)?;
        writeln!(f, "}}")
    }
}

fn fmt_attr_list(f: &mut fmt::Formatter<'_>, attrs: &[(String, String)]) -> fmt::Result {
    for (i, (key, value)) in attrs.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{key}={}", fmt_value(value))?;
    }
    Ok(())
}

/// Formats an attribute value: HTML-like labels (`<...>`) pass through
/// unquoted, plain identifiers stay bare, everything else is quoted.
fn fmt_value(value: &str) -> String {
    if value.starts_with('<') && value.ends_with('>') {
        return value.to_string();
    }
    if !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return value.to_string();
    }
    quote(value)
}

fn quote(id: &str) -> String {
    let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Wraps a label in the HTML-like bold form Graphviz understands.
#[must_use]
pub fn html_bold(text: &str) -> String {
    let escaped = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    format!("<<B>{escaped}</B>>")
}
