// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tree-to-graph conversion.
//!
//! Two recursive walks over the owned device tree populate a
//! [`DotGraph`]: the cluster walk mirrors the tree's containment
//! structure, and the edge walk connects devices to address-qualified
//! occurrences of their names elsewhere in the tree. Both walks share
//! the same visibility rules: names on the hidden list and subtrees
//! whose `status` is `disabled` are never visited.

use std::collections::BTreeSet;

use rand::Rng;
use rand::rngs::ThreadRng;

use crate::dot::{DotEdge, DotGraph, html_bold};
use crate::model::{DeviceTree, DeviceTreeNode, PropertyValue};

/// Node names excluded from rendering and edge inference by default.
///
/// Plain configuration data; supply a different set through
/// [`VizConfig`] if a tree needs other coverage.
pub const DEFAULT_HIDDEN: [&str; 6] = ["aliases", "chosen", "uboot", "prouct", "platform", "target"];

/// Configuration for one graph-building pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VizConfig {
    /// Node names to leave out of the graph entirely.
    pub hidden: BTreeSet<String>,
    /// Display color for inferred edges.
    pub edge_color: String,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            hidden: DEFAULT_HIDDEN.iter().map(ToString::to_string).collect(),
            edge_color: "grey".to_string(),
        }
    }
}

impl VizConfig {
    fn is_hidden(&self, name: &str) -> bool {
        self.hidden.contains(name)
    }
}

/// Generates a random fill color, with every RGB channel drawn uniformly
/// from `[35, 220]` to stay clear of the black/white extremes.
#[must_use]
pub fn random_fill_color(rng: &mut impl Rng) -> String {
    let r: u8 = rng.gen_range(35..=220);
    let g: u8 = rng.gen_range(35..=220);
    let b: u8 = rng.gen_range(35..=220);
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Populates a [`DotGraph`] from a device tree.
///
/// The builder owns the per-invocation state: the color source and the
/// set of edges already emitted, keyed by unordered endpoint pair so a
/// relationship discovered from several paths is drawn once.
#[derive(Debug)]
pub struct GraphBuilder<'a> {
    config: &'a VizConfig,
    rng: ThreadRng,
    emitted: BTreeSet<(String, String)>,
}

impl<'a> GraphBuilder<'a> {
    /// Creates a builder for one graph-building pass.
    #[must_use]
    pub fn new(config: &'a VizConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
            emitted: BTreeSet::new(),
        }
    }

    /// Mirrors the containment structure of `node`'s children into
    /// `graph`.
    ///
    /// A child with nested children becomes a filled cluster and is
    /// descended into; a child with only properties becomes a record
    /// node. Hidden names and `disabled` subtrees are skipped without
    /// recursion.
    pub fn build_clusters(&mut self, node: &DeviceTreeNode, graph: &mut DotGraph) {
        for child in node.children() {
            if self.config.is_hidden(child.name()) || is_disabled(child) {
                continue;
            }
            if child.has_node_children() {
                let mut sub = DotGraph::cluster(child.name());
                sub.set_attr("label", html_bold(child.name()));
                sub.set_attr("color", "black");
                sub.set_attr("style", "filled");
                sub.set_attr("fillcolor", random_fill_color(&mut self.rng));
                self.build_clusters(child, &mut sub);
                graph.add_subgraph(sub);
            } else {
                graph.add_node(child.name());
            }
        }
    }

    /// Connects devices to the address-qualified instances of their
    /// names.
    ///
    /// Every visible node carrying a `device_type` property is an edge
    /// source; for each source the whole tree is searched for visible
    /// node names that contain the source name as a substring. An edge is
    /// drawn when the source name has no `@` and the candidate name has
    /// one, approximating "device class points at instantiated unit".
    /// Self matches never produce an edge.
    pub fn infer_edges(&mut self, tree: &DeviceTree, graph: &mut DotGraph) {
        self.walk_devices(tree.root(), tree.root(), graph);
    }

    fn walk_devices(&mut self, node: &DeviceTreeNode, root: &DeviceTreeNode, graph: &mut DotGraph) {
        for child in node.children() {
            if self.config.is_hidden(child.name()) || is_disabled(child) {
                continue;
            }
            if child.property("device_type").is_some() {
                self.connect(child.name(), root, graph);
            }
            self.walk_devices(child, root, graph);
        }
    }

    fn connect(&mut self, source: &str, node: &DeviceTreeNode, graph: &mut DotGraph) {
        if source.contains('@') {
            // A source with an address qualifier can never satisfy the
            // source-side filter below.
            return;
        }
        for child in node.children() {
            if self.config.is_hidden(child.name()) || is_disabled(child) {
                continue;
            }
            let candidate = child.name();
            if candidate != source
                && candidate.contains(source)
                && candidate.contains('@')
                && self
                    .emitted
                    .insert(edge_key(source, candidate))
            {
                graph.add_edge(
                    DotEdge::new(source, candidate)
                        .attr("overlap", "false")
                        .attr("color", self.config.edge_color.clone()),
                );
            }
            self.connect(source, child, graph);
        }
    }
}

fn is_disabled(node: &DeviceTreeNode) -> bool {
    node.property("status")
        .and_then(PropertyValue::as_str)
        .is_some_and(|status| status == "disabled")
}

fn edge_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}
