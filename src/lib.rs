// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A library for rendering Flattened Device Tree (FDT) blobs as Graphviz
//! cluster graphs.
//!
//! The pipeline is a single sequential pass:
//!
//! 1. [`load`] reads a `.dtb` file, parses it with the `flat_device_tree`
//!    crate, and converts the zero-copy view into an owned
//!    [`DeviceTree`](model::DeviceTree).
//! 2. [`model`] also knows how to dump itself as device-tree source text
//!    ([`dts`]) and as a nested JSON mapping ([`json`]).
//! 3. [`viz`] walks the tree twice: once to build nested clusters and
//!    record nodes, once to infer edges between devices and the
//!    address-qualified instances of their names.
//! 4. [`dot`] accumulates the graph description and prints it in DOT
//!    syntax; [`render`] pipes that through the Graphviz `dot` executable.
//!
//! # Examples
//!
//! ```
//! use dtbgraph::dot::DotGraph;
//! use dtbgraph::model::{DeviceTree, DeviceTreeNode, PropertyValue};
//! use dtbgraph::viz::{GraphBuilder, VizConfig};
//!
//! let root = DeviceTreeNode::builder("")
//!     .child(
//!         DeviceTreeNode::builder("soc")
//!             .child(
//!                 DeviceTreeNode::builder("uart@1c28000")
//!                     .property("device_type", PropertyValue::string("serial"))
//!                     .build(),
//!             )
//!             .build(),
//!     )
//!     .build();
//! let tree = DeviceTree::new(root);
//!
//! let config = VizConfig::default();
//! let mut graph = DotGraph::new("example");
//! let mut builder = GraphBuilder::new(&config);
//! builder.build_clusters(tree.root(), &mut graph);
//! builder.infer_edges(&tree, &mut graph);
//!
//! assert!(graph.to_string().contains("subgraph \"cluster_soc\""));
//! ```

#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub mod dot;
pub mod dts;
pub mod error;
pub mod json;
pub mod load;
pub mod model;
pub mod render;
pub mod viz;

pub use error::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
