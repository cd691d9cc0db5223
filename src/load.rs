// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! DTB input handling.
//!
//! Binary parsing is delegated to the `flat_device_tree` crate; this
//! module only converts its zero-copy view into the owned
//! [`DeviceTree`](crate::model::DeviceTree) the rest of the pipeline
//! walks.

use std::fs;
use std::path::Path;

use flat_device_tree::Fdt;
use flat_device_tree::node::FdtNode;
use log::debug;

use crate::error::Error;
use crate::model::{DeviceTree, DeviceTreeNode, PropertyValue};

/// Reads and parses a device tree blob from a file.
///
/// # Errors
///
/// Returns [`Error::Read`] if the file cannot be read and
/// [`Error::Parse`] if it is not a well-formed FDT blob.
pub fn load_dtb(path: &Path) -> crate::Result<DeviceTree> {
    let data = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes from {}", data.len(), path.display());
    parse_dtb(&data)
}

/// Parses a device tree blob held in memory.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the blob is not a well-formed FDT.
pub fn parse_dtb(data: &[u8]) -> crate::Result<DeviceTree> {
    let fdt = Fdt::new(data).map_err(|e| Error::Parse {
        reason: e.to_string(),
    })?;
    let root = fdt.find_node("/").ok_or_else(|| Error::Parse {
        reason: "missing root node".to_string(),
    })?;
    Ok(DeviceTree::new(convert_node(&root)))
}

fn convert_node(node: &FdtNode<'_, '_>) -> DeviceTreeNode {
    let mut out = DeviceTreeNode::new(node.name);
    for property in node.properties() {
        out.add_property(property.name, PropertyValue::from_bytes(property.value));
    }
    for child in node.children() {
        out.add_child(convert_node(&child));
    }
    out
}
