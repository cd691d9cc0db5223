// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! JSON output.
//!
//! A device tree serializes as a nested mapping: node names map to
//! objects, property names map to arrays of scalars. The empty property
//! serializes as an empty array.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::model::{DeviceTree, DeviceTreeNode, PropertyValue};

impl Serialize for DeviceTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root().serialize(serializer)
    }
}

impl Serialize for DeviceTreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in self.properties() {
            map.serialize_entry(name, value)?;
        }
        for child in self.children() {
            map.serialize_entry(child.name(), child)?;
        }
        map.end()
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyValue::Empty => serializer.serialize_seq(Some(0))?.end(),
            PropertyValue::Strings(strings) => strings.serialize(serializer),
            PropertyValue::Cells(cells) => cells.serialize(serializer),
            PropertyValue::Bytes(bytes) => bytes.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::model::{DeviceTree, DeviceTreeNode, PropertyValue};

    #[test]
    fn serializes_as_nested_mapping() {
        let root = DeviceTreeNode::builder("")
            .child(
                DeviceTreeNode::builder("soc")
                    .child(
                        DeviceTreeNode::builder("uart@1c28000")
                            .property("device_type", PropertyValue::string("serial"))
                            .property("reg", PropertyValue::Cells(vec![0x1c28000, 0x400]))
                            .property("dma-coherent", PropertyValue::Empty)
                            .build(),
                    )
                    .build(),
            )
            .build();
        let tree = DeviceTree::new(root);

        let value = serde_json::to_value(&tree).expect("serialization succeeds");
        assert_eq!(
            value,
            json!({
                "soc": {
                    "uart@1c28000": {
                        "device_type": ["serial"],
                        "reg": [0x1c28000, 0x400],
                        "dma-coherent": [],
                    }
                }
            })
        );
    }

    #[test]
    fn properties_come_before_children() {
        let root = DeviceTreeNode::builder("")
            .property("model", PropertyValue::string("test-board"))
            .child(DeviceTreeNode::new("soc"))
            .build();
        let text =
            serde_json::to_string(&DeviceTree::new(root)).expect("serialization succeeds");
        assert_eq!(text, r#"{"model":["test-board"],"soc":{}}"#);
    }
}
