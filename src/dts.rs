// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Device-tree source output.
//!
//! [`DeviceTree`] implements [`Display`] in DTS syntax, which is what the
//! tool writes next to the JSON dump so the graph can be compared against
//! a readable form of the input.

use core::fmt::{self, Display};

use crate::model::{DeviceTree, DeviceTreeNode, PropertyValue};

impl Display for DeviceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "/dts-v1/;")?;
        writeln!(f)?;
        fmt_node(self.root(), f, 0)
    }
}

fn fmt_node(node: &DeviceTreeNode, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
    let name = node.name();
    if name.is_empty() || name == "/" {
        writeln!(f, "{:indent$}/ {{", "", indent = indent)?;
    } else {
        writeln!(f, "{:indent$}{} {{", "", name, indent = indent)?;
    }

    for (name, value) in node.properties() {
        fmt_property(name, value, f, indent + 4)?;
    }

    for child in node.children() {
        writeln!(f)?;
        fmt_node(child, f, indent + 4)?;
    }

    writeln!(f, "{:indent$}}};", "", indent = indent)
}

fn fmt_property(
    name: &str,
    value: &PropertyValue,
    f: &mut fmt::Formatter<'_>,
    indent: usize,
) -> fmt::Result {
    write!(f, "{:indent$}{}", "", name, indent = indent)?;

    match value {
        PropertyValue::Empty => writeln!(f, ";"),
        PropertyValue::Strings(strings) => {
            let mut strings = strings.iter();
            if let Some(first) = strings.next() {
                write!(f, " = \"{first}\"")?;
                for s in strings {
                    write!(f, ", \"{s}\"")?;
                }
            }
            writeln!(f, ";")
        }
        PropertyValue::Cells(cells) => {
            write!(f, " = <")?;
            for (i, cell) in cells.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "0x{cell:02x}")?;
            }
            writeln!(f, ">;")
        }
        PropertyValue::Bytes(bytes) => {
            write!(f, " = [")?;
            for (i, byte) in bytes.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{byte:02x}")?;
            }
            writeln!(f, "];")
        }
    }
}
