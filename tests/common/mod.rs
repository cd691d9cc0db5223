// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Test support: a minimal FDT blob encoder, so the loader tests do not
//! depend on binary fixtures.

use std::collections::BTreeMap;

const FDT_MAGIC: u32 = 0xd00d_feed;
const FDT_BEGIN_NODE: u32 = 0x1;
const FDT_END_NODE: u32 = 0x2;
const FDT_PROP: u32 = 0x3;
const FDT_END: u32 = 0x9;
const HEADER_SIZE: usize = 40;

/// A node of the tree to encode.
pub struct TestNode {
    name: String,
    properties: Vec<(String, Vec<u8>)>,
    children: Vec<TestNode>,
}

impl TestNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn prop(mut self, name: &str, value: &[u8]) -> Self {
        self.properties.push((name.to_string(), value.to_vec()));
        self
    }

    pub fn str_prop(self, name: &str, value: &str) -> Self {
        let mut bytes = value.as_bytes().to_vec();
        bytes.push(0);
        self.prop(name, &bytes)
    }

    pub fn child(mut self, child: TestNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Encodes `root` as a version-17 flattened device tree blob.
pub fn to_dtb(root: &TestNode) -> Vec<u8> {
    let mut struct_block = Vec::new();
    let mut strings_block = Vec::new();
    let mut string_map = BTreeMap::new();
    write_node(&mut struct_block, &mut strings_block, &mut string_map, root);
    struct_block.extend_from_slice(&FDT_END.to_be_bytes());

    let memory_reservations = [0u8; 16];
    let off_mem_rsvmap = HEADER_SIZE;
    let off_dt_struct = off_mem_rsvmap + memory_reservations.len();
    let off_dt_strings = off_dt_struct + struct_block.len();
    let totalsize = off_dt_strings + strings_block.len();

    let mut dtb = Vec::with_capacity(totalsize);
    for field in [
        FDT_MAGIC,
        totalsize as u32,
        off_dt_struct as u32,
        off_dt_strings as u32,
        off_mem_rsvmap as u32,
        17, // version
        16, // last_comp_version
        0,  // boot_cpuid_phys
        strings_block.len() as u32,
        struct_block.len() as u32,
    ] {
        dtb.extend_from_slice(&field.to_be_bytes());
    }
    dtb.extend_from_slice(&memory_reservations);
    dtb.extend_from_slice(&struct_block);
    dtb.extend_from_slice(&strings_block);
    dtb
}

fn write_node(
    struct_block: &mut Vec<u8>,
    strings_block: &mut Vec<u8>,
    string_map: &mut BTreeMap<String, u32>,
    node: &TestNode,
) {
    struct_block.extend_from_slice(&FDT_BEGIN_NODE.to_be_bytes());
    struct_block.extend_from_slice(node.name.as_bytes());
    struct_block.push(0);
    align(struct_block);

    for (name, value) in &node.properties {
        let name_offset = if let Some(offset) = string_map.get(name) {
            *offset
        } else {
            let offset = strings_block.len() as u32;
            strings_block.extend_from_slice(name.as_bytes());
            strings_block.push(0);
            string_map.insert(name.clone(), offset);
            offset
        };
        struct_block.extend_from_slice(&FDT_PROP.to_be_bytes());
        struct_block.extend_from_slice(&(value.len() as u32).to_be_bytes());
        struct_block.extend_from_slice(&name_offset.to_be_bytes());
        struct_block.extend_from_slice(value);
        align(struct_block);
    }

    for child in &node.children {
        write_node(struct_block, strings_block, string_map, child);
    }

    struct_block.extend_from_slice(&FDT_END_NODE.to_be_bytes());
}

fn align(vec: &mut Vec<u8>) {
    while !vec.len().is_multiple_of(4) {
        vec.push(0);
    }
}
