// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod common;

use common::TestNode;
use dtbgraph::error::Error;
use dtbgraph::load::parse_dtb;
use dtbgraph::model::PropertyValue;

#[test]
fn parses_an_encoded_blob_into_the_model() {
    let root = TestNode::new("")
        .str_prop("model", "test-board")
        .child(
            TestNode::new("soc").child(
                TestNode::new("uart@1c28000")
                    .str_prop("compatible", "test-uart")
                    .str_prop("status", "okay")
                    .prop(
                        "reg",
                        &[0x1c28000u32, 0x400]
                            .iter()
                            .flat_map(|cell| cell.to_be_bytes())
                            .collect::<Vec<u8>>(),
                    )
                    .prop("dma-coherent", &[]),
            ),
        )
        .child(TestNode::new("chosen").str_prop("bootargs", "console=ttyS0"));
    let tree = parse_dtb(&common::to_dtb(&root)).expect("blob parses");

    assert_eq!(
        tree.root()
            .property("model")
            .and_then(PropertyValue::as_str),
        Some("test-board")
    );

    let uart = tree
        .find_node("/soc/uart@1c28000")
        .expect("uart node exists");
    assert_eq!(
        uart.property("compatible").and_then(PropertyValue::as_str),
        Some("test-uart")
    );
    assert_eq!(
        uart.property("reg"),
        Some(&PropertyValue::Cells(vec![0x1c28000, 0x400]))
    );
    assert_eq!(uart.property("dma-coherent"), Some(&PropertyValue::Empty));
    assert!(!uart.has_node_children());

    // The hidden list is a rendering concern; the model keeps everything.
    assert!(tree.find_node("/chosen").is_some());
}

#[test]
fn rejects_a_blob_with_a_bad_magic_number() {
    let mut dtb = common::to_dtb(&TestNode::new(""));
    dtb[0] = 0x00;
    assert!(matches!(parse_dtb(&dtb), Err(Error::Parse { .. })));
}

#[test]
fn preserves_sibling_order_from_the_blob() {
    let root = TestNode::new("")
        .child(TestNode::new("zulu"))
        .child(TestNode::new("alpha"))
        .child(TestNode::new("mike"));
    let tree = parse_dtb(&common::to_dtb(&root)).expect("blob parses");

    let names: Vec<&str> = tree.root().children().map(|n| n.name()).collect();
    assert_eq!(names, ["zulu", "alpha", "mike"]);
}
