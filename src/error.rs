// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types for the `dtbgraph` crate.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// An error that can occur while turning a DTB into a rendered graph.
///
/// The variants separate the three failure domains of the pipeline:
/// reading input, making sense of the blob, and driving the Graphviz
/// backend.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The input blob could not be read.
    #[error("failed to read {}: {}", .path.display(), .source)]
    Read {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The blob is not a well-formed flattened device tree.
    #[error("invalid device tree blob: {reason}")]
    Parse {
        /// Diagnostic reported by the FDT parser.
        reason: String,
    },

    /// An output file could not be written.
    #[error("failed to write {}: {}", .path.display(), .source)]
    Write {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The device tree could not be serialized to JSON.
    #[error("failed to serialize device tree to JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The Graphviz `dot` executable could not be spawned or driven.
    #[error("failed to run `dot`: {source} (is Graphviz installed?)")]
    GraphvizSpawn {
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Graphviz ran but reported a failure.
    #[error("`dot` exited with {status}: {stderr}")]
    Graphviz {
        /// Exit status of the `dot` process.
        status: ExitStatus,
        /// Captured standard error output.
        stderr: String,
    },

    /// The rendered file could not be handed to a viewer.
    #[error("failed to open {} in a viewer: {}", .path.display(), .source)]
    Viewer {
        /// Path of the rendered file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
}
