// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Graphviz backend.
//!
//! Layout and rasterization are delegated to the `dot` executable: the
//! DOT source is piped through stdin and the produced bytes are written
//! to the output file.

use core::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use clap::ValueEnum;
use log::{debug, warn};

use crate::error::Error;

/// Output format of the rendered graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Portable Document Format.
    Pdf,
    /// Portable Network Graphics.
    Png,
    /// Scalable Vector Graphics.
    Svg,
    /// DOT source only; no Graphviz invocation.
    Dot,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Dot => "gv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Dot => "dot",
        };
        write!(f, "{name}")
    }
}

/// Renders DOT source to `out_path` via `dot -T<format>`.
///
/// # Errors
///
/// Returns [`Error::GraphvizSpawn`] if the `dot` process cannot be
/// started or driven, [`Error::Graphviz`] if it exits with a failure,
/// and [`Error::Write`] if the result cannot be written.
pub fn render(dot_source: &str, out_path: &Path, format: OutputFormat) -> crate::Result<()> {
    let mut child = Command::new("dot")
        .arg(format!("-T{format}"))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| Error::GraphvizSpawn { source })?;

    // Dropping the handle after the write closes the pipe, which is what
    // lets `dot` finish.
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(dot_source.as_bytes())
        .map_err(|source| Error::GraphvizSpawn { source })?;

    let output = child
        .wait_with_output()
        .map_err(|source| Error::GraphvizSpawn { source })?;
    if !output.status.success() {
        return Err(Error::Graphviz {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    fs::write(out_path, &output.stdout).map_err(|source| Error::Write {
        path: out_path.to_path_buf(),
        source,
    })?;
    debug!(
        "rendered {} bytes of {format} to {}",
        output.stdout.len(),
        out_path.display()
    );
    Ok(())
}

/// Opens a rendered file in the system viewer.
///
/// The viewer is expected to detach, so only spawn failures are treated
/// as errors; a non-zero exit is logged and ignored.
///
/// # Errors
///
/// Returns [`Error::Viewer`] if the viewer process cannot be started.
pub fn open_in_viewer(path: &Path) -> crate::Result<()> {
    let status = Command::new("xdg-open")
        .arg(path)
        .status()
        .map_err(|source| Error::Viewer {
            path: path.to_path_buf(),
            source,
        })?;
    if !status.success() {
        warn!("viewer exited with {status} for {}", path.display());
    }
    Ok(())
}
