// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use dtbgraph::Error;
use dtbgraph::dot::{self, DotGraph};
use dtbgraph::load;
use dtbgraph::model::DeviceTree;
use dtbgraph::render::{self, OutputFormat};
use dtbgraph::viz::{GraphBuilder, VizConfig};

#[derive(Parser)]
#[command(version, about = "Render a device tree blob as a Graphviz cluster graph")]
struct Cli {
    /// Input device tree blob.
    dtb: PathBuf,

    /// Directory for the generated .dts/.json/.gv and rendered files.
    #[arg(short, long, default_value = "out")]
    out_dir: PathBuf,

    /// Output image format; `dot` stops after writing the graph source.
    #[arg(short, long, default_value_t = OutputFormat::Pdf)]
    format: OutputFormat,

    /// Open the rendered file in the system viewer when done.
    #[arg(long)]
    open: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> dtbgraph::Result<()> {
    info!("parsing {}", cli.dtb.display());
    let tree = load::load_dtb(&cli.dtb)?;
    let stem = cli.dtb.file_stem().and_then(OsStr::to_str).unwrap_or("dtb");

    fs::create_dir_all(&cli.out_dir).map_err(|source| Error::Write {
        path: cli.out_dir.clone(),
        source,
    })?;

    write_output(&cli.out_dir.join(format!("{stem}.dts")), &tree.to_string())?;
    let json = serde_json::to_string_pretty(&tree)?;
    write_output(&cli.out_dir.join(format!("{stem}.json")), &json)?;

    let graph = build_graph(&tree, stem);
    let gv_path = cli.out_dir.join(format!("{stem}.gv"));
    write_output(&gv_path, &graph.to_string())?;

    if cli.format == OutputFormat::Dot {
        if cli.open {
            render::open_in_viewer(&gv_path)?;
        }
        return Ok(());
    }

    let rendered = cli.out_dir.join(format!("{stem}.{}", cli.format.extension()));
    render::render(&graph.to_string(), &rendered, cli.format)?;
    info!("rendered {}", rendered.display());
    if cli.open {
        render::open_in_viewer(&rendered)?;
    }
    Ok(())
}

fn build_graph(tree: &DeviceTree, stem: &str) -> DotGraph {
    let mut graph = DotGraph::new(format!("{stem}_dtb"));
    graph.set_attr("label", dot::html_bold("dtb block design"));
    graph.set_attr("compound", "true");
    graph.set_attr("rankdir", "TB");
    graph.set_attr("splines", "ortho");
    graph.set_attr("nodesep", "1");
    graph.set_attr("overlap", "false");
    graph.set_node_attr("shape", "record");

    let config = VizConfig::default();
    let mut builder = GraphBuilder::new(&config);
    builder.build_clusters(tree.root(), &mut graph);
    builder.infer_edges(tree, &mut graph);
    graph
}

fn write_output(path: &Path, contents: &str) -> dtbgraph::Result<()> {
    fs::write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("wrote {}", path.display());
    Ok(())
}
