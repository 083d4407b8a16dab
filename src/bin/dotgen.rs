//! This is the command line tool that loads edge-list files, builds a
//! graph, and renders the output through a Graphviz layout program.
//!
//! The input format is one edge per line (`from to`), a lone name for an
//! isolated node, and `#` for comments.

use clap::{Arg, ArgAction, Command};
use dotgen::engine::RenderEngine;
use dotgen::gv::Graph;
use std::fs;
use std::process::exit;
use std::time::Duration;

struct CLIOptions {
    layout: String,
    formats: Vec<String>,
    output_path: Option<String>,
    work_dir: String,
    graph_name: String,
    print_only: bool,
    keep_going: bool,
    timeout_secs: Option<u64>,
}

fn build_graph(name: &str, contents: &str) -> Result<Graph, dotgen::Error> {
    let mut graph = Graph::new(name);
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let from = parts.next().unwrap_or_default();
        match parts.next() {
            Some(to) => {
                let from = graph.try_add_node(from).id();
                let to = graph.try_add_node(to).id();
                graph.add_edge(&from, &to)?;
            }
            None => {
                graph.try_add_node(from);
            }
        }
    }
    Ok(graph)
}

fn render(graph: &Graph, options: &CLIOptions) -> Result<(), dotgen::Error> {
    let mut engine = RenderEngine::new();
    engine.layout(&options.layout);
    engine.work_dir(options.work_dir.as_str());
    engine.fail_on_nonzero(!options.keep_going);
    if let Some(secs) = options.timeout_secs {
        engine.timeout(Duration::from_secs(secs));
    }

    if !options.formats.is_empty() {
        for format in &options.formats {
            engine.add_type(format);
        }
        if !options.formats.iter().any(|f| f == "png") {
            engine.remove_type("png")?;
        }
    }
    if let Some(path) = &options.output_path {
        engine.to_file_path(path.as_str())?;
    }

    engine.render(graph)?;
    for ty in engine.types() {
        log::info!("Wrote {}", ty.file_path().display());
    }
    Ok(())
}

fn main() {
    let matches = Command::new("dotgen")
        .version("0.1.0")
        .arg(
            Arg::new("print")
                .short('p')
                .long("print")
                .action(ArgAction::SetTrue)
                .help("Print the DOT text instead of rendering"),
        )
        .arg(
            Arg::new("engine")
                .long("engine")
                .value_name("NAME")
                .default_value("dot")
                .help("Layout program to run (dot, neato, fdp, ...)"),
        )
        .arg(
            Arg::new("format")
                .short('T')
                .long("format")
                .value_name("FORMAT")
                .action(ArgAction::Append)
                .help("Output format, may be repeated"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file (single format only)"),
        )
        .arg(
            Arg::new("workdir")
                .long("workdir")
                .value_name("DIR")
                .default_value(".")
                .help("Working directory for the layout program"),
        )
        .arg(
            Arg::new("keep-going")
                .long("keep-going")
                .action(ArgAction::SetTrue)
                .help("Complete even if the layout program fails"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .help("Kill the layout program after this many seconds"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .value_name("NAME")
                .default_value("G")
                .help("Name of the generated graph"),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .get_matches();

    env_logger::builder().format_timestamp(None).init();

    let timeout_secs = match matches.get_one::<String>("timeout") {
        None => None,
        Some(text) => match text.parse::<u64>() {
            Ok(secs) => Some(secs),
            Err(_) => {
                log::error!("Invalid timeout value \"{}\"", text);
                exit(1);
            }
        },
    };

    let options = CLIOptions {
        layout: matches.get_one::<String>("engine").unwrap().clone(),
        formats: matches
            .get_many::<String>("format")
            .map(|values| values.cloned().collect())
            .unwrap_or_default(),
        output_path: matches.get_one::<String>("output").cloned(),
        work_dir: matches.get_one::<String>("workdir").unwrap().clone(),
        graph_name: matches.get_one::<String>("name").unwrap().clone(),
        print_only: matches.get_flag("print"),
        keep_going: matches.get_flag("keep-going"),
        timeout_secs,
    };

    let input_path = matches.get_one::<String>("INPUT").unwrap();
    let contents = match fs::read_to_string(input_path) {
        Ok(contents) => contents,
        Err(err) => {
            log::error!("Could not read the file {}", input_path);
            log::error!("Error {}", err);
            exit(1);
        }
    };

    let graph = match build_graph(&options.graph_name, &contents) {
        Ok(graph) => graph,
        Err(err) => {
            log::error!("Error {}", err);
            exit(1);
        }
    };

    if options.print_only {
        println!("{}", graph.output());
        return;
    }

    if let Err(err) = render(&graph, &options) {
        log::error!("Error {}", err);
        exit(1);
    }
}
