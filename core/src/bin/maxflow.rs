//! Command-line front-end: solve every graph description in a file.
//!
//! ```text
//! maxflow [--json] [--source N --sink M] [FILE]
//! ```
//!
//! `FILE` defaults to `input.txt`. Without explicit terminals each graph is
//! solved from vertex 0 to its last vertex.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::env;
use std::path::PathBuf;
use std::process;

use env_logger::Env;
use log::debug;

use maxflow_core::io::read_descriptions;
use maxflow_core::{solve_all, Algorithm, MaxFlowSolver, Terminals};

#[derive(Debug)]
struct Options {
    path: PathBuf,
    json: bool,
    terminals: Terminals,
}

fn parse_vertex(flag: &str, value: Option<String>) -> Result<usize, String> {
    let value = value.ok_or_else(|| format!("{} requires a vertex index", flag))?;
    value
        .parse()
        .map_err(|_| format!("{} expects a vertex index, got `{}`", flag, value))
}

fn parse_options<I: Iterator<Item = String>>(mut args: I) -> Result<Options, String> {
    let mut path = None;
    let mut json = false;
    let mut source = None;
    let mut sink = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--source" => source = Some(parse_vertex("--source", args.next())?),
            "--sink" => sink = Some(parse_vertex("--sink", args.next())?),
            flag if flag.starts_with("--") => return Err(format!("unknown option `{}`", flag)),
            _ if path.is_none() => path = Some(PathBuf::from(&arg)),
            _ => return Err(format!("unexpected argument `{}`", arg)),
        }
    }

    let terminals = match (source, sink) {
        (None, None) => Terminals::FirstLast,
        (Some(source), Some(sink)) => Terminals::Explicit { source, sink },
        _ => return Err("--source and --sink must be given together".to_string()),
    };

    Ok(Options {
        path: path.unwrap_or_else(|| PathBuf::from("input.txt")),
        json,
        terminals,
    })
}

fn run(options: Options) -> Result<(), String> {
    let descriptions = read_descriptions(&options.path)
        .map_err(|e| format!("{}: {}", options.path.display(), e))?;

    let solver = MaxFlowSolver::new();
    debug!("solving {} graphs with {}", descriptions.len(), solver.name());
    let reports = solve_all(&solver, &descriptions, options.terminals);

    if options.json {
        let json = serde_json::to_string_pretty(&reports).map_err(|e| e.to_string())?;
        println!("{}", json);
        return Ok(());
    }

    for report in &reports {
        println!(
            "Graph with {} vertices and {} edges:",
            report.vertex_count, report.edge_count
        );
        match &report.outcome {
            Ok(result) => println!("Maximum flow: {}", result.max_flow),
            Err(reason) => println!("Error: {}", reason),
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let result = parse_options(env::args().skip(1)).and_then(run);
    if let Err(message) = result {
        eprintln!("Error: {}", message);
        process::exit(1);
    }
}
