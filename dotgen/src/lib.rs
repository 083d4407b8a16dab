/*!
This crate provides a library for building directed graphs in memory and
rendering them through a Graphviz-compatible layout program. Graphs are made
of nodes, edges, subgraphs and their attributes. The graph serializes itself
into the DOT textual language, and the render engine locates a layout program
(`dot`, `neato`, ...) on the search path, writes the DOT text to a temporary
file, and invokes the program to produce the output files.

The crate is a DOT generator only. It does not parse DOT written by others,
and it does not perform any layout itself.

# Graph builder example: create and serialize a graph

```rust
use dotgen::gv::Graph;

let mut graph = Graph::new("G");

// Create the nodes, and save a handle to each node.
let a = graph.add_node("a").id();
let b = graph.add_node("b").id();

// Add an edge between the nodes.
let edge = graph.add_edge(&a, &b).unwrap();
edge.attr("label").set("foo");

assert_eq!(graph.output(), "digraph G { a; b; a -> b [label = foo];}");
```

# Render engine example: produce a png with `dot`

```rust,no_run
use dotgen::engine::RenderEngine;
use dotgen::gv::Graph;

let mut graph = Graph::new("G");
let a = graph.add_node("a").id();
let b = graph.add_node("b").id();
graph.add_edge(&a, &b).unwrap();

let mut engine = RenderEngine::new();
engine.layout("dot");
engine.to_file_path("/tmp/graph.png").unwrap();
engine.render(&graph).unwrap();
```

*/

pub mod engine;
pub mod error;
pub mod gv;

pub use error::Error;
