//! Builds a small dependency graph and renders it with `dot`, falling back
//! to printing the DOT text when Graphviz is not installed.

use dotgen::engine::RenderEngine;
use dotgen::gv::Graph;

fn main() {
    let mut libs = Graph::new("cluster0");
    libs.attr("label").set("libraries");
    let parser = libs.add_node("parser").id();
    let lexer = libs.add_node("lexer").id();

    let mut graph = Graph::new("deps");
    graph.attr("rankdir").set("LR");
    graph.node_defaults_mut().get("shape").set("box");
    graph.add_sub_graph(libs);

    let cli = graph.add_node("cli").id();
    graph.add_edge(&cli, &parser).unwrap();
    graph.add_edge(&parser, &lexer).unwrap();

    let mut engine = RenderEngine::new();
    engine.to_file_path("/tmp/deps.png").unwrap();
    match engine.render(&graph) {
        Ok(()) => println!("Wrote /tmp/deps.png"),
        Err(err) => {
            println!("Render failed ({}), DOT text follows:", err);
            println!("{}", graph.output());
        }
    }
}
