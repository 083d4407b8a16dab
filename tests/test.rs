#[cfg(test)]
mod tests {

    use dotgen::engine::RenderEngine;
    use dotgen::gv::Graph;
    use dotgen::Error;

    fn family_graph() -> Graph {
        let mut graph = Graph::new("family");
        graph.attr("rankdir").set("TB");
        graph.node_defaults_mut().get("shape").set("box");

        let parent = graph.add_node("parent").id();
        let child_a = graph.add_node("a").id();
        let child_b = graph.add_node("b").id();
        graph.add_edge(&parent, &child_a).unwrap();
        graph.add_edge(&parent, &child_b).unwrap();
        graph.add_undirected_edge(&child_a, &child_b).unwrap();
        graph
    }

    #[test]
    fn empty_graph() {
        let graph = Graph::new("G");
        assert_eq!(graph.output(), "digraph G {}");
    }

    #[test]
    fn single_node() {
        let mut graph = Graph::new("G");
        graph.add_node("n");
        assert_eq!(graph.output(), "digraph G { n;}");
    }

    #[test]
    fn full_graph_output() {
        let graph = family_graph();
        assert_eq!(
            graph.output(),
            "digraph family { graph [rankdir = TB]; node [shape = box]; \
             parent; a; b; parent -> a; parent -> b; a -> b [dir = none];}"
        );
    }

    #[test]
    fn node_and_edge_attributes() {
        let mut graph = Graph::new("G");
        let a = graph.add_node("a").id();
        let b = graph.add_node("b").id();
        graph.node_mut(&a).unwrap().attr("label").set("start here");
        let edge = graph.add_edge(&a, &b).unwrap();
        edge.attr("weight").set(2);
        edge.attr("color").set("red");

        assert_eq!(
            graph.output(),
            "digraph G { a [label = \"start here\"]; b; \
             a -> b [weight = 2, color = red];}"
        );
    }

    #[test]
    fn nested_subgraphs() {
        let mut inner = Graph::new("cluster1");
        let deep = inner.add_node("deep").id();

        let mut middle = Graph::new("cluster0");
        middle.add_node("mid");
        middle.add_sub_graph(inner);

        let mut graph = Graph::new("G");
        let top = graph.add_node("top").id();
        graph.add_sub_graph(middle);

        // The endpoint is two levels down.
        graph.add_edge(&top, &deep).unwrap();
        assert_eq!(
            graph.output(),
            "digraph G {subgraph cluster0 {subgraph cluster1 { deep;} mid;} \
             top; top -> deep;}"
        );
    }

    #[test]
    fn anonymous_subgraph() {
        let mut graph = Graph::new("G");
        let mut inner = Graph::new("");
        inner.add_node("a");
        graph.add_sub_graph(inner);
        assert_eq!(graph.output(), "digraph G {subgraph  { a;}}");
    }

    #[test]
    fn duplicate_names_get_fresh_ids() {
        let mut graph = Graph::new("G");
        let first = graph.add_node("x").id();
        let second = graph.add_node("x").id();
        assert_ne!(first, second);
        assert_eq!(second.as_str(), "x0");
        assert_eq!(graph.output(), "digraph G { x; x0 [label = x];}");
    }

    #[test]
    fn unknown_endpoint_is_rejected() {
        let mut graph = Graph::new("G");
        let a = graph.add_node("a").id();
        let mut other = Graph::new("H");
        let z = other.add_node("z").id();

        let err = graph.add_edge(&a, &z).unwrap_err();
        assert!(matches!(err, Error::NodeNotFound(_)));
    }

    #[test]
    fn output_is_repeatable() {
        let graph = family_graph();
        assert_eq!(graph.output(), graph.output());
    }

    #[test]
    fn output_registry_rules() {
        let mut engine = RenderEngine::new();
        engine.add_type("svg");

        let err = engine.to_file_path("out.svg").unwrap_err();
        assert!(matches!(err, Error::AmbiguousOutputType));

        engine.remove_type("png").unwrap();
        engine.to_file_path("out.svg").unwrap();
        assert_eq!(engine.types().len(), 1);

        let err = engine.remove_type("svg").unwrap_err();
        assert!(matches!(err, Error::NoOutputType));
    }

    #[cfg(unix)]
    #[test]
    fn render_through_a_real_process() {
        let dir = tempfile::tempdir().unwrap();
        let graph = family_graph();

        // `true` stands in for a layout program that accepts anything.
        let mut engine = RenderEngine::new();
        engine.layout("true");
        engine.work_dir(dir.path());
        engine.to_file_path(dir.path().join("family.png")).unwrap();
        engine.render(&graph).unwrap();

        // And `false` for one that always fails.
        let mut engine = RenderEngine::new();
        engine.layout("false");
        let err = engine.render(&graph).unwrap_err();
        assert!(matches!(err, Error::RenderFailed { .. }));
    }
}
