//! The graph object model: nodes, edges, nested subgraphs, and the DOT
//! serialization algorithm.

use super::attr::{Attr, Attrs};
use std::collections::HashMap;

/// A cheap clonable handle that identifies a node by its emitted DOT id.
/// Handles stay valid when the subgraph that owns the node is attached to
/// another graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A graph node. The display name and the emitted id are fixed at creation;
/// only the attribute store mutates.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    id: String,
    attrs: Attrs,
}

impl Node {
    fn new(name: &str, id: &str) -> Self {
        Self {
            name: name.to_string(),
            id: id.to_string(),
            attrs: Attrs::new(),
        }
    }

    /// \return the human display name of the node.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// \return a handle to the node.
    pub fn id(&self) -> NodeId {
        NodeId(self.id.clone())
    }

    /// \return the attribute named \p name, creating it if needed.
    pub fn attr(&mut self, name: &str) -> &mut Attr {
        self.attrs.get(name)
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attrs {
        &mut self.attrs
    }

    /// \return the DOT node statement.
    pub fn output(&self) -> String {
        if self.attrs.is_empty() {
            format!("{};", self.id)
        } else {
            format!("{} [{}];", self.id, self.attrs.to_gv())
        }
    }
}

/// A directed edge between two nodes. An undirected edge is a directed edge
/// whose `dir` attribute is forced to `none`.
#[derive(Debug, Clone)]
pub struct Edge {
    from: NodeId,
    to: NodeId,
    attrs: Attrs,
}

impl Edge {
    fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            attrs: Attrs::new(),
        }
    }

    pub fn from(&self) -> &NodeId {
        &self.from
    }

    pub fn to(&self) -> &NodeId {
        &self.to
    }

    /// \return the attribute named \p name, creating it if needed.
    pub fn attr(&mut self, name: &str) -> &mut Attr {
        self.attrs.get(name)
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attrs {
        &mut self.attrs
    }

    /// \return the DOT edge statement.
    pub fn output(&self) -> String {
        if self.attrs.is_empty() {
            format!("{} -> {};", self.from, self.to)
        } else {
            format!("{} -> {} [{}];", self.from, self.to, self.attrs.to_gv())
        }
    }
}

/// A graph container. The same structure serves as the root digraph and as
/// a nested subgraph; the serialization keyword is decided by the nesting
/// position, just like in the DOT grammar.
///
/// Nodes are stored in insertion order next to an id index, so the emitted
/// text is deterministic and `output()` can be repeated at will. There is no
/// removal API: this is a build-once, render-many model.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    name: String,
    attrs: Attrs,
    // Attribute templates applied to all nodes/edges of this container
    // unless overridden per element. Plain stores, never part of the real
    // node and edge collections.
    node_defaults: Attrs,
    edge_defaults: Attrs,
    // Counter used to disambiguate repeated display names.
    id_count: usize,
    nodes: Vec<Node>,
    // Maps emitted ids to positions in `nodes`.
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    sub_graphs: Vec<Graph>,
}

impl Graph {
    /// Create a graph with \p name. Subgraphs may use an empty name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// \return the graph name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// \return the graph-level attribute named \p name, creating it if
    /// needed.
    pub fn attr(&mut self, name: &str) -> &mut Attr {
        self.attrs.get(name)
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attrs {
        &mut self.attrs
    }

    /// \return the attribute template applied to all nodes (the DOT
    /// `node [...]` statement).
    pub fn node_defaults_mut(&mut self) -> &mut Attrs {
        &mut self.node_defaults
    }

    /// \return the attribute template applied to all edges (the DOT
    /// `edge [...]` statement).
    pub fn edge_defaults_mut(&mut self) -> &mut Attrs {
        &mut self.edge_defaults
    }

    /// Add a node with the display name \p name. The first node with a given
    /// name keeps the name as its id; later nodes with the same name get a
    /// fresh id made of the name and the container counter, and keep the
    /// display name as their `label` attribute.
    pub fn add_node(&mut self, name: &str) -> &mut Node {
        let mut id = name.to_string();
        while self.index.contains_key(&id) {
            id = format!("{}{}", name, self.id_count);
            self.id_count += 1;
        }
        let mut node = Node::new(name, &id);
        if id != name {
            node.attr("label").set(name);
        }
        self.index.insert(id, self.nodes.len());
        self.nodes.push(node);
        self.nodes.last_mut().unwrap()
    }

    /// The idempotent variant of `add_node`: \return the existing node whose
    /// id equals \p name, if there is one.
    pub fn try_add_node(&mut self, name: &str) -> &mut Node {
        let existing = self.index.get(name).copied();
        match existing {
            Some(idx) => &mut self.nodes[idx],
            None => self.add_node(name),
        }
    }

    /// Add a directed edge. Both endpoints must already live in this graph
    /// or in one of its subgraphs.
    pub fn add_edge(
        &mut self,
        from: &NodeId,
        to: &NodeId,
    ) -> Result<&mut Edge, crate::Error> {
        if !self.contains_node(from) {
            return Err(crate::Error::NodeNotFound(from.as_str().to_string()));
        }
        if !self.contains_node(to) {
            return Err(crate::Error::NodeNotFound(to.as_str().to_string()));
        }
        self.edges.push(Edge::new(from.clone(), to.clone()));
        Ok(self.edges.last_mut().unwrap())
    }

    /// Add an edge with the `dir` attribute forced to `none`, which Graphviz
    /// draws without an arrow head.
    pub fn add_undirected_edge(
        &mut self,
        from: &NodeId,
        to: &NodeId,
    ) -> Result<&mut Edge, crate::Error> {
        let edge = self.add_edge(from, to)?;
        edge.attr("dir").set("none");
        Ok(edge)
    }

    /// \return true if the node lives in this graph or, depth-first, in any
    /// of its subgraphs.
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.index.contains_key(id.as_str())
            || self.sub_graphs.iter().any(|g| g.contains_node(id))
    }

    /// Look the node up in this graph and, recursively, in its subgraphs.
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        let own = self.index.get(id.as_str()).copied();
        match own {
            Some(idx) => Some(&mut self.nodes[idx]),
            None => self.sub_graphs.iter_mut().find_map(|g| g.node_mut(id)),
        }
    }

    /// Attach \p graph as a subgraph. Subgraphs form a tree by construction;
    /// there is no cycle detection.
    pub fn add_sub_graph(&mut self, graph: Graph) {
        self.sub_graphs.push(graph);
    }

    /// \return the nodes of this container, in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// \return the edges of this container, in insertion order. Duplicate
    /// edges are kept.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn sub_graphs(&self) -> &[Graph] {
        &self.sub_graphs
    }

    /// Serialize the graph into a DOT program. This is a pure read and can
    /// be called any number of times.
    pub fn output(&self) -> String {
        self.to_dot("digraph")
    }

    fn to_dot(&self, keyword: &str) -> String {
        let mut body = String::new();

        // Mount the graph, node and edge default attribute statements.
        if !self.attrs.is_empty() {
            body.push_str(&format!(" graph [{}];", self.attrs.to_gv()));
        }
        if !self.node_defaults.is_empty() {
            body.push_str(&format!(" node [{}];", self.node_defaults.to_gv()));
        }
        if !self.edge_defaults.is_empty() {
            body.push_str(&format!(" edge [{}];", self.edge_defaults.to_gv()));
        }

        // Mount the subgraph blocks.
        for graph in &self.sub_graphs {
            body.push_str(&graph.to_dot("subgraph"));
        }

        // Mount the node and edge statements.
        for node in &self.nodes {
            body.push(' ');
            body.push_str(&node.output());
        }
        for edge in &self.edges {
            body.push(' ');
            body.push_str(&edge.output());
        }

        format!("{} {} {{{}}}", keyword, self.name, body)
    }
}
