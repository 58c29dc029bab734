//! Element tree and incremental style resolution.
//!
//! A [`Document`] owns its elements in an arena addressed by [`NodeId`].
//! Every element carries its raw `style` attribute and presentation
//! attributes, the stylesheet rules an external matcher found for it, and
//! its resolved [`Style`], shared through the document's [`StylePool`].
//!
//! Resolution is incremental: [`Document::resolve_all`] only recomputes
//! elements whose state is not [`ResolveState::Resolved`], parents before
//! children. Changing an attribute or the matched rules of an element marks
//! it and its subtree unresolved.

mod resolve;
mod xml;

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::CascadeConfig;
use crate::error::{Error, Result};
use crate::style::{DeclarationBlock, PaintServer, Style, StylePool};

pub use resolve::{Alignment, AlignmentSource};

/// Unique identifier for an element within a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root element (always 0).
    pub const ROOT: NodeId = NodeId(0);
}

/// Where an element is in the resolution cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolveState {
    #[default]
    Unresolved,
    Cascading,
    Resolved,
}

/// One element.
#[derive(Debug, Clone)]
pub struct Node {
    /// Tag name without namespace prefix.
    pub tag: String,
    /// Attributes in document order.
    attributes: Vec<(String, String)>,
    /// Parent element (None for the root).
    pub parent: Option<NodeId>,
    /// Child elements in document order.
    pub children: Vec<NodeId>,
    /// Matched stylesheet blocks, lowest priority first.
    matched: Vec<DeclarationBlock>,
    state: ResolveState,
    style: Arc<Style>,
}

impl Node {
    fn new(tag: impl Into<String>, attributes: Vec<(String, String)>, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.into(),
            attributes,
            parent,
            children: Vec::new(),
            matched: Vec::new(),
            state: ResolveState::Unresolved,
            style: Arc::new(Style::new()),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn matched_rules(&self) -> &[DeclarationBlock] {
        &self.matched
    }

    pub fn state(&self) -> ResolveState {
        self.state
    }

    /// The resolved style. Only meaningful once the node is resolved.
    pub fn style(&self) -> &Arc<Style> {
        &self.style
    }
}

/// An element tree with paint servers and resolved styles.
pub struct Document {
    /// All elements (index 0 is always the root).
    nodes: Vec<Node>,
    /// Paint servers by element id.
    servers: HashMap<String, Arc<PaintServer>>,
    /// Elements that registered a server, by server id.
    server_owners: HashMap<String, NodeId>,
    /// Resolved styles, interned.
    pub styles: StylePool,
    config: CascadeConfig,
}

impl Document {
    /// Create a document with a single root element.
    pub fn new(root_tag: &str) -> Self {
        Self::with_config(root_tag, CascadeConfig::default())
    }

    pub fn with_config(root_tag: &str, config: CascadeConfig) -> Self {
        Self {
            nodes: vec![Node::new(root_tag, Vec::new(), None)],
            servers: HashMap::new(),
            server_owners: HashMap::new(),
            styles: StylePool::new(),
            config,
        }
    }

    pub fn config(&self) -> &CascadeConfig {
        &self.config
    }

    /// Replace the configuration; every element is resolved again.
    pub fn set_config(&mut self, config: CascadeConfig) {
        self.config = config;
        self.invalidate_all();
    }

    /// Get the root element id.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get an element by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.0 as usize)
            .ok_or(Error::InvalidNode(id.0 as usize))
    }

    /// Get the number of elements.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Element ids in document order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| NodeId(i as u32))
    }

    /// Depth-first, parents before children.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.node(current) else {
                continue;
            };
            order.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    /// Append an element under `parent`.
    ///
    /// Paint server elements with an `id` are registered as they are added.
    pub fn append_child(
        &mut self,
        parent: NodeId,
        tag: &str,
        attributes: Vec<(String, String)>,
    ) -> Result<NodeId> {
        let id = NodeId(self.nodes.len() as u32);
        self.node_mut(parent)?.children.push(id);
        self.nodes.push(Node::new(tag, attributes, Some(parent)));
        self.register_if_paint_server(id);
        Ok(id)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?.attribute(name)
    }

    /// Set an attribute and mark the element's subtree unresolved.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        let node = self.node_mut(id)?;
        let previous = match node.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => Some(std::mem::replace(v, value.to_string())),
            None => {
                node.attributes.push((name.to_string(), value.to_string()));
                None
            }
        };
        if name == "id"
            && let Some(previous) = previous
            && previous != value
        {
            self.release_paint_server(&previous, id);
        }
        self.register_if_paint_server(id);
        self.invalidate(id);
        Ok(())
    }

    /// Attach the stylesheet blocks matched for an element, lowest
    /// priority first.
    pub fn set_matched_rules(&mut self, id: NodeId, rules: Vec<DeclarationBlock>) -> Result<()> {
        self.node_mut(id)?.matched = rules;
        self.invalidate(id);
        Ok(())
    }

    /// Mark an element and its subtree unresolved.
    pub fn invalidate(&mut self, id: NodeId) {
        for node in self.descendants(id) {
            self.nodes[node.0 as usize].state = ResolveState::Unresolved;
        }
    }

    fn invalidate_all(&mut self) {
        for node in &mut self.nodes {
            node.state = ResolveState::Unresolved;
        }
    }

    /// The resolved style of an element.
    pub fn style(&self, id: NodeId) -> Option<&Arc<Style>> {
        self.node(id).map(Node::style)
    }

    pub fn state(&self, id: NodeId) -> Option<ResolveState> {
        self.node(id).map(Node::state)
    }

    /// Register a paint server, replacing any with the same id. Every
    /// element is resolved again so references bind to the new server.
    pub fn register_paint_server(&mut self, server: PaintServer) -> Arc<PaintServer> {
        let server = Arc::new(server);
        self.server_owners.remove(&server.id);
        self.servers.insert(server.id.clone(), Arc::clone(&server));
        self.invalidate_all();
        server
    }

    pub fn paint_server(&self, id: &str) -> Option<&Arc<PaintServer>> {
        self.servers.get(id)
    }

    /// Drop the server `owner` registered under `server_id`, if it still
    /// holds that id.
    fn release_paint_server(&mut self, server_id: &str, owner: NodeId) {
        if self.server_owners.get(server_id) == Some(&owner) {
            self.server_owners.remove(server_id);
            self.servers.remove(server_id);
            tracing::trace!(id = server_id, "released paint server");
            self.invalidate_all();
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("servers", &self.servers.len())
            .field("styles", &self.styles)
            .finish()
    }
}
