//! Arena-backed DOM fragment.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`], so a
//! host that already has a DOM (or any HTML parser) can build a [`Fragment`]
//! and hand it to the parser without sharing live references.

use indexmap::IndexMap;

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// Comment node (nodeType = 8)
    Comment = 8,
    /// Document fragment node (nodeType = 11)
    DocumentFragment = 11,
}

/// Index of a node inside its [`Fragment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single node of the fragment
#[derive(Debug, Clone)]
pub struct Node {
    pub node_type: NodeType,

    /// Node name (uppercase for elements, e.g. "DIV", "#text" for text nodes)
    pub node_name: String,

    /// Content of text and comment nodes
    pub node_value: Option<String>,

    /// Element attributes with lowercase names, in source order
    pub attributes: IndexMap<String, String>,

    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl Node {
    fn new(node_type: NodeType, node_name: String, node_value: Option<String>) -> Self {
        Self {
            node_type,
            node_name,
            node_value,
            attributes: IndexMap::new(),
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get the tag name (lowercase)
    pub fn tag_name(&self) -> String {
        self.node_name.to_lowercase()
    }

    /// Get an attribute value by name (case-insensitive)
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name.to_lowercase().as_str())
            .map(String::as_str)
    }
}

/// A DOM fragment: a root `#document-fragment` node and its descendants
#[derive(Debug, Clone)]
pub struct Fragment {
    nodes: Vec<Node>,
}

impl Fragment {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(
                NodeType::DocumentFragment,
                "#document-fragment".to_string(),
                None,
            )],
        }
    }

    /// The root fragment node
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes ever allocated, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_child(self.root()).is_none()
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Append an element to `parent`
    pub fn append_element<'a, I>(&mut self, parent: NodeId, tag_name: &str, attrs: I) -> NodeId
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut node = Node::new(NodeType::Element, tag_name.to_uppercase(), None);
        node.attributes = attrs
            .into_iter()
            .map(|(name, value)| (name.to_lowercase(), value.to_string()))
            .collect();
        self.append(parent, node)
    }

    /// Append a text node to `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let node = Node::new(NodeType::Text, "#text".to_string(), Some(text.to_string()));
        self.append(parent, node)
    }

    /// Append a comment node to `parent`
    pub fn append_comment(&mut self, parent: NodeId, comment: &str) -> NodeId {
        let node = Node::new(
            NodeType::Comment,
            "#comment".to_string(),
            Some(comment.to_string()),
        );
        self.append(parent, node)
    }

    fn append(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        let last = self.nodes[parent.0].last_child;
        node.parent = Some(parent);
        node.prev_sibling = last;
        self.nodes.push(node);

        match last {
            Some(last) => self.nodes[last.0].next_sibling = Some(id),
            None => self.nodes[parent.0].first_child = Some(id),
        }
        self.nodes[parent.0].last_child = Some(id);
        id
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].first_child
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].next_sibling
    }

    /// Iterate over the direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            fragment: self,
            next: self.first_child(id),
        }
    }

    /// Iterate over all descendants of a node in document order
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            fragment: self,
            root: id,
            next: self.first_child(id),
        }
    }

    /// Get all text content from this node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        let node = self.get(id);
        match node.node_type {
            NodeType::Text => node.node_value.clone().unwrap_or_default(),
            NodeType::Comment => String::new(),
            _ => self
                .descendants(id)
                .filter(|&d| self.get(d).is_text())
                .filter_map(|d| self.get(d).node_value.as_deref())
                .collect(),
        }
    }

    /// Replace the children of a node with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        while let Some(child) = self.first_child(id) {
            self.detach(child);
        }
        if !text.is_empty() {
            self.append_text(id, text);
        }
    }

    /// Unlink a node from its parent and siblings; it stays in the arena
    pub fn detach(&mut self, id: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[id.0];
            (node.parent, node.prev_sibling, node.next_sibling)
        };

        match prev {
            Some(prev) => self.nodes[prev.0].next_sibling = next,
            None => {
                if let Some(parent) = parent {
                    self.nodes[parent.0].first_child = next;
                }
            }
        }
        match next {
            Some(next) => self.nodes[next.0].prev_sibling = prev,
            None => {
                if let Some(parent) = parent {
                    self.nodes[parent.0].last_child = prev;
                }
            }
        }

        let node = &mut self.nodes[id.0];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    /// Replace a node by a text node at the same position.
    ///
    /// An empty `text` removes the node. Returns the new node, if any.
    pub fn replace_with_text(&mut self, id: NodeId, text: &str) -> Option<NodeId> {
        let parent = self.parent(id)?;
        if text.is_empty() {
            self.detach(id);
            return None;
        }

        let new_id = NodeId(self.nodes.len());
        let (prev, next) = {
            let node = &self.nodes[id.0];
            (node.prev_sibling, node.next_sibling)
        };
        let mut node = Node::new(NodeType::Text, "#text".to_string(), Some(text.to_string()));
        node.parent = Some(parent);
        node.prev_sibling = prev;
        node.next_sibling = next;
        self.nodes.push(node);

        match prev {
            Some(prev) => self.nodes[prev.0].next_sibling = Some(new_id),
            None => self.nodes[parent.0].first_child = Some(new_id),
        }
        match next {
            Some(next) => self.nodes[next.0].prev_sibling = Some(new_id),
            None => self.nodes[parent.0].last_child = Some(new_id),
        }

        let old = &mut self.nodes[id.0];
        old.parent = None;
        old.prev_sibling = None;
        old.next_sibling = None;
        Some(new_id)
    }
}

impl Default for Fragment {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    fragment: &'a Fragment,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.fragment.next_sibling(current);
        Some(current)
    }
}

/// Pre-order iterator over the descendants of a node
pub struct Descendants<'a> {
    fragment: &'a Fragment,
    root: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;

        self.next = self.fragment.first_child(current).or_else(|| {
            let mut node = current;
            loop {
                if node == self.root {
                    return None;
                }
                if let Some(sibling) = self.fragment.next_sibling(node) {
                    return Some(sibling);
                }
                node = self.fragment.parent(node)?;
            }
        });
        Some(current)
    }
}
