//! Document access used by the page behaviours.
//!
//! The behaviours never touch a browser API directly. They go through [`Dom`],
//! which the wasm crate implements over `web_sys` and which [`Tree`]
//! implements in memory so the same code can run in tests.

use crate::error::{RankError, Result};

pub trait Dom {
    type Element: Clone + PartialEq;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// Elements carrying `class` in document order. With a scope, only its
    /// descendants are searched (the scope itself is not a candidate).
    fn query_class(
        &self,
        scope: Option<&Self::Element>,
        class: &str,
    ) -> Result<Vec<Self::Element>>;

    /// Element id, `None` when missing or empty.
    fn id(&self, el: &Self::Element) -> Option<String>;

    fn value(&self, el: &Self::Element) -> String;

    fn set_value(&mut self, el: &Self::Element, value: &str) -> Result<()>;

    fn classes(&self, el: &Self::Element) -> Vec<String>;

    fn has_class(&self, el: &Self::Element, class: &str) -> bool {
        self.classes(el).iter().any(|c| c == class)
    }

    fn add_class(&mut self, el: &Self::Element, class: &str) -> Result<()>;

    fn remove_class(&mut self, el: &Self::Element, class: &str) -> Result<()>;

    /// Every `<input>` below `el`, in document order.
    fn inputs(&self, el: &Self::Element) -> Result<Vec<Self::Element>>;

    /// First `<input>` below `el`.
    fn first_input(&self, el: &Self::Element) -> Option<Self::Element> {
        self.inputs(el).ok()?.into_iter().next()
    }

    fn clear_children(&mut self, el: &Self::Element) -> Result<()>;

    /// Append `<option value="...">` to a datalist.
    fn append_option(&mut self, list: &Self::Element, value: &str) -> Result<()>;

    fn dispatch(&mut self, el: &Self::Element, event: &str, bubbles: bool) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Clone, Debug, Default)]
pub struct Node {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchedEvent {
    pub target: NodeId,
    pub name: String,
    pub bubbles: bool,
}

/// In-memory document. Nodes live in an arena and are never freed; removing a
/// node only detaches it, like a DOM node with no remaining parent.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    events: Vec<DispatchedEvent>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            nodes: vec![Node {
                tag: "body".to_string(),
                ..Node::default()
            }],
            root: NodeId(0),
            events: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node {
            tag: tag.to_string(),
            ..Node::default()
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Create `<tag id=.. class=..>` as the last child of `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        id: Option<&str>,
        classes: &[&str],
    ) -> NodeId {
        let n = self.create_element(tag);
        {
            let node = self.node_mut(n);
            node.id = id.map(str::to_string);
            node.classes = classes.iter().map(|c| c.to_string()).collect();
        }
        self.append_child(parent, n);
        n
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.node_mut(node).id = Some(id.to_string());
    }

    pub fn set_node_value(&mut self, node: NodeId, value: &str) {
        self.node_mut(node).value = value.to_string();
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(p) = self.node_mut(node).parent.take() {
            self.node_mut(p).children.retain(|c| *c != node);
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_child(parent, child, usize::MAX);
    }

    /// Move `child` under `parent` at `index` (clamped to the end). Moving
    /// between parents is how a drop looks in the document.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) {
        self.detach(child);
        let siblings = &mut self.node_mut(parent).children;
        let at = index.min(siblings.len());
        siblings.insert(at, child);
        self.node_mut(child).parent = Some(parent);
    }

    pub fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut cur = node;
        while let Some(p) = self.parent(cur) {
            cur = p;
        }
        cur == self.root
    }

    /// Descendants of `from` in document order, `from` excluded.
    fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(from).iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    pub fn events(&self) -> &[DispatchedEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<DispatchedEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether a listener on `node` would have seen an event named `name`,
    /// either as the target or through bubbling.
    pub fn observed_by(&self, node: NodeId, name: &str) -> bool {
        self.events.iter().filter(|e| e.name == name).any(|e| {
            if e.target == node {
                return true;
            }
            if !e.bubbles {
                return false;
            }
            let mut cur = self.parent(e.target);
            while let Some(p) = cur {
                if p == node {
                    return true;
                }
                cur = self.parent(p);
            }
            false
        })
    }
}

impl Dom for Tree {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.node(*n).id.as_deref() == Some(id))
    }

    fn query_class(&self, scope: Option<&NodeId>, class: &str) -> Result<Vec<NodeId>> {
        let from = scope.copied().unwrap_or(self.root);
        Ok(self
            .descendants(from)
            .into_iter()
            .filter(|n| self.has_class(n, class))
            .collect())
    }

    fn id(&self, el: &NodeId) -> Option<String> {
        self.node(*el).id.clone().filter(|id| !id.is_empty())
    }

    fn value(&self, el: &NodeId) -> String {
        self.node(*el).value.clone()
    }

    fn set_value(&mut self, el: &NodeId, value: &str) -> Result<()> {
        self.set_node_value(*el, value);
        Ok(())
    }

    fn classes(&self, el: &NodeId) -> Vec<String> {
        self.node(*el).classes.clone()
    }

    fn add_class(&mut self, el: &NodeId, class: &str) -> Result<()> {
        if class.is_empty() || class.contains(char::is_whitespace) {
            return Err(RankError::Dom(format!("invalid class name `{class}`")));
        }
        let classes = &mut self.node_mut(*el).classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, el: &NodeId, class: &str) -> Result<()> {
        self.node_mut(*el).classes.retain(|c| c != class);
        Ok(())
    }

    fn inputs(&self, el: &NodeId) -> Result<Vec<NodeId>> {
        Ok(self
            .descendants(*el)
            .into_iter()
            .filter(|n| self.node(*n).tag.eq_ignore_ascii_case("input"))
            .collect())
    }

    fn clear_children(&mut self, el: &NodeId) -> Result<()> {
        for child in self.children(*el).to_vec() {
            self.detach(child);
        }
        Ok(())
    }

    fn append_option(&mut self, list: &NodeId, value: &str) -> Result<()> {
        let opt = self.append_element(*list, "option", None, &[]);
        self.set_node_value(opt, value);
        Ok(())
    }

    fn dispatch(&mut self, el: &NodeId, event: &str, bubbles: bool) -> Result<()> {
        self.events.push(DispatchedEvent {
            target: *el,
            name: event.to_string(),
            bubbles,
        });
        Ok(())
    }
}
