//! Node model for group files
//!
//! The tree is an arena: every node lives in one `Vec` owned by [`GroupTree`]
//! and is addressed by a [`NodeId`]. Parents are stored as ids, groups own the
//! ids of their children, so the object graph stays acyclic.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Name given to the synthetic root group. Never serialized.
pub const ROOT_NAME: &str = "root";

/// Placeholder name for a `Group` header without a name.
pub const UNNAMED_GROUP: &str = "NONAME";

/// Handle to a node inside a [`GroupTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Atomic element of a value list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    String(String),
}

impl Scalar {
    /// Classify a single token: all ASCII digits become an integer,
    /// anything else (including integers too large for `i64`) stays a string.
    pub fn classify(token: &str) -> Self {
        if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = token.parse::<i64>() {
                return Scalar::Integer(n);
            }
        }
        Scalar::String(token.to_string())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(n) => write!(f, "{}", n),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Integer(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

/// Value carried by a leaf entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    /// A bare word or a double-quoted string with its quotes retained
    String(String),
    List(Vec<Scalar>),
}

impl Value {
    /// Build a value from the tokens that follow a key.
    ///
    /// Returns `None` for an empty token list.
    pub fn from_tokens(tokens: &[&str]) -> Option<Self> {
        match tokens {
            [] => None,
            [single] if is_quoted(single) => Some(Value::String(single.to_string())),
            [single] => Some(match Scalar::classify(single) {
                Scalar::Integer(n) => Value::Integer(n),
                Scalar::String(s) => Value::String(s),
            }),
            many => Some(Value::List(
                many.iter().map(|token| Scalar::classify(token)).collect(),
            )),
        }
    }

    /// Tokenize `text` with the line tokenizer rules and build a value from it.
    pub fn parse(text: &str) -> Option<Self> {
        let tokens = crate::tokenizer::tokenize(text);
        Self::from_tokens(&tokens)
    }

    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Compact single-line rendering used by the outline printer
    pub fn to_inline_string(&self) -> String {
        match self {
            Value::List(items) => {
                let parts: Vec<String> = items
                    .iter()
                    .map(|item| match item {
                        Scalar::Integer(n) => n.to_string(),
                        Scalar::String(s) => format!("'{}'", s),
                    })
                    .collect();
                format!("[{}]", parts.join(", "))
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\t")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<Vec<Scalar>> for Value {
    fn from(items: Vec<Scalar>) -> Self {
        Value::List(items)
    }
}

fn is_quoted(token: &str) -> bool {
    token.len() >= 2 && token.starts_with('"') && token.ends_with('"')
}

/// Key/value entry
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub key: String,
    pub value: Value,
}

/// Named container. `children` is the authoritative order; `index` is kept
/// in step with it by [`Group::push`] and maps a child name to its handle,
/// last write wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    children: Vec<NodeId>,
    index: HashMap<String, NodeId>,
}

impl Group {
    fn push(&mut self, name: &str, id: NodeId) {
        self.children.push(id);
        self.index.insert(name.to_string(), id);
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Leaf(Leaf),
    Group(Group),
}

/// A node of the tree, either a leaf entry or a group
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    /// Nesting level; the root is 0, a group is one deeper than its parent,
    /// a leaf shares the depth of the group that contains it.
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub comments: Vec<String>,
    pub kind: NodeKind,
}

impl Node {
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group(_))
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match &self.kind {
            NodeKind::Leaf(leaf) => Some(leaf),
            NodeKind::Group(_) => None,
        }
    }

    pub fn as_leaf_mut(&mut self) -> Option<&mut Leaf> {
        match &mut self.kind {
            NodeKind::Leaf(leaf) => Some(leaf),
            NodeKind::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match &self.kind {
            NodeKind::Group(group) => Some(group),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Leaf value, if this node is a leaf
    pub fn value(&self) -> Option<&Value> {
        self.as_leaf().map(|leaf| &leaf.value)
    }

    pub fn add_comment(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }
}

/// Owner of every node of a parsed group file
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTree {
    nodes: Vec<Node>,
}

impl Default for GroupTree {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupTree {
    pub fn new() -> Self {
        let root = Node {
            name: ROOT_NAME.to_string(),
            depth: 0,
            parent: None,
            comments: Vec::new(),
            kind: NodeKind::Group(Group::default()),
        };
        Self { nodes: vec![root] }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a group under `parent`. An empty name is replaced by a
    /// unique `NONAME_<n>` placeholder.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a group of this tree.
    pub fn add_group(&mut self, parent: NodeId, name: &str) -> NodeId {
        let depth = self.node(parent).depth + 1;
        self.attach(parent, name, depth, NodeKind::Group(Group::default()))
    }

    /// Append a leaf under `parent` at the parent's depth.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a group of this tree.
    pub fn add_leaf(&mut self, parent: NodeId, key: &str, value: Value) -> NodeId {
        let depth = self.node(parent).depth;
        let leaf = Leaf {
            key: key.to_string(),
            value,
        };
        self.attach(parent, key, depth, NodeKind::Leaf(leaf))
    }

    fn attach(&mut self, parent: NodeId, name: &str, depth: usize, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let name = if name.trim().is_empty() {
            format!("{}_{}", UNNAMED_GROUP, id.0)
        } else {
            name.to_string()
        };

        match &mut self.nodes[parent.0].kind {
            NodeKind::Group(group) => group.push(&name, id),
            NodeKind::Leaf(_) => panic!("cannot attach a child to leaf {:?}", parent),
        }

        self.nodes.push(Node {
            name,
            depth,
            parent: Some(parent),
            comments: Vec::new(),
            kind,
        });
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Child handles of a group, empty for leaves
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).as_group().map(Group::children).unwrap_or(&[])
    }

    /// Immediate child of a group by name
    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.node(id).as_group().and_then(|group| group.get(name))
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the root has no children
    pub fn is_empty(&self) -> bool {
        self.children(self.root()).is_empty()
    }

    /// Names from the root (exclusive) down to `id` (inclusive)
    pub fn path_of(&self, id: NodeId) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            if node.parent.is_none() {
                break;
            }
            path.push(node.name.as_str());
            current = node.parent;
        }
        path.reverse();
        path
    }
}

struct NodeView<'a> {
    tree: &'a GroupTree,
    id: NodeId,
}

struct ChildrenView<'a> {
    tree: &'a GroupTree,
    children: &'a [NodeId],
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.tree.node(self.id);
        let mut map = serializer.serialize_map(None)?;
        match &node.kind {
            NodeKind::Group(group) => {
                map.serialize_entry("type", "group")?;
                map.serialize_entry("name", &node.name)?;
                map.serialize_entry("comments", &node.comments)?;
                map.serialize_entry(
                    "children",
                    &ChildrenView {
                        tree: self.tree,
                        children: group.children(),
                    },
                )?;
            }
            NodeKind::Leaf(leaf) => {
                map.serialize_entry("type", "leaf")?;
                map.serialize_entry("key", &leaf.key)?;
                map.serialize_entry("value", &leaf.value)?;
                map.serialize_entry("comments", &node.comments)?;
            }
        }
        map.end()
    }
}

impl Serialize for ChildrenView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.children.len()))?;
        for &id in self.children {
            seq.serialize_element(&NodeView {
                tree: self.tree,
                id,
            })?;
        }
        seq.end()
    }
}

/// Nested JSON-friendly snapshot: the root's comments and children
impl Serialize for GroupTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let root = self.node(self.root());
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("comments", &root.comments)?;
        map.serialize_entry(
            "children",
            &ChildrenView {
                tree: self,
                children: self.children(self.root()),
            },
        )?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_scalar() {
        assert_eq!(Scalar::classify("42"), Scalar::Integer(42));
        assert_eq!(Scalar::classify("007"), Scalar::Integer(7));
        assert_eq!(Scalar::classify("-5"), Scalar::from("-5"));
        assert_eq!(Scalar::classify("4a"), Scalar::from("4a"));
        assert_eq!(
            Scalar::classify("99999999999999999999"),
            Scalar::from("99999999999999999999")
        );
    }

    #[test]
    fn test_value_from_tokens() {
        assert_eq!(Value::from_tokens(&[]), None);
        assert_eq!(Value::from_tokens(&["1"]), Some(Value::Integer(1)));
        assert_eq!(
            Value::from_tokens(&["sword"]),
            Some(Value::String("sword".to_string()))
        );
        assert_eq!(
            Value::from_tokens(&["\"hello world\""]),
            Some(Value::String("\"hello world\"".to_string()))
        );
        assert_eq!(
            Value::from_tokens(&["10", "strong"]),
            Some(Value::List(vec![10.into(), "strong".into()]))
        );
    }

    #[test]
    fn test_value_display() {
        let value = Value::List(vec![10.into(), 20.into(), "strong".into(), 30.into()]);
        assert_eq!(value.to_string(), "10\t20\tstrong\t30");
        assert_eq!(value.to_inline_string(), "[10, 20, 'strong', 30]");
        assert_eq!(Value::Integer(3).to_string(), "3");
    }

    #[test]
    fn test_add_children_updates_index() {
        let mut tree = GroupTree::new();
        let root = tree.root();
        let group = tree.add_group(root, "Wolf");
        let first = tree.add_leaf(group, "level", Value::Integer(1));
        let second = tree.add_leaf(group, "level", Value::Integer(2));

        assert_eq!(tree.children(group), &[first, second]);
        assert_eq!(tree.child(group, "level"), Some(second));
        assert_eq!(tree.node(group).depth, 1);
        assert_eq!(tree.node(first).depth, 1);
        assert_eq!(tree.node(first).parent, Some(group));
        assert_eq!(tree.path_of(second), vec!["Wolf", "level"]);
    }

    #[test]
    fn test_empty_group_name_gets_placeholder() {
        let mut tree = GroupTree::new();
        let root = tree.root();
        let a = tree.add_group(root, "");
        let b = tree.add_group(root, "  ");
        assert_eq!(tree.node(a).name, "NONAME_1");
        assert_eq!(tree.node(b).name, "NONAME_2");
        assert_eq!(tree.child(root, "NONAME_2"), Some(b));
    }

    #[test]
    fn test_serialize_snapshot() {
        let mut tree = GroupTree::new();
        let root = tree.root();
        let group = tree.add_group(root, "A");
        tree.add_leaf(group, "x", Value::List(vec![1.into(), "b".into()]));
        tree.node_mut(group).add_comment("# note");

        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["children"][0]["name"], "A");
        assert_eq!(json["children"][0]["comments"][0], "# note");
        assert_eq!(json["children"][0]["children"][0]["key"], "x");
        assert_eq!(
            json["children"][0]["children"][0]["value"],
            serde_json::json!([1, "b"])
        );
    }
}
