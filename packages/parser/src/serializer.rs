use crate::ast::{GroupTree, NodeId, NodeKind};
use crate::config::GroupConfig;

/// Serializer converts a tree back to group file text
///
/// The output is canonical: tab indentation, one `Group<TAB>name` header per
/// group followed by its braces, tab-separated values. Comments are written
/// right after the node they were attached to. Exact original whitespace is
/// not reproduced; parsing the output yields the same tree.
pub struct Serializer {
    config: GroupConfig,
    indent_string: String,
    lines: Vec<String>,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new(GroupConfig::default())
    }
}

impl Serializer {
    pub fn new(config: GroupConfig) -> Self {
        Self {
            config,
            indent_string: "\t".to_string(),
            lines: Vec::new(),
        }
    }

    /// Serialize the whole tree. Lines are joined with `\n`, without a
    /// trailing newline.
    pub fn serialize(&mut self, tree: &GroupTree) -> String {
        self.lines.clear();

        let root = tree.root();
        self.push_comments(tree, root, 0);
        for &child in tree.children(root) {
            self.serialize_node(tree, child);
        }

        self.lines.join("\n")
    }

    fn serialize_node(&mut self, tree: &GroupTree, id: NodeId) {
        let node = tree.node(id);
        match &node.kind {
            NodeKind::Group(group) => {
                let level = node.depth - 1;
                self.push_line(level, format!("Group\t{}", node.name));
                self.push_line(level, "{".to_string());
                self.push_comments(tree, id, level + 1);
                for &child in group.children() {
                    self.serialize_node(tree, child);
                }
                self.push_line(level, "}".to_string());
                if self.config.group_padding {
                    self.lines.push(String::new());
                }
            }
            NodeKind::Leaf(leaf) => {
                self.push_line(node.depth, format!("{}\t{}", leaf.key, leaf.value));
                self.push_comments(tree, id, node.depth + 1);
            }
        }
    }

    fn push_comments(&mut self, tree: &GroupTree, id: NodeId, level: usize) {
        if !self.config.preserve_comments {
            return;
        }
        for comment in &tree.node(id).comments {
            self.push_line(level, comment.clone());
        }
    }

    fn push_line(&mut self, level: usize, content: String) {
        self.lines
            .push(format!("{}{}", self.indent_string.repeat(level), content));
    }
}

/// Serialize with the default configuration
pub fn serialize(tree: &GroupTree) -> String {
    Serializer::default().serialize(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Scalar, Value};
    use crate::parser::parse;

    #[test]
    fn test_serialize_nested_groups() {
        let tree = parse("Group A\n{\n  Group B\n  {\n    x 1\n  }\n  y 2 3\n}").unwrap();
        assert_eq!(
            serialize(&tree),
            "Group\tA\n{\n\tGroup\tB\n\t{\n\t\tx\t1\n\t}\n\ty\t2\t3\n}"
        );
    }

    #[test]
    fn test_serialize_quoted_value() {
        let tree = parse(r#"desc "hello world""#).unwrap();
        assert_eq!(serialize(&tree), "desc\t\"hello world\"");
    }

    #[test]
    fn test_serialize_mixed_list() {
        let tree = parse("stats 10 20 strong 30").unwrap();
        assert_eq!(serialize(&tree), "stats\t10\t20\tstrong\t30");
    }

    #[test]
    fn test_leaf_comment_is_indented_one_level_deeper() {
        let tree = parse("Group A\n{\nx 1\n# about x\ny 2\n}").unwrap();
        assert_eq!(
            serialize(&tree),
            "Group\tA\n{\n\tx\t1\n\t\t# about x\n\ty\t2\n}"
        );
    }

    #[test]
    fn test_group_comments_follow_open_brace() {
        let tree = parse("# file\nGroup A\n# about A\n{\nx 1\n}").unwrap();
        assert_eq!(serialize(&tree), "# file\nGroup\tA\n{\n\t# about A\n\tx\t1\n}");
    }

    #[test]
    fn test_group_padding() {
        let tree = parse("Group A\n{\nx 1\n}\nGroup B\n{\n}").unwrap();
        let text = Serializer::new(GroupConfig::default().with_padding(true)).serialize(&tree);
        assert_eq!(text, "Group\tA\n{\n\tx\t1\n}\n\nGroup\tB\n{\n}\n");
    }

    #[test]
    fn test_comments_omitted_when_disabled() {
        let tree = parse("# file\nx 1 2").unwrap();
        let text = Serializer::new(GroupConfig::default().with_comments(false)).serialize(&tree);
        assert_eq!(text, "x\t1\t2");
    }

    #[test]
    fn test_serialize_edited_value() {
        let mut tree = parse("Group A\n{\nbasis 1 2 3\n}").unwrap();
        let a = tree.child(tree.root(), "A").unwrap();
        let basis = tree.child(a, "basis").unwrap();
        tree.node_mut(basis).as_leaf_mut().unwrap().value =
            Value::List(vec![Scalar::Integer(11), Scalar::Integer(22)]);
        assert_eq!(serialize(&tree), "Group\tA\n{\n\tbasis\t11\t22\n}");
    }
}
