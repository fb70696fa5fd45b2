//! File-backed reader: load, look up, edit and save a group file.

use crate::ast::{GroupTree, Leaf, Node, NodeId, NodeKind};
use crate::config::GroupConfig;
use crate::error::{GroupError, GroupResult, LookupError, ParseErrors};
use crate::parser::{Parsed, Parser};
use crate::serializer::Serializer;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Default)]
pub struct GroupReader {
    config: GroupConfig,
    tree: GroupTree,
    diagnostics: ParseErrors,
}

impl GroupReader {
    pub fn new(config: GroupConfig) -> Self {
        Self {
            config,
            tree: GroupTree::new(),
            diagnostics: ParseErrors::new(),
        }
    }

    pub fn config(&self) -> GroupConfig {
        self.config
    }

    pub fn tree(&self) -> &GroupTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut GroupTree {
        &mut self.tree
    }

    /// Diagnostics of the last successful load
    pub fn diagnostics(&self) -> &ParseErrors {
        &self.diagnostics
    }

    /// Parse `data`, replacing the current tree. On error the previous
    /// tree is kept.
    pub fn load_from_data(&mut self, data: &str) -> GroupResult<()> {
        let Parsed { tree, diagnostics } = Parser::new(data, self.config).parse()?;
        self.tree = tree;
        self.diagnostics = diagnostics;
        Ok(())
    }

    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> GroupResult<()> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|err| GroupError::io(path, err))?;
        self.load_from_data(&data)
    }

    /// Canonical text of the current tree
    pub fn generate_tree(&self) -> String {
        Serializer::new(self.config).serialize(&self.tree)
    }

    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> GroupResult<()> {
        let path = path.as_ref();
        let text = self.generate_tree();
        fs::write(path, &text).map_err(|err| GroupError::io(path, err))?;
        debug!(bytes = text.len(), "Saved group file");
        Ok(())
    }

    pub fn find_node<I, S>(&self, path: I) -> Result<&Node, LookupError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tree.find(path).map(|id| self.tree.node(id))
    }

    pub fn find_leaf_mut<I, S>(&mut self, path: I) -> Result<&mut Leaf, LookupError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tree.find_leaf_mut(path)
    }

    /// Human-readable outline of the whole tree
    pub fn print_tree(&self) -> String {
        self.outline(self.tree.root())
    }

    /// Outline of the subtree at `id`. A group other than the root is
    /// printed with its own header.
    pub fn outline(&self, id: NodeId) -> String {
        let mut lines = Vec::new();
        if id == self.tree.root() {
            for &child in self.tree.children(id) {
                self.outline_node(child, 0, &mut lines);
            }
        } else {
            self.outline_node(id, 0, &mut lines);
        }
        lines.join("\n")
    }

    fn outline_node(&self, id: NodeId, level: usize, lines: &mut Vec<String>) {
        let node = self.tree.node(id);
        let indent = "    ".repeat(level);
        match &node.kind {
            NodeKind::Group(group) => {
                lines.push(format!("{}Group {}:", indent, node.name));
                for &child in group.children() {
                    self.outline_node(child, level + 1, lines);
                }
                if self.config.group_padding {
                    lines.push(String::new());
                }
            }
            NodeKind::Leaf(leaf) => {
                lines.push(format!(
                    "{}{}: {}",
                    indent,
                    leaf.key,
                    leaf.value.to_inline_string()
                ));
            }
        }
    }
}
