use crate::ast::{GroupTree, NodeId};
use crate::config::GroupConfig;
use crate::error::{ParseError, ParseErrors, ParseResult};
use crate::tokenizer::{lines, LineKind, SourceLine};
use std::ops::Range;
use tracing::{debug, instrument, warn};

/// Output of a successful parse
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub tree: GroupTree,
    /// Recoverable problems, such as skipped malformed lines
    pub diagnostics: ParseErrors,
}

/// A group that has been opened by a header and not yet closed
#[derive(Debug, Clone)]
struct OpenGroup {
    id: NodeId,
    line: usize,
    span: Range<usize>,
}

/// Single-pass tree builder for group files
pub struct Parser<'src> {
    source: &'src str,
    config: GroupConfig,
    tree: GroupTree,
    /// Open groups, excluding the root
    stack: Vec<OpenGroup>,
    depth: usize,
    /// Node that the next comment line attaches to
    last_touched: NodeId,
    diagnostics: ParseErrors,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, config: GroupConfig) -> Self {
        let tree = GroupTree::new();
        let root = tree.root();
        Self {
            source,
            config,
            tree,
            stack: Vec::new(),
            depth: 0,
            last_touched: root,
            diagnostics: ParseErrors::new(),
        }
    }

    /// Build the tree, consuming the parser
    #[instrument(skip(self), fields(bytes = self.source.len()))]
    pub fn parse(mut self) -> ParseResult<Parsed> {
        for line in lines(self.source) {
            self.process(line)?;
        }

        if let Some(open) = self.stack.last() {
            let name = &self.tree.node(open.id).name;
            return Err(ParseError::unbalanced_braces(
                open.line,
                open.span.clone(),
                format!("group `{}` is never closed", name),
            ));
        }

        debug!(
            nodes = self.tree.len(),
            diagnostics = self.diagnostics.len(),
            "Parsed group file"
        );

        Ok(Parsed {
            tree: self.tree,
            diagnostics: self.diagnostics,
        })
    }

    fn current_group(&self) -> NodeId {
        self.stack
            .last()
            .map(|open| open.id)
            .unwrap_or_else(|| self.tree.root())
    }

    fn process(&mut self, line: SourceLine<'src>) -> ParseResult<()> {
        match line.kind {
            LineKind::Blank => {}
            LineKind::Comment(text) => {
                if self.config.preserve_comments {
                    self.tree.node_mut(self.last_touched).add_comment(text);
                }
            }
            LineKind::GroupHeader(name) => {
                self.depth += 1;
                let parent = self.current_group();
                let id = self.tree.add_group(parent, name);
                debug!(group = name, depth = self.depth, line = line.number, "Opening group");

                self.stack.push(OpenGroup {
                    id,
                    line: line.number,
                    span: line.span,
                });
                self.last_touched = id;
            }
            // Structure is carried by the header lines
            LineKind::BraceOpen => {}
            LineKind::BraceClose => {
                let closed = self.stack.pop().ok_or_else(|| {
                    ParseError::unbalanced_braces(
                        line.number,
                        line.span.clone(),
                        "`}` without an open group",
                    )
                })?;
                self.depth -= 1;
                debug!(group = %self.tree.node(closed.id).name, line = line.number, "Closing group");
                self.last_touched = self.current_group();
            }
            LineKind::KeyValue { key, value } => {
                let parent = self.current_group();
                let id = self.tree.add_leaf(parent, key, value);
                self.last_touched = id;
            }
            LineKind::Malformed(content) => {
                warn!(line = line.number, content, "Skipping malformed line");
                self.diagnostics
                    .push(ParseError::malformed_line(line.number, line.span, content));
            }
        }

        debug_assert_eq!(self.depth, self.stack.len());
        Ok(())
    }
}

/// Parse group file text with the default configuration
pub fn parse(source: &str) -> ParseResult<GroupTree> {
    parse_with_config(source, GroupConfig::default()).map(|parsed| parsed.tree)
}

/// Parse group file text, keeping diagnostics
pub fn parse_with_config(source: &str, config: GroupConfig) -> ParseResult<Parsed> {
    Parser::new(source, config).parse()
}
