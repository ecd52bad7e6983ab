#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt;

use anyhow::{Context, Result};
use tree_sitter::{Language, Node, Query, QueryCursor, StreamingIterator, Tree};

use crate::Dict;

/// The tree-sitter Java grammar.
fn java() -> Language {
    tree_sitter_java::LANGUAGE.into()
}

#[derive(Clone)]
/// Java source together with its tree-sitter syntax tree.
pub struct Parser {
    /// the parsed source
    code: String,
    /// syntax tree of `code`
    tree: Tree,
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("bytes", &self.code.len())
            .field("has_errors", &self.has_errors())
            .finish()
    }
}

impl Parser {
    /// Parses `source_code`. Fails only when the grammar cannot be loaded;
    /// syntax errors are reported by [`Parser::has_errors`].
    pub fn new(source_code: String) -> Result<Self> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&java())
            .context("Failed to load Java grammar")?;
        let tree = parser
            .parse(source_code.as_str(), None)
            .context("tree-sitter returned no tree")?;

        Ok(Self {
            code: source_code,
            tree,
        })
    }

    /// The parsed source
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Root node of the syntax tree
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Whether tree-sitter had to recover from errors or insert missing
    /// tokens anywhere in the source.
    pub fn has_errors(&self) -> bool {
        self.root().has_error()
    }

    /// Source text under `node`, or empty when the range is not valid UTF-8
    pub fn text_of(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.code.as_bytes()).unwrap_or_default()
    }

    /// Runs the query `q` and returns one map per match, from capture name to
    /// captured text.
    pub fn query(&self, q: &str) -> Result<Vec<Dict>> {
        let query = Query::new(&java(), q)
            .with_context(|| format!("Failed to compile tree-sitter query: {q}"))?;
        let names = query.capture_names();

        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, self.root(), self.code.as_bytes());
        let mut rows = Vec::new();
        while let Some(m) = matches.next() {
            let row: Dict = m
                .captures
                .iter()
                .filter_map(|c| {
                    let name = names.get(c.index as usize)?;
                    Some((name.to_string(), self.text_of(c.node).to_string()))
                })
                .collect();
            rows.push(row);
        }
        Ok(rows)
    }
}
