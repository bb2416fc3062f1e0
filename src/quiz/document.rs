//! Source documents
//!
//! Every grammar reads a [`SourceDocument`]: the plain text of the source plus an ordered
//! stream of paragraph and table nodes. Text grammars only look at the text; table grammars
//! only look at the nodes.
//!
//! For `.txt` sources the nodes are derived from the text: runs of consecutive lines that
//! contain a tab become table rows, every other line is a paragraph. For `.docx` sources the
//! nodes come from [extraction](crate::quiz::extraction) and the text is rendered from them.

/// A table as a list of rows of trimmed cell texts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Build a table from string slices (mostly for tests and text sources)
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|c| c.as_ref().trim().to_string()).collect())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Rows rendered as tab-separated lines
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Paragraph(String),
    Table(Table),
}

impl Node {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Node::Paragraph(text.into())
    }

    /// Whether this is a paragraph with no visible text
    pub fn is_blank(&self) -> bool {
        matches!(self, Node::Paragraph(text) if text.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceDocument {
    text: String,
    nodes: Vec<Node>,
}

impl SourceDocument {
    /// Build a document from plain text.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if text.starts_with('\u{feff}') {
            text.replace_range(..'\u{feff}'.len_utf8(), "");
        }

        let mut nodes = Vec::new();
        let mut rows: Vec<Vec<String>> = Vec::new();
        for line in text.lines() {
            if line.contains('\t') {
                rows.push(line.split('\t').map(|cell| cell.trim().to_string()).collect());
                continue;
            }
            if !rows.is_empty() {
                nodes.push(Node::Table(Table::new(std::mem::take(&mut rows))));
            }
            nodes.push(Node::Paragraph(line.trim().to_string()));
        }
        if !rows.is_empty() {
            nodes.push(Node::Table(Table::new(rows)));
        }

        Self { text, nodes }
    }

    /// Build a document from extracted nodes; the text is rendered line by line.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let text = nodes
            .iter()
            .map(|node| match node {
                Node::Paragraph(text) => text.clone(),
                Node::Table(table) => table.to_text(),
            })
            .collect::<Vec<_>>()
            .join("\n");
        Self { text, nodes }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Paragraph(text) => Some(text.as_str()),
            Node::Table(_) => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Table(table) => Some(table),
            Node::Paragraph(_) => None,
        })
    }
}
