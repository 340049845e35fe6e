//! WKT tree nodes
//!
//! A definition is held as a tree of labeled nodes. Container nodes carry a
//! keyword (`GEOGCS`, `PARAMETER`, ...) and own their children exclusively;
//! leaves carry literal names and numbers. There are no parent pointers:
//! where the parent is needed it is derived from a [`NodePath`].

use log::{debug, trace};

use crate::srs::errors::{SrsError, SrsResult};
use crate::wkt::remap::{RemapDirection, RemapTable};

/// Index path from a root to one of its descendants
pub type NodePath = Vec<usize>;

/// Deepest nesting accepted by the parser
const MAX_PARSE_DEPTH: usize = 64;

/// Canonical child orderings; the first entry names the node kind
const PROJCS_ORDER: &[&str] = &[
    "PROJCS", "GEOGCS", "PROJECTION", "PARAMETER", "UNIT", "AXIS", "AUTHORITY", "EXTENSION",
];
const GEOGCS_ORDER: &[&str] = &["GEOGCS", "DATUM", "PRIMEM", "UNIT", "AXIS", "AUTHORITY"];
const DATUM_ORDER: &[&str] = &["DATUM", "SPHEROID", "TOWGS84", "AUTHORITY"];

/// A node of a WKT tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WktNode {
    value: String,
    children: Vec<WktNode>,
}

impl WktNode {
    /// Creates a leaf node
    pub fn new(value: impl Into<String>) -> Self {
        WktNode {
            value: value.into(),
            children: Vec::new(),
        }
    }

    /// Creates a node with the given children
    pub fn with_children(value: impl Into<String>, children: Vec<WktNode>) -> Self {
        WktNode {
            value: value.into(),
            children,
        }
    }

    /// Creates a `KEYWORD[leaf, leaf, ...]` node from literal values
    pub fn with_leaves(value: impl Into<String>, leaves: &[&str]) -> Self {
        WktNode {
            value: value.into(),
            children: leaves.iter().map(|leaf| WktNode::new(*leaf)).collect(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn children(&self) -> &[WktNode] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&WktNode> {
        self.children.get(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut WktNode> {
        self.children.get_mut(index)
    }

    /// Value of the child at `index`, if present
    pub fn child_value(&self, index: usize) -> Option<&str> {
        self.children.get(index).map(|c| c.value.as_str())
    }

    pub fn add_child(&mut self, child: WktNode) {
        self.children.push(child);
    }

    /// Inserts a child, clamping `index` to the end of the list
    pub fn insert_child(&mut self, index: usize, child: WktNode) {
        let index = index.min(self.children.len());
        self.children.insert(index, child);
    }

    /// Removes and returns the child at `index`
    pub fn destroy_child(&mut self, index: usize) -> Option<WktNode> {
        if index < self.children.len() {
            Some(self.children.remove(index))
        } else {
            None
        }
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Index of the first direct child whose value matches (case-insensitive)
    pub fn find_child(&self, value: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|c| c.value.eq_ignore_ascii_case(value))
    }

    /// Searches for a node by value.
    ///
    /// This is a depth-first search, not a strict path match: the node itself
    /// is checked first, then its direct children, then each child's subtree
    /// in order. The first hit may therefore be a distant descendant.
    pub fn find_path(&self, name: &str) -> Option<NodePath> {
        if self.value.eq_ignore_ascii_case(name) {
            return Some(Vec::new());
        }

        if let Some(index) = self.find_child(name) {
            return Some(vec![index]);
        }

        for (index, child) in self.children.iter().enumerate() {
            if child.children.is_empty() {
                continue;
            }
            if let Some(mut path) = child.find_path(name) {
                path.insert(0, index);
                return Some(path);
            }
        }
        None
    }

    /// Depth-first lookup of a node by value (see [`WktNode::find_path`])
    pub fn get_node(&self, name: &str) -> Option<&WktNode> {
        let path = self.find_path(name)?;
        self.node_at(&path)
    }

    /// Mutable variant of [`WktNode::get_node`]
    pub fn get_node_mut(&mut self, name: &str) -> Option<&mut WktNode> {
        let path = self.find_path(name)?;
        self.node_at_mut(&path)
    }

    /// Resolves a `|`-separated path such as `PROJCS|GEOGCS|DATUM`.
    ///
    /// Each component is looked up with [`WktNode::get_node`] starting from
    /// the node found for the previous component.
    pub fn attr_path(&self, path: &str) -> Option<NodePath> {
        let mut result = Vec::new();
        let mut current = self;
        for component in path.split('|') {
            let sub = current.find_path(component)?;
            for index in &sub {
                current = &current.children[*index];
            }
            result.extend(sub);
        }
        Some(result)
    }

    pub fn get_attr_node(&self, path: &str) -> Option<&WktNode> {
        let path = self.attr_path(path)?;
        self.node_at(&path)
    }

    pub fn get_attr_node_mut(&mut self, path: &str) -> Option<&mut WktNode> {
        let path = self.attr_path(path)?;
        self.node_at_mut(&path)
    }

    /// Value of child `child_index` of the node at `path`
    pub fn get_attr_value(&self, path: &str, child_index: usize) -> Option<&str> {
        self.get_attr_node(path)?.child_value(child_index)
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&WktNode> {
        let mut node = self;
        for index in path {
            node = node.children.get(*index)?;
        }
        Some(node)
    }

    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut WktNode> {
        let mut node = self;
        for index in path {
            node = node.children.get_mut(*index)?;
        }
        Some(node)
    }

    /// Parent of the node at `path` (None for the root itself)
    pub fn parent_of(&self, path: &[usize]) -> Option<&WktNode> {
        if path.is_empty() {
            return None;
        }
        self.node_at(&path[..path.len() - 1])
    }

    /// Parses WKT text into a tree
    pub fn parse(text: &str) -> SrsResult<WktNode> {
        let mut parser = Parser {
            chars: text.char_indices().collect(),
            pos: 0,
            len: text.len(),
        };
        let root = parser.parse_node(0)?;
        parser.skip_whitespace();
        if let Some((offset, c)) = parser.peek() {
            return Err(SrsError::malformed_at(
                format!("unexpected '{}' after end of definition", c),
                offset,
            ));
        }
        if root.value.is_empty() && root.children.is_empty() {
            return Err(SrsError::malformed("empty definition"));
        }
        trace!("Parsed WKT tree rooted at {}", root.value);
        Ok(root)
    }

    /// Serializes the tree as single-line WKT
    pub fn to_wkt(&self) -> String {
        let mut out = String::new();
        self.write_wkt(&mut out, None, 0, None);
        out
    }

    /// Serializes the tree as indented multi-line WKT
    pub fn to_pretty_wkt(&self) -> String {
        let mut out = String::new();
        self.write_wkt(&mut out, None, 0, Some(0));
        out
    }

    fn write_wkt(&self, out: &mut String, parent: Option<&WktNode>, index: usize, depth: Option<usize>) {
        if self.needs_quoting(parent, index) {
            out.push('"');
            out.push_str(&self.value);
            out.push('"');
        } else {
            out.push_str(&self.value);
        }

        if self.children.is_empty() {
            return;
        }

        out.push('[');
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let child_depth = depth.map(|d| d + 1);
            if let Some(d) = child_depth {
                if !child.children.is_empty() {
                    out.push('\n');
                    out.push_str(&"    ".repeat(d));
                }
            }
            child.write_wkt(out, Some(self), i, child_depth);
        }
        out.push(']');
    }

    /// Quoting heuristic for leaf values: quote anything that does not look
    /// numeric or that begins with `e`/`E`; axis orientations stay bare and
    /// the authority name is always quoted.
    fn needs_quoting(&self, parent: Option<&WktNode>, index: usize) -> bool {
        if !self.children.is_empty() {
            return false;
        }

        let mut quote = self
            .value
            .chars()
            .any(|c| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')));

        if self.value.starts_with('e') || self.value.starts_with('E') {
            quote = true;
        }

        if let Some(parent) = parent {
            if parent.value.eq_ignore_ascii_case("AXIS") && index != 0 {
                quote = false;
            }
            if parent.value.eq_ignore_ascii_case("AUTHORITY") && index == 0 {
                quote = true;
            }
        }
        quote
    }

    /// Renames values throughout the tree using `table`.
    ///
    /// With an anchor, only nodes below a node whose value equals the anchor
    /// are rewritten; without one every node is a candidate. Returns the
    /// number of values changed.
    pub fn apply_remap(&mut self, anchor: Option<&str>, table: &RemapTable, direction: RemapDirection) -> usize {
        self.remap_inner(anchor, table, direction, false)
    }

    fn remap_inner(&mut self, anchor: Option<&str>, table: &RemapTable, direction: RemapDirection, child_of_hit: bool) -> usize {
        let mut changed = 0;

        if child_of_hit || anchor.is_none() {
            if let Some(replacement) = table.lookup(&self.value, direction) {
                if replacement != self.value {
                    trace!("Remapped '{}' -> '{}'", self.value, replacement);
                    self.value = replacement;
                    changed += 1;
                }
            }
        }

        let hit = child_of_hit || anchor.map_or(false, |a| self.value.eq_ignore_ascii_case(a));

        for child in &mut self.children {
            changed += child.remap_inner(anchor, table, direction, hit);
        }
        changed
    }

    /// Reorders children of `PROJCS`, `GEOGCS` and `DATUM` nodes into their
    /// canonical keyword order. Children whose keyword is not in the ordering
    /// act as fixed points; the first child (the name) never moves.
    pub fn fixup_ordering(&mut self) {
        for child in &mut self.children {
            child.fixup_ordering();
        }

        if self.children.len() < 3 {
            return;
        }

        let rule = if self.value.eq_ignore_ascii_case("PROJCS") {
            PROJCS_ORDER
        } else if self.value.eq_ignore_ascii_case("GEOGCS") {
            GEOGCS_ORDER
        } else if self.value.eq_ignore_ascii_case("DATUM") {
            DATUM_ORDER
        } else {
            return;
        };

        let key_of = |node: &WktNode| -> Option<usize> {
            rule.iter()
                .skip(1)
                .position(|kind| kind.eq_ignore_ascii_case(&node.value))
        };

        let mut keys: Vec<Option<usize>> = self.children.iter().map(key_of).collect();
        for (i, key) in keys.iter().enumerate().skip(1) {
            if key.is_none() {
                debug!("Unexpected {} child '{}' while ordering", self.value, self.children[i].value);
            }
        }

        let mut changed = true;
        while changed {
            changed = false;
            for i in 1..self.children.len() - 1 {
                if let (Some(a), Some(b)) = (keys[i], keys[i + 1]) {
                    if a > b {
                        self.children.swap(i, i + 1);
                        keys.swap(i, i + 1);
                        changed = true;
                    }
                }
            }
        }
    }

    /// Removes every descendant whose value equals `kind`; returns how many
    /// subtrees were dropped
    pub fn strip_nodes(&mut self, kind: &str) -> usize {
        let before = self.children.len();
        self.children.retain(|c| !c.value.eq_ignore_ascii_case(kind));
        let mut removed = before - self.children.len();

        for child in &mut self.children {
            removed += child.strip_nodes(kind);
        }
        removed
    }
}

impl std::fmt::Display for WktNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_wkt())
    }
}

impl std::str::FromStr for WktNode {
    type Err = SrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WktNode::parse(s)
    }
}

/// Recursive-descent WKT reader
struct Parser {
    chars: Vec<(usize, char)>,
    pos: usize,
    len: usize,
}

impl Parser {
    fn peek(&self) -> Option<(usize, char)> {
        self.chars.get(self.pos).copied()
    }

    fn offset(&self) -> usize {
        self.peek().map(|(o, _)| o).unwrap_or(self.len)
    }

    fn skip_whitespace(&mut self) {
        while let Some((_, c)) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += 1;
        }
    }

    fn parse_node(&mut self, depth: usize) -> SrsResult<WktNode> {
        if depth > MAX_PARSE_DEPTH {
            return Err(SrsError::malformed_at("definition nested too deeply", self.offset()));
        }

        let mut value = String::new();
        self.skip_whitespace();

        while let Some((offset, c)) = self.peek() {
            match c {
                '[' | '(' | ',' | ']' | ')' => break,
                '"' => {
                    self.pos += 1;
                    loop {
                        match self.peek() {
                            Some((_, '"')) => {
                                self.pos += 1;
                                break;
                            },
                            Some((_, inner)) => {
                                value.push(inner);
                                self.pos += 1;
                            },
                            None => {
                                return Err(SrsError::malformed_at("unterminated quoted string", offset));
                            },
                        }
                    }
                },
                c if c.is_whitespace() => {
                    self.pos += 1;
                },
                c => {
                    value.push(c);
                    self.pos += 1;
                },
            }
        }

        let mut node = WktNode::new(value);

        let opener = match self.peek() {
            Some((_, c @ ('[' | '('))) => c,
            _ => return Ok(node),
        };
        let open_offset = self.offset();
        self.pos += 1;

        loop {
            let child = self.parse_node(depth + 1)?;
            node.children.push(child);

            self.skip_whitespace();
            match self.peek() {
                Some((_, ',')) => {
                    self.pos += 1;
                },
                Some((offset, c @ (']' | ')'))) => {
                    let expected = if opener == '[' { ']' } else { ')' };
                    if c != expected {
                        return Err(SrsError::malformed_at(
                            format!("expected '{}' but found '{}'", expected, c),
                            offset,
                        ));
                    }
                    self.pos += 1;
                    return Ok(node);
                },
                Some((offset, c)) => {
                    return Err(SrsError::malformed_at(format!("unexpected '{}'", c), offset));
                },
                None => {
                    return Err(SrsError::malformed_at(
                        format!("missing closing delimiter for '{}'", node.value),
                        open_offset,
                    ));
                },
            }
        }
    }
}
