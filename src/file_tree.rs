//! Working directory tree snapshot
//!
//! Built by walking the working directory once per load. The tree is
//! replaced wholesale on reload, never patched.

use std::fs;
use std::io;
use std::path::Path;

/// Directory entries that are never shown
const SKIPPED_ENTRIES: &[&str] = &[".git"];

/// A node in the file tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTreeNode {
    pub name: String,
    /// Whether the node's children are shown
    pub expanded: bool,
    /// Sorted by name; empty for files
    pub children: Vec<FileTreeNode>,
    pub is_dir: bool,
}

/// One visible row of a flattened tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow<'a> {
    pub depth: usize,
    pub name: &'a str,
    pub is_dir: bool,
    /// Whether this node is the last child of its parent
    pub is_last: bool,
    /// For each ancestor level, whether that ancestor was a last child
    pub ancestors_last: Vec<bool>,
}

impl FileTreeNode {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expanded: false,
            children: Vec::new(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>, children: Vec<FileTreeNode>) -> Self {
        Self {
            name: name.into(),
            expanded: true,
            children,
            is_dir: true,
        }
    }

    /// Walk `root` recursively
    ///
    /// Only a failure to read the root itself is an error. Unreadable
    /// subdirectories are kept as empty, collapsed directory nodes, and
    /// symbolic links are leaves.
    pub fn build(root: &Path) -> io::Result<Self> {
        let name = display_name(root);
        let children = read_children(root)?;
        Ok(Self::dir(name, children))
    }

    /// Total number of nodes, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(FileTreeNode::node_count).sum::<usize>()
    }

    /// Flatten the visible part of the tree into rows, root first
    pub fn rows(&self) -> Vec<TreeRow<'_>> {
        let mut rows = Vec::with_capacity(self.node_count());
        self.push_rows(0, true, &mut Vec::new(), &mut rows);
        rows
    }

    fn push_rows<'a>(
        &'a self,
        depth: usize,
        is_last: bool,
        ancestors_last: &mut Vec<bool>,
        rows: &mut Vec<TreeRow<'a>>,
    ) {
        rows.push(TreeRow {
            depth,
            name: &self.name,
            is_dir: self.is_dir,
            is_last,
            ancestors_last: ancestors_last.clone(),
        });
        if !self.expanded {
            return;
        }
        if depth > 0 {
            ancestors_last.push(is_last);
        }
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            child.push_rows(depth + 1, i + 1 == count, ancestors_last, rows);
        }
        if depth > 0 {
            ancestors_last.pop();
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_children(dir: &Path) -> io::Result<Vec<FileTreeNode>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if SKIPPED_ENTRIES.contains(&name.as_str()) {
            continue;
        }

        // file_type() does not follow symlinks
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_dir {
            match read_children(&entry.path()) {
                Ok(grandchildren) => children.push(FileTreeNode::dir(name, grandchildren)),
                Err(e) => {
                    tracing::debug!("Cannot read {:?}: {}", entry.path(), e);
                    let mut node = FileTreeNode::dir(name, Vec::new());
                    node.expanded = false;
                    children.push(node);
                }
            }
        } else {
            children.push(FileTreeNode::file(name));
        }
    }
    children.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(children)
}

/// Render a row's tree guide prefix (e.g. "│  ├─ ")
pub fn row_prefix(row: &TreeRow<'_>) -> String {
    if row.depth == 0 {
        return String::new();
    }
    let mut prefix = String::new();
    for &last in &row.ancestors_last {
        prefix.push_str(if last { "   " } else { "│  " });
    }
    prefix.push_str(if row.is_last { "└─ " } else { "├─ " });
    prefix
}
