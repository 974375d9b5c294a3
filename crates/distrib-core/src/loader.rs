//! Record loader for the files and nodes tables.
//!
//! Both tables share one format: one `<id> <integer>` record per line,
//! separated by whitespace, no header. Everything after a `#` is a comment
//! and blank lines are skipped.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::config::validate_sentinel;
use crate::error::{LoadError, LoadResult};
use crate::types::{Item, Node, Table};

/// Items and nodes for one run, validated and ready to allocate.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub items: Vec<Item>,
    pub nodes: Vec<Node>,
}

/// Parse a files table from memory. `source` names it in error messages.
pub fn parse_items(source: &str, text: &str) -> LoadResult<Vec<Item>> {
    let rows = parse_table(source, text, Table::Files)?;
    Ok(rows.into_iter().map(|(id, size)| Item { id, size }).collect())
}

/// Parse a nodes table from memory. `source` names it in error messages.
pub fn parse_nodes(source: &str, text: &str) -> LoadResult<Vec<Node>> {
    let rows = parse_table(source, text, Table::Nodes)?;
    Ok(rows
        .into_iter()
        .map(|(id, capacity)| Node { id, capacity })
        .collect())
}

pub fn load_items(path: &Path) -> LoadResult<Vec<Item>> {
    parse_items(&path.display().to_string(), &read(path)?)
}

pub fn load_nodes(path: &Path) -> LoadResult<Vec<Node>> {
    parse_nodes(&path.display().to_string(), &read(path)?)
}

/// Load both tables and reject node ids that collide with `sentinel`.
pub fn load_inputs(files: &Path, nodes: &Path, sentinel: &str) -> LoadResult<Inputs> {
    let items = load_items(files)?;
    let nodes = load_nodes(nodes)?;
    check_sentinel(&nodes, sentinel)?;
    debug!(items = items.len(), nodes = nodes.len(), "loaded inputs");
    Ok(Inputs { items, nodes })
}

/// A node named like the sentinel would be indistinguishable from an
/// unassignable file in CSV output.
pub fn check_sentinel(nodes: &[Node], sentinel: &str) -> LoadResult<()> {
    validate_sentinel(sentinel)?;
    match nodes.iter().find(|n| n.id == sentinel) {
        Some(node) => Err(LoadError::ReservedId {
            id: node.id.clone(),
        }),
        None => Ok(()),
    }
}

fn read(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_table(source: &str, text: &str, table: Table) -> LoadResult<Vec<(String, u64)>> {
    let mut rows = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let content = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let fields: Vec<&str> = content.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        let parse_err = |reason: String| LoadError::Parse {
            file: source.to_string(),
            line,
            reason,
        };

        let [id, value] = fields.as_slice() else {
            return Err(parse_err(format!(
                "expected 2 columns, found {}: '{}'",
                fields.len(),
                raw.trim()
            )));
        };

        let value: u64 = value.parse().map_err(|_| {
            parse_err(format!(
                "{} for '{id}' is not a non-negative integer: '{value}'",
                value_name(table)
            ))
        })?;

        if !seen.insert(id.to_string()) {
            return Err(LoadError::DuplicateId {
                file: source.to_string(),
                line,
                id: id.to_string(),
            });
        }
        rows.push((id.to_string(), value));
    }

    if rows.is_empty() {
        return Err(LoadError::EmptyInput { table });
    }
    Ok(rows)
}

fn value_name(table: Table) -> &'static str {
    match table {
        Table::Files => "size",
        Table::Nodes => "capacity",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items_with_comments() {
        let text = "# files\nfile1 10\n\n  file2   5  \nfile3 3 # trailing\n";
        let items = parse_items("files.txt", text).unwrap();

        assert_eq!(
            items,
            vec![
                Item::new("file1", 10),
                Item::new("file2", 5),
                Item::new("file3", 3),
            ]
        );
    }

    #[test]
    fn parses_nodes_with_tabs() {
        let nodes = parse_nodes("nodes.txt", "node1\t8\nnode2 10\n").unwrap();
        assert_eq!(nodes, vec![Node::new("node1", 8), Node::new("node2", 10)]);
    }

    #[test]
    fn empty_table_is_rejected() {
        let err = parse_items("files.txt", "# nothing here\n\n").unwrap_err();
        assert!(matches!(err, LoadError::EmptyInput { table: Table::Files }));

        let err = parse_nodes("nodes.txt", "").unwrap_err();
        assert!(matches!(err, LoadError::EmptyInput { table: Table::Nodes }));
    }

    #[test]
    fn wrong_column_count_reports_line() {
        let err = parse_items("files.txt", "a 1\nb\n").unwrap_err();
        match err {
            LoadError::Parse { file, line, reason } => {
                assert_eq!(file, "files.txt");
                assert_eq!(line, 2);
                assert!(reason.contains("expected 2 columns"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = parse_items("files.txt", "a 1 2\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let err = parse_nodes("nodes.txt", "n1 ten\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("nodes.txt:1"), "{msg}");
        assert!(msg.contains("capacity"), "{msg}");
    }

    #[test]
    fn negative_value_is_rejected() {
        let err = parse_items("files.txt", "a -4\n").unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: 1, .. }));
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let err = parse_items("files.txt", "a 1\nb 2\na 3\n").unwrap_err();
        match err {
            LoadError::DuplicateId { line, id, .. } => {
                assert_eq!(line, 3);
                assert_eq!(id, "a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn sentinel_node_id_is_reserved() {
        let nodes = vec![Node::new("n1", 4), Node::new("NULL", 4)];
        let err = check_sentinel(&nodes, "NULL").unwrap_err();
        assert!(matches!(err, LoadError::ReservedId { ref id } if id == "NULL"));

        assert!(check_sentinel(&nodes, "NONE").is_ok());
        assert!(matches!(check_sentinel(&nodes, "no node"), Err(LoadError::Config(_))));
    }

    #[test]
    fn load_inputs_reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let files = dir.path().join("files.txt");
        let nodes = dir.path().join("nodes.txt");
        std::fs::write(&files, "f1 4\nf2 2\n").unwrap();
        std::fs::write(&nodes, "n1 5\n").unwrap();

        let inputs = load_inputs(&files, &nodes, "NULL").unwrap();
        assert_eq!(inputs.items.len(), 2);
        assert_eq!(inputs.nodes, vec![Node::new("n1", 5)]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_items(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
