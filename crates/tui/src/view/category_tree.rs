use std::collections::HashSet;

use api_types::category::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: u64,
    pub name: String,
    pub depth: usize,
}

/// Depth-first rows of the category forest, roots in backend order.
///
/// A category whose parent is unknown is treated as a root. Links that
/// would revisit a category are skipped, so malformed data still renders.
pub fn flatten(categories: &[Category]) -> Vec<TreeRow> {
    let known: HashSet<u64> = categories.iter().map(|c| c.id).collect();
    let mut visited = HashSet::new();
    let mut rows = Vec::with_capacity(categories.len());

    let roots = categories
        .iter()
        .filter(|c| c.parent.is_none_or(|parent| !known.contains(&parent)));
    for root in roots {
        walk(categories, root, 0, &mut visited, &mut rows);
    }
    // Whatever is left sits on a cycle.
    for category in categories {
        walk(categories, category, 0, &mut visited, &mut rows);
    }
    rows
}

fn walk(
    categories: &[Category],
    node: &Category,
    depth: usize,
    visited: &mut HashSet<u64>,
    rows: &mut Vec<TreeRow>,
) {
    if !visited.insert(node.id) {
        return;
    }
    rows.push(TreeRow {
        id: node.id,
        name: node.name.clone(),
        depth,
    });
    for child in categories.iter().filter(|c| c.parent == Some(node.id)) {
        walk(categories, child, depth + 1, visited, rows);
    }
}

/// `id` and every category below it.
pub fn descendants(categories: &[Category], id: u64) -> HashSet<u64> {
    let mut found = HashSet::from([id]);
    let mut frontier = vec![id];
    while let Some(current) = frontier.pop() {
        for child in categories.iter().filter(|c| c.parent == Some(current)) {
            if found.insert(child.id) {
                frontier.push(child.id);
            }
        }
    }
    found
}
