use std::collections::{HashMap, HashSet};

use fusion_props_model::{ComponentVersionSummary, Occurrence};

pub const ROOT_INDENT: u32 = 10;
pub const LEVEL_INDENT: u32 = 20;

/// One row of the components table.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyRow {
    pub depth: usize,
    /// Left padding in pixels.
    pub indent: u32,
    pub component_version: ComponentVersionSummary,
}

/// Flattens the all-occurrences listing into depth-first rows starting
/// below `root_version_id`. Sibling order follows the listing.
///
/// A version already on the current path is not expanded again, so cyclic
/// data cannot recurse forever.
pub fn flatten_assembly(occurrences: &[Occurrence], root_version_id: &str) -> Vec<AssemblyRow> {
    let mut children: HashMap<&str, Vec<&ComponentVersionSummary>> = HashMap::new();
    for occurrence in occurrences {
        if let Some(parent) = &occurrence.parent_component_version {
            children
                .entry(parent.id.as_str())
                .or_default()
                .push(&occurrence.component_version);
        }
    }

    let mut rows = Vec::new();
    let mut path = HashSet::from([root_version_id]);
    visit(&children, root_version_id, 0, &mut path, &mut rows);
    rows
}

fn visit<'a>(
    children: &HashMap<&'a str, Vec<&'a ComponentVersionSummary>>,
    parent_id: &str,
    depth: usize,
    path: &mut HashSet<&'a str>,
    rows: &mut Vec<AssemblyRow>,
) {
    let Some(kids) = children.get(parent_id) else {
        return;
    };

    for &child in kids {
        rows.push(AssemblyRow {
            depth,
            indent: ROOT_INDENT + LEVEL_INDENT * depth as u32,
            component_version: child.clone(),
        });

        if path.insert(child.id.as_str()) {
            visit(children, &child.id, depth + 1, path, rows);
            path.remove(child.id.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use fusion_props_model::IdRef;

    use super::*;

    fn occurrence(parent: &str, id: &str) -> Occurrence {
        Occurrence {
            parent_component_version: Some(IdRef { id: parent.to_string() }),
            component_version: ComponentVersionSummary {
                id: id.to_string(),
                name: Some(format!("part {id}")),
                part_number: None,
                material_name: None,
                last_modified_on: None,
                component: None,
            },
        }
    }

    #[test]
    fn depth_first_with_indentation() {
        let occurrences = vec![
            occurrence("root", "a"),
            occurrence("a", "a1"),
            occurrence("root", "b"),
            occurrence("a1", "a1x"),
        ];

        let rows = flatten_assembly(&occurrences, "root");
        let flat: Vec<(&str, u32)> = rows
            .iter()
            .map(|row| (row.component_version.id.as_str(), row.indent))
            .collect();

        assert_eq!(flat, [("a", 10), ("a1", 30), ("a1x", 50), ("b", 10)]);
    }

    #[test]
    fn repeated_subassembly_is_listed_under_each_parent() {
        let occurrences = vec![
            occurrence("root", "a"),
            occurrence("root", "b"),
            occurrence("a", "bolt"),
            occurrence("b", "bolt"),
        ];

        let ids: Vec<String> = flatten_assembly(&occurrences, "root")
            .into_iter()
            .map(|row| row.component_version.id)
            .collect();

        assert_eq!(ids, ["a", "bolt", "b", "bolt"]);
    }

    #[test]
    fn cycles_terminate() {
        let occurrences = vec![occurrence("root", "a"), occurrence("a", "root")];

        let rows = flatten_assembly(&occurrences, "root");

        assert_eq!(rows.len(), 2);
    }
}
