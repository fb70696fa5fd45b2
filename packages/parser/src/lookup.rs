//! Path lookup
//!
//! A path is a sequence of child names followed from the root through each
//! group's index. The empty path resolves to the root.

use crate::ast::{GroupTree, Leaf, NodeId};
use crate::error::LookupError;

impl GroupTree {
    /// Resolve `path` to a node handle, failing at the first missing key.
    pub fn find<I, S>(&self, path: I) -> Result<NodeId, LookupError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = self.root();
        for (position, key) in path.into_iter().enumerate() {
            let key = key.as_ref();
            current = self
                .child(current, key)
                .ok_or_else(|| LookupError::NotFound {
                    key: key.to_string(),
                    position,
                })?;
        }
        Ok(current)
    }

    /// Resolve `path` to a leaf whose value may be edited in place.
    pub fn find_leaf_mut<I, S>(&mut self, path: I) -> Result<&mut Leaf, LookupError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let id = self.find(path)?;
        let display = self.path_of(id).join(" / ");
        self.node_mut(id)
            .as_leaf_mut()
            .ok_or(LookupError::NotALeaf { path: display })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Scalar, Value};
    use crate::parser::parse;

    const SOURCE: &str = "Group ApplyNumSettings\n{\n\tGroup Default\n\t{\n\t\tbasis 4 4 4\n\t}\n}";

    #[test]
    fn test_find_nested_leaf() {
        let tree = parse(SOURCE).unwrap();
        let id = tree.find(["ApplyNumSettings", "Default", "basis"]).unwrap();
        assert_eq!(
            tree.node(id).value(),
            Some(&Value::List(vec![Scalar::Integer(4); 3]))
        );
    }

    #[test]
    fn test_empty_path_is_root() {
        let tree = parse(SOURCE).unwrap();
        let empty: [&str; 0] = [];
        assert_eq!(tree.find(empty).unwrap(), tree.root());
    }

    #[test]
    fn test_missing_key_reports_first_unresolved() {
        let tree = parse(SOURCE).unwrap();
        let error = tree.find(["ApplyNumSettings", "Z", "basis"]).unwrap_err();
        assert_eq!(
            error,
            LookupError::NotFound {
                key: "Z".to_string(),
                position: 1,
            }
        );
    }

    #[test]
    fn test_path_through_leaf_is_not_found() {
        let tree = parse(SOURCE).unwrap();
        let error = tree
            .find(["ApplyNumSettings", "Default", "basis", "deeper"])
            .unwrap_err();
        assert!(matches!(error, LookupError::NotFound { position: 3, .. }));
    }

    #[test]
    fn test_edit_leaf_in_place() {
        let mut tree = parse(SOURCE).unwrap();
        let leaf = tree
            .find_leaf_mut(vec!["ApplyNumSettings".to_string(), "Default".to_string(), "basis".to_string()])
            .unwrap();
        leaf.value = Value::List(vec![Scalar::Integer(11), Scalar::Integer(22)]);

        let id = tree.find(["ApplyNumSettings", "Default", "basis"]).unwrap();
        assert_eq!(tree.node(id).value().unwrap().to_string(), "11\t22");
    }

    #[test]
    fn test_edit_group_is_rejected() {
        let mut tree = parse(SOURCE).unwrap();
        let error = tree.find_leaf_mut(["ApplyNumSettings", "Default"]).unwrap_err();
        assert_eq!(
            error,
            LookupError::NotALeaf {
                path: "ApplyNumSettings / Default".to_string(),
            }
        );
    }
}
