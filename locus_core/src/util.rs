//! Path, tree and map helpers

use crate::{Result, error::ValidationError, platform::normalize_separators};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::path::{MAIN_SEPARATOR, is_separator};

/// Split `path` into its directory, file name without extension, and extension
///
/// Pure string work, no filesystem access. The extension keeps its leading
/// dot; leading dots of a file name never start an extension, so
/// `".bashrc"` has none while `"file."` has `"."`.
pub fn split_path_root_file_ext(path: &str) -> (String, String, String) {
    let (head, tail) = split_head_tail(path);
    let (stem, extension) = split_extension(tail);
    (head.to_string(), stem.to_string(), extension.to_string())
}

fn split_head_tail(path: &str) -> (&str, &str) {
    let tail_start = path
        .char_indices()
        .filter(|(_, c)| is_separator(*c))
        .last()
        .map_or(0, |(index, c)| index + c.len_utf8());

    let (head, tail) = path.split_at(tail_start);
    let trimmed = head.trim_end_matches(is_separator);

    // A head made only of separators is the root and stays as is
    if trimmed.is_empty() {
        (head, tail)
    } else {
        (trimmed, tail)
    }
}

fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) if name[..dot].chars().any(|c| c != '.') => name.split_at(dot),
        _ => (name, ""),
    }
}

/// Lazy depth-first, pre-order walk of a tree
///
/// Created by [`flatten`].
pub struct Flatten<T, F, C: IntoIterator> {
    root: Option<T>,
    /// Last yielded node whose children have not been asked for yet
    expand: Option<T>,
    stack: Vec<C::IntoIter>,
    get_children: F,
}

/// Walk `node` and, recursively, everything `get_children` returns for it
///
/// Each node is yielded before its children. `get_children` runs for a node
/// only once the walk moves past it, so taking a prefix never asks for more
/// children than it visits. No cycle detection is done: a cyclic child
/// relation produces an endless iterator. Call again for a fresh walk.
pub fn flatten<T, F, C>(node: T, get_children: F) -> Flatten<T, F, C>
where
    T: Clone,
    F: FnMut(&T) -> C,
    C: IntoIterator<Item = T>,
{
    Flatten {
        root: Some(node),
        expand: None,
        stack: Vec::new(),
        get_children,
    }
}

impl<T, F, C> Iterator for Flatten<T, F, C>
where
    T: Clone,
    F: FnMut(&T) -> C,
    C: IntoIterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(root) = self.root.take() {
            self.expand = Some(root.clone());
            return Some(root);
        }

        if let Some(parent) = self.expand.take() {
            self.stack.push((self.get_children)(&parent).into_iter());
        }

        loop {
            let children = self.stack.last_mut()?;
            match children.next() {
                Some(node) => {
                    self.expand = Some(node.clone());
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Invert `map` so its values become keys
///
/// Fails with a duplicate value error listing every original value when two
/// keys share a value, since one of them would be lost.
pub fn swap_keys_and_values<K, V>(map: &HashMap<K, V>) -> Result<HashMap<V, K>>
where
    K: Clone,
    V: Clone + Eq + Hash + Debug,
{
    let swapped: HashMap<V, K> = map
        .iter()
        .map(|(key, value)| (value.clone(), key.clone()))
        .collect();

    if swapped.len() != map.len() {
        let values = map.values().map(|value| format!("{value:?}")).collect();
        return Err(ValidationError::duplicate_value(values).into());
    }

    Ok(swapped)
}

/// Shorten `path` for display
///
/// On Windows `/` becomes `\`. The extension is dropped. If the result
/// starts with `leading` (the current directory when `None` or empty) that
/// prefix is removed, then separators are trimmed from both ends.
pub fn prettify_path(path: &str, leading: Option<&str>) -> Result<String> {
    let leading = match leading.filter(|l| !l.is_empty()) {
        Some(leading) => normalize_separators(leading),
        None => normalize_separators(&std::env::current_dir()?.to_string_lossy()),
    };

    let normalized = normalize_separators(path);
    let (_, tail) = split_head_tail(&normalized);
    let (stem, _) = split_extension(tail);
    let without_extension = &normalized[..normalized.len() - tail.len() + stem.len()];

    let shortened = without_extension
        .strip_prefix(leading.as_str())
        .unwrap_or(without_extension);

    Ok(shortened.trim_matches(MAIN_SEPARATOR).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(path: &str) -> (String, String, String) {
        split_path_root_file_ext(path)
    }

    fn owned(parts: (&str, &str, &str)) -> (String, String, String) {
        (parts.0.to_string(), parts.1.to_string(), parts.2.to_string())
    }

    #[cfg(not(windows))]
    #[test]
    fn test_split_path_root_file_ext() {
        assert_eq!(split("/home/user/mod.py"), owned(("/home/user", "mod", ".py")));
        assert_eq!(split("mod.py"), owned(("", "mod", ".py")));
        assert_eq!(split("/mod.py"), owned(("/", "mod", ".py")));
        assert_eq!(split("pkg//mod.tar.gz"), owned(("pkg", "mod.tar", ".gz")));
        assert_eq!(split("pkg/"), owned(("pkg", "", "")));
        assert_eq!(split("pkg/Makefile"), owned(("pkg", "Makefile", "")));
    }

    #[test]
    fn test_split_extension_edge_cases() {
        assert_eq!(split(".bashrc"), owned(("", ".bashrc", "")));
        assert_eq!(split("..."), owned(("", "...", "")));
        assert_eq!(split("file."), owned(("", "file", ".")));
        assert_eq!(split("..hidden.py"), owned(("", "..hidden", ".py")));
        assert_eq!(split(""), owned(("", "", "")));
    }

    #[test]
    fn test_flatten_is_depth_first_pre_order() {
        let tree: HashMap<u32, Vec<u32>> =
            HashMap::from([(1, vec![2, 3]), (2, vec![4]), (3, vec![]), (4, vec![])]);

        let walked: Vec<u32> = flatten(1u32, |node| tree[node].clone()).collect();

        assert_eq!(walked, vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_flatten_leaf_yields_only_itself() {
        let walked: Vec<&str> = flatten("leaf", |_| Vec::new()).collect();

        assert_eq!(walked, vec!["leaf"]);
    }

    #[test]
    fn test_flatten_is_lazy_on_cyclic_graphs() {
        // 1 -> 2 -> 1 -> ... never ends, but taking a prefix is fine
        let walked: Vec<u32> = flatten(1u32, |node: &u32| vec![3 - node]).take(5).collect();

        assert_eq!(walked, vec![1, 2, 1, 2, 1]);
    }

    #[test]
    fn test_flatten_asks_for_children_only_when_advancing() {
        let calls = std::cell::Cell::new(0);
        let mut walk = flatten(1u32, |node: &u32| {
            calls.set(calls.get() + 1);
            vec![node * 10]
        });

        assert_eq!(walk.next(), Some(1));
        assert_eq!(calls.get(), 0);

        assert_eq!(walk.next(), Some(10));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_flatten_restarts_with_fresh_call() {
        let children = |node: &u32| if *node < 3 { vec![node + 1] } else { vec![] };

        let first: Vec<u32> = flatten(1, children).collect();
        let second: Vec<u32> = flatten(1, children).collect();

        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_swap_keys_and_values() {
        let map = HashMap::from([("a", 1), ("b", 2)]);

        let swapped = swap_keys_and_values(&map).unwrap();

        assert_eq!(swapped, HashMap::from([(1, "a"), (2, "b")]));
    }

    #[test]
    fn test_swap_keys_and_values_rejects_duplicates() {
        let map = HashMap::from([("a", 1), ("b", 1)]);

        let error = swap_keys_and_values(&map).unwrap_err();

        match error {
            crate::Error::Validation(ValidationError::DuplicateValue { values }) => {
                assert_eq!(values, vec!["1".to_string(), "1".to_string()]);
            }
            other => panic!("Expected DuplicateValue error, got {other:?}"),
        }
    }

    #[test]
    fn test_swap_empty_map() {
        let map: HashMap<String, String> = HashMap::new();

        assert!(swap_keys_and_values(&map).unwrap().is_empty());
    }

    #[cfg(not(windows))]
    #[test]
    fn test_prettify_path_with_leading() {
        assert_eq!(
            prettify_path("/home/user/proj/src/mod.py", Some("/home/user/proj")).unwrap(),
            "src/mod"
        );
        assert_eq!(
            prettify_path("/home/user/proj/src/mod.py", Some("/home/user/proj/")).unwrap(),
            "src/mod"
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn test_prettify_path_keeps_backslash_in_names() {
        assert_eq!(prettify_path("/proj/a\\b.py", Some("/proj")).unwrap(), "a\\b");
    }

    #[cfg(windows)]
    #[test]
    fn test_prettify_path_normalizes_separators() {
        assert_eq!(
            prettify_path("C:/proj/pkg/mod.py", Some("C:\\proj")).unwrap(),
            "pkg\\mod"
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn test_prettify_path_without_matching_prefix() {
        assert_eq!(
            prettify_path("/other/place/mod.py", Some("/home/user/proj")).unwrap(),
            "other/place/mod"
        );
        assert_eq!(prettify_path("pkg/archive.tar.gz", Some("/x")).unwrap(), "pkg/archive.tar");
    }

    #[cfg(not(windows))]
    #[test]
    fn test_prettify_path_only_strips_prefix() {
        assert_eq!(
            prettify_path("/proj/sub/proj/mod.py", Some("/proj")).unwrap(),
            "sub/proj/mod"
        );
    }

    #[test]
    fn test_prettify_path_defaults_to_current_directory() {
        let cwd = std::env::current_dir().unwrap();
        let path = cwd.join("pkg").join("mod.py");
        let expected = format!("pkg{MAIN_SEPARATOR}mod");

        assert_eq!(prettify_path(&path.to_string_lossy(), None).unwrap(), expected);
        assert_eq!(prettify_path(&path.to_string_lossy(), Some("")).unwrap(), expected);
    }
}
