use std::collections::HashMap;

#[derive(Debug, PartialEq)]
pub enum TrieLookupResult {
    None,
    Prefix,
    /// Entry index into the owning table.
    Exact(usize),
    ExactAndPrefix(usize),
}

#[derive(Debug)]
struct Node {
    children: HashMap<u8, Node>,
    entry: Option<usize>,
}

impl Node {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            entry: None,
        }
    }
}

/// Byte trie over roman keys.
#[derive(Debug)]
pub struct RomanTrie {
    root: Node,
}

impl RomanTrie {
    pub fn new() -> Self {
        Self { root: Node::new() }
    }

    /// Insert `roman` → `entry`. Returns false (and keeps the existing entry)
    /// if the key is already present.
    pub fn insert(&mut self, roman: &str, entry: usize) -> bool {
        let mut node = &mut self.root;
        for &b in roman.as_bytes() {
            node = node.children.entry(b).or_insert_with(Node::new);
        }
        if node.entry.is_some() {
            return false;
        }
        node.entry = Some(entry);
        true
    }

    pub fn lookup(&self, roman: &str) -> TrieLookupResult {
        let mut node = &self.root;
        for &b in roman.as_bytes() {
            match node.children.get(&b) {
                Some(child) => node = child,
                None => return TrieLookupResult::None,
            }
        }
        let has_children = !node.children.is_empty();
        match node.entry {
            Some(id) if has_children => TrieLookupResult::ExactAndPrefix(id),
            Some(id) => TrieLookupResult::Exact(id),
            None if has_children => TrieLookupResult::Prefix,
            None => TrieLookupResult::None,
        }
    }

    /// Longest key that is a prefix of `input`: `(byte length, entry index)`.
    pub fn longest_match(&self, input: &str) -> Option<(usize, usize)> {
        let mut node = &self.root;
        let mut best = None;
        for (i, &b) in input.as_bytes().iter().enumerate() {
            match node.children.get(&b) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(id) = node.entry {
                best = Some((i + 1, id));
            }
        }
        best
    }
}

impl Default for RomanTrie {
    fn default() -> Self {
        Self::new()
    }
}
