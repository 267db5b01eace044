//! Disjoint-set forest with per-root membership lists.
//!
//! Elements are created lazily the first time `find` or `join` sees them.
//! Ignored elements (the board edges) take part in connectivity like any
//! other element but never show up in a group's member list, so the lists
//! only ever contain real stones.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct UnionFind<T> {
    parent: HashMap<T, T>,
    rank: HashMap<T, u32>,
    /// Members of each set, keyed by the set's root
    groups: HashMap<T, Vec<T>>,
    ignored: HashSet<T>,
}

impl<T: Copy + Eq + Hash> Default for UnionFind<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Eq + Hash> UnionFind<T> {
    pub fn new() -> Self {
        Self {
            parent: HashMap::new(),
            rank: HashMap::new(),
            groups: HashMap::new(),
            ignored: HashSet::new(),
        }
    }

    /// Create a structure whose `ignored` elements never appear as members.
    pub fn with_ignored(ignored: impl IntoIterator<Item = T>) -> Self {
        let mut uf = Self::new();
        uf.set_ignored_elements(ignored);
        uf
    }

    /// Must be called before any of the ignored elements is first referenced;
    /// elements already materialized keep their current member list.
    pub fn set_ignored_elements(&mut self, ignored: impl IntoIterator<Item = T>) {
        self.ignored = ignored.into_iter().collect();
    }

    fn make_set(&mut self, x: T) {
        if self.parent.contains_key(&x) {
            return;
        }
        self.parent.insert(x, x);
        self.rank.insert(x, 0);
        let members = if self.ignored.contains(&x) {
            Vec::new()
        } else {
            vec![x]
        };
        self.groups.insert(x, members);
    }

    /// Representative of the set containing `x`, creating `x` if needed.
    ///
    /// Each step relinks the current element to its grandparent.
    pub fn find(&mut self, x: T) -> T {
        self.make_set(x);

        let mut current = x;
        loop {
            let parent = self.parent[&current];
            if parent == current {
                return current;
            }
            let grandparent = self.parent[&parent];
            if grandparent == parent {
                return parent;
            }
            self.parent.insert(current, grandparent);
            current = grandparent;
        }
    }

    /// Representative of the set containing `x` without touching the forest.
    /// An element never referenced before is its own representative.
    pub fn root(&self, x: T) -> T {
        let mut current = x;
        while let Some(&parent) = self.parent.get(&current) {
            if parent == current {
                break;
            }
            current = parent;
        }
        current
    }

    /// Merge the sets of `x` and `y`. Returns false if they were already joined.
    pub fn join(&mut self, x: T, y: T) -> bool {
        let rep_x = self.find(x);
        let rep_y = self.find(y);

        if rep_x == rep_y {
            return false;
        }

        let rank_x = self.rank[&rep_x];
        let rank_y = self.rank[&rep_y];
        let (root, absorbed) = if rank_x > rank_y {
            (rep_x, rep_y)
        } else {
            (rep_y, rep_x)
        };
        if rank_x == rank_y {
            *self.rank.entry(root).or_insert(0) += 1;
        }

        self.parent.insert(absorbed, root);
        let members = self.groups.remove(&absorbed).unwrap_or_default();
        self.groups.entry(root).or_default().extend(members);

        true
    }

    #[inline]
    pub fn connected(&self, x: T, y: T) -> bool {
        self.root(x) == self.root(y)
    }

    /// Current sets, keyed by root. Ignored elements are absent from the lists.
    pub fn groups(&self) -> &HashMap<T, Vec<T>> {
        &self.groups
    }

    /// Members of the set containing `x`.
    pub fn group_of(&self, x: T) -> &[T] {
        self.groups
            .get(&self.root(x))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of elements referenced so far, ignored ones included.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}
