//! Disjoint-set forest used to locate the largest connected component.
//!
//! The graph builder treats every parsed edge as an undirected relation and
//! keeps only the nodes in the biggest resulting class. Roots are attached
//! under one another by a fair coin flip rather than by size or rank; sizes
//! are still folded into the surviving root so the largest-class record is
//! always exact.

use std::{collections::HashMap, collections::HashSet, hash::Hash};

use crate::rng::RandomSource;

#[derive(Clone, Debug)]
struct ForestNode<T> {
    value: T,
    parent: Option<usize>,
    size: usize,
}

/// Union-find over arbitrary hashable elements.
///
/// Elements are indexed in the order they are supplied. Before any union the
/// largest class is the first element on its own.
///
/// # Examples
/// ```
/// use coreper_core::{DisjointSetForest, RandomSource};
///
/// let mut rng = RandomSource::from_seed(1);
/// let mut forest = DisjointSetForest::new(["a", "b", "c", "d"]);
/// forest.union(&"a", &"b", &mut rng);
/// forest.union(&"b", &"c", &mut rng);
/// assert_eq!(forest.largest_class_size(), 3);
/// assert!(!forest.largest_class().contains("d"));
/// ```
#[derive(Clone, Debug)]
pub struct DisjointSetForest<T> {
    index: HashMap<T, usize>,
    nodes: Vec<ForestNode<T>>,
    largest_root: usize,
    largest_size: usize,
}

impl<T> DisjointSetForest<T>
where
    T: Eq + Hash + Clone,
{
    /// Creates one singleton class per distinct element.
    pub fn new(elements: impl IntoIterator<Item = T>) -> Self {
        let mut index = HashMap::new();
        let mut nodes = Vec::new();
        for value in elements {
            if index.contains_key(&value) {
                continue;
            }
            index.insert(value.clone(), nodes.len());
            nodes.push(ForestNode {
                value,
                parent: None,
                size: 1,
            });
        }
        let largest_size = usize::from(!nodes.is_empty());
        Self {
            index,
            nodes,
            largest_root: 0,
            largest_size,
        }
    }

    /// Returns the number of elements in the forest.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the forest holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the size of the largest class seen so far.
    #[must_use]
    pub fn largest_class_size(&self) -> usize {
        self.largest_size
    }

    /// Returns the root index of the class containing element `node`.
    ///
    /// Every node visited on the way up is repointed directly at the root.
    pub fn find_root(&mut self, node: usize) -> usize {
        let mut root = node;
        while let Some(parent) = self.nodes[root].parent {
            root = parent;
        }

        let mut current = node;
        while let Some(parent) = self.nodes[current].parent {
            self.nodes[current].parent = Some(root);
            current = parent;
        }

        root
    }

    /// Merges the classes of `left` and `right`.
    ///
    /// Returns `false` when the two were already in the same class or when
    /// either element is not part of the forest.
    pub fn union(&mut self, left: &T, right: &T, rng: &mut RandomSource) -> bool {
        let (Some(&left), Some(&right)) = (self.index.get(left), self.index.get(right)) else {
            return false;
        };
        let left_root = self.find_root(left);
        let right_root = self.find_root(right);
        if left_root == right_root {
            return false;
        }

        let (child, parent) = if rng.coin_flip() {
            (left_root, right_root)
        } else {
            (right_root, left_root)
        };
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].size += self.nodes[child].size;

        if self.nodes[parent].size > self.largest_size {
            self.largest_root = parent;
            self.largest_size = self.nodes[parent].size;
        }
        true
    }

    /// Collects every element belonging to the largest class.
    pub fn largest_class(&mut self) -> HashSet<T> {
        let mut members = HashSet::with_capacity(self.largest_size);
        for node in 0..self.nodes.len() {
            if self.find_root(node) == self.largest_root {
                members.insert(self.nodes[node].value.clone());
            }
        }
        members
    }
}

/// Returns the elements of the largest class induced by `relations`.
///
/// Relations mentioning elements outside `elements` are ignored. An empty
/// element set yields an empty result without touching the relations.
///
/// # Examples
/// ```
/// use coreper_core::{RandomSource, largest_component};
///
/// let mut rng = RandomSource::from_seed(3);
/// let component = largest_component(
///     [1, 2, 3, 4, 5],
///     &[(1, 2), (4, 5), (2, 3)],
///     &mut rng,
/// );
/// assert_eq!(component.len(), 3);
/// assert!(component.contains(&3));
/// ```
pub fn largest_component<T>(
    elements: impl IntoIterator<Item = T>,
    relations: &[(T, T)],
    rng: &mut RandomSource,
) -> HashSet<T>
where
    T: Eq + Hash + Clone,
{
    let mut forest = DisjointSetForest::new(elements);
    if forest.is_empty() {
        return HashSet::new();
    }
    for (left, right) in relations {
        forest.union(left, right, rng);
    }
    forest.largest_class()
}
