//! A disjoint-set forest over the contiguous ids `0..n`.
use crate::array::VecArray;

#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
    components: usize,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            components: n,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn components(&self) -> usize {
        self.components
    }

    /// Find the representative of `x`, compressing the path from `x` to it.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the classes of `x` and `y`, returning the root of the merged class and the root that
    /// was absorbed into it (or `None` if they were already equal).
    pub fn union(&mut self, x: usize, y: usize) -> (usize, Option<usize>) {
        let root_x = self.find(x);
        let root_y = self.find(y);
        if root_x == root_y {
            return (root_x, None);
        }

        let (root, parent) = if self.size[root_x] >= self.size[root_y] {
            (root_y, root_x)
        } else {
            (root_x, root_y)
        };

        self.parent[root] = parent;
        self.size[parent] += self.size[root];
        self.components -= 1;
        (parent, Some(root))
    }

    pub fn same(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Label every element with its class, numbering classes `0..components` in order of
    /// their first element.
    pub fn labels(&mut self) -> VecArray<usize> {
        let n = self.len();
        let mut label_of_root = vec![usize::MAX; n];
        let mut next = 0;
        let mut labels = Vec::with_capacity(n);
        for x in 0..n {
            let r = self.find(x);
            if label_of_root[r] == usize::MAX {
                label_of_root[r] = next;
                next += 1;
            }
            labels.push(label_of_root[r]);
        }
        VecArray(labels)
    }
}

/// Find connected components of a graph stored as a pair of arrays of nodes,
/// interpreted as a list of edges `sources[i] → targets[i]`.
///
/// Returns a labelling of the nodes by component, and the number of components.
///
/// # Panics
///
/// * `sources.len() != targets.len()`
/// * When any `sources[i] >= n` or `targets[i] >= n`
pub fn connected_components(
    sources: &[usize],
    targets: &[usize],
    n: usize,
) -> (VecArray<usize>, usize) {
    // Must have equal sized arrays
    assert_eq!(sources.len(), targets.len());
    let mut uf = UnionFind::new(n);
    for (&s, &t) in sources.iter().zip(targets) {
        uf.union(s, t);
    }
    let components = uf.components();
    (uf.labels(), components)
}
