/*
 * Quadtree Module
 *
 * Region quadtree used for neighbor lookups. Each node covers a fixed
 * rectangle and is either a leaf holding entries or an internal node with
 * exactly four children. A leaf that reaches its capacity splits into four
 * equal quadrants and pushes its entries down.
 *
 * The tree never owns the boids themselves. Entries carry a copy of the
 * position at insertion time plus a handle (the flock stores indices into its
 * population), so the tree is rebuilt from scratch on a fixed cadence instead
 * of being kept in sync while boids move.
 */

use nannou::prelude::*;

use crate::bound::Bound;

// Nodes whose width or height is at or below this never split further
pub const MIN_SPLIT_EXTENT: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<T> {
    pub position: Vec2,
    pub item: T,
}

#[derive(Debug, Clone)]
enum Node<T> {
    Leaf(Vec<Entry<T>>),
    // top-left, top-right, bottom-left, bottom-right
    Internal(Box<[QuadTree<T>; 4]>),
}

#[derive(Debug, Clone)]
pub struct QuadTree<T> {
    bound: Bound,
    capacity: usize,
    node: Node<T>,
}

impl<T> QuadTree<T> {
    pub fn new(capacity: usize, bound: Bound) -> Self {
        Self {
            bound,
            capacity: capacity.max(1),
            node: Node::Leaf(Vec::with_capacity(capacity)),
        }
    }

    pub fn bound(&self) -> Bound {
        self.bound
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node, Node::Leaf(_))
    }

    // Insert an entry. Positions outside the root bound are silently dropped.
    pub fn insert(&mut self, position: Vec2, item: T) {
        if !self.bound.contains(position) {
            return;
        }
        self.insert_entry(Entry { position, item });
    }

    // Routing below the root relies on the midpoint rule alone, so an entry on
    // a shared edge can never be rejected by both children.
    fn insert_entry(&mut self, entry: Entry<T>) {
        let quadrant = self.quadrant_of(entry.position);
        match &mut self.node {
            Node::Internal(children) => children[quadrant].insert_entry(entry),
            Node::Leaf(objects) => {
                objects.push(entry);
                if objects.len() >= self.capacity {
                    self.subdivide();
                }
            }
        }
    }

    // 0 = top-left, 1 = top-right, 2 = bottom-left, 3 = bottom-right.
    // Coordinates on the midpoint go right/bottom.
    #[inline]
    fn quadrant_of(&self, position: Vec2) -> usize {
        let mid = self.bound.midpoint();
        let right = (position.x >= mid.x) as usize;
        let bottom = (position.y >= mid.y) as usize;
        right + 2 * bottom
    }

    // Split a leaf into four quadrants and redistribute its entries.
    // Leaves too small to split keep growing past capacity instead.
    pub fn subdivide(&mut self) {
        if self.bound.w <= MIN_SPLIT_EXTENT || self.bound.h <= MIN_SPLIT_EXTENT {
            return;
        }

        let objects = match &mut self.node {
            Node::Leaf(objects) => std::mem::take(objects),
            Node::Internal(_) => return,
        };

        let capacity = self.capacity;
        let children = self.bound.quadrants().map(|bound| QuadTree::new(capacity, bound));
        self.node = Node::Internal(Box::new(children));

        for entry in objects {
            self.insert_entry(entry);
        }
    }

    // Visit every entry whose stored position lies inside `range`
    pub fn for_each_in<F>(&self, range: &Bound, visit: &mut F)
    where
        F: FnMut(&Entry<T>),
    {
        self.for_each_located_in(range, &|entry: &Entry<T>| entry.position, visit);
    }

    // Node pruning uses the bounds the entries were filed under at insertion,
    // but the leaf test uses `locate`, so items that have moved since are
    // matched on where they are now. An item that has left its leaf's bound is
    // only found while the range still overlaps that leaf.
    pub fn for_each_located_in<L, F>(&self, range: &Bound, locate: &L, visit: &mut F)
    where
        L: Fn(&Entry<T>) -> Vec2,
        F: FnMut(&Entry<T>),
    {
        if !self.bound.intersects(range) {
            return;
        }

        match &self.node {
            Node::Internal(children) => {
                for child in children.iter() {
                    child.for_each_located_in(range, locate, visit);
                }
            }
            Node::Leaf(objects) => {
                for entry in objects.iter().filter(|entry| range.contains(locate(entry))) {
                    visit(entry);
                }
            }
        }
    }

    // Visit every entry in the tree, in top-left, top-right, bottom-left, bottom-right order
    pub fn for_each<F>(&self, visit: &mut F)
    where
        F: FnMut(&Entry<T>),
    {
        match &self.node {
            Node::Internal(children) => {
                for child in children.iter() {
                    child.for_each(visit);
                }
            }
            Node::Leaf(objects) => objects.iter().for_each(|entry| visit(entry)),
        }
    }

    // Visit the bound of every leaf (used to draw the partition)
    pub fn for_each_leaf_bound<F>(&self, visit: &mut F)
    where
        F: FnMut(Bound),
    {
        match &self.node {
            Node::Internal(children) => {
                for child in children.iter() {
                    child.for_each_leaf_bound(visit);
                }
            }
            Node::Leaf(_) => visit(self.bound),
        }
    }

    pub fn len(&self) -> usize {
        match &self.node {
            Node::Internal(children) => children.iter().map(QuadTree::len).sum(),
            Node::Leaf(objects) => objects.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn leaf_count(&self) -> usize {
        match &self.node {
            Node::Internal(children) => children.iter().map(QuadTree::leaf_count).sum(),
            Node::Leaf(_) => 1,
        }
    }

    // A lone leaf has depth 1
    pub fn depth(&self) -> usize {
        match &self.node {
            Node::Internal(children) => 1 + children.iter().map(QuadTree::depth).max().unwrap_or(0),
            Node::Leaf(_) => 1,
        }
    }
}

impl<T: Clone> QuadTree<T> {
    pub fn query(&self, range: &Bound) -> Vec<T> {
        let mut found = Vec::new();
        self.query_into(range, &mut found);
        found
    }

    // Appends to `found` without clearing it, so callers can reuse a buffer
    pub fn query_into(&self, range: &Bound, found: &mut Vec<T>) {
        self.for_each_in(range, &mut |entry: &Entry<T>| found.push(entry.item.clone()));
    }

    // Like `query_into`, but matches each item at the position `locate` reports for it
    pub fn query_located_into<L>(&self, range: &Bound, locate: &L, found: &mut Vec<T>)
    where
        L: Fn(&T) -> Vec2,
    {
        self.for_each_located_in(
            range,
            &|entry: &Entry<T>| locate(&entry.item),
            &mut |entry: &Entry<T>| found.push(entry.item.clone()),
        );
    }

    // Flatten the whole tree back into a list of entries
    pub fn entries(&self) -> Vec<Entry<T>> {
        let mut entries = Vec::with_capacity(self.len());
        self.for_each(&mut |entry: &Entry<T>| entries.push(entry.clone()));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Bound {
        Bound::new(0.0, 0.0, 800.0, 400.0)
    }

    #[test]
    fn new_tree_is_an_empty_leaf() {
        let tree: QuadTree<usize> = QuadTree::new(5, viewport());
        assert!(tree.is_leaf());
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn out_of_bound_insert_is_ignored() {
        let mut tree = QuadTree::new(5, viewport());
        tree.insert(vec2(-1.0, 10.0), 0usize);
        tree.insert(vec2(10.0, 400.5), 1usize);
        tree.insert(vec2(801.0, 0.0), 2usize);
        assert!(tree.is_empty());

        tree.insert(vec2(800.0, 400.0), 3usize);
        assert_eq!(tree.query(&viewport()), vec![3]);
    }

    #[test]
    fn reaching_capacity_splits_the_leaf() {
        let mut tree = QuadTree::new(4, viewport());
        tree.insert(vec2(10.0, 10.0), 0usize);
        tree.insert(vec2(700.0, 10.0), 1usize);
        tree.insert(vec2(10.0, 300.0), 2usize);
        assert!(tree.is_leaf());

        tree.insert(vec2(700.0, 300.0), 3usize);
        assert!(!tree.is_leaf());
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.len(), 4);

        // Children are visited in tl, tr, bl, br order
        let order: Vec<usize> = tree.entries().into_iter().map(|entry| entry.item).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn midpoint_ties_route_right_and_down() {
        let mut tree = QuadTree::new(2, viewport());
        tree.insert(vec2(400.0, 200.0), 0usize);
        tree.insert(vec2(399.0, 199.0), 1usize);
        assert!(!tree.is_leaf());

        let bottom_right = Bound::new(400.0, 200.0, 400.0, 200.0);
        assert_eq!(tree.query(&bottom_right), vec![0]);
        let top_left = Bound::new(0.0, 0.0, 399.5, 199.5);
        assert_eq!(tree.query(&top_left), vec![1]);
    }

    #[test]
    fn coincident_points_stop_splitting_at_unit_size() {
        let mut tree = QuadTree::new(3, Bound::new(0.0, 0.0, 64.0, 64.0));
        for i in 0..1_000usize {
            tree.insert(vec2(17.0, 17.0), i);
        }
        assert_eq!(tree.len(), 1_000);
        // 64 -> 32 -> 16 -> 8 -> 4 -> 2 -> 1: six splits below the root
        assert_eq!(tree.depth(), 7);
        assert_eq!(tree.query(&Bound::centered(vec2(17.0, 17.0), 0.5)).len(), 1_000);
    }

    #[test]
    fn tiny_root_never_splits() {
        let mut tree = QuadTree::new(1, Bound::new(0.0, 0.0, 1.0, 1.0));
        tree.insert(vec2(0.5, 0.5), 0usize);
        tree.insert(vec2(0.2, 0.9), 1usize);
        assert!(tree.is_leaf());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn query_outside_the_tree_finds_nothing() {
        let mut tree = QuadTree::new(5, viewport());
        for i in 0..50usize {
            tree.insert(vec2(i as f32 * 10.0, i as f32 * 5.0), i);
        }
        assert!(tree.query(&Bound::new(900.0, 900.0, 10.0, 10.0)).is_empty());
    }

    #[test]
    fn query_into_appends_to_existing_results() {
        let mut tree = QuadTree::new(5, viewport());
        tree.insert(vec2(10.0, 10.0), 7usize);
        let mut found = vec![1usize];
        tree.query_into(&viewport(), &mut found);
        assert_eq!(found, vec![1, 7]);
    }

    #[test]
    fn located_query_matches_items_where_they_are_now() {
        let mut tree = QuadTree::new(5, viewport());
        tree.insert(vec2(10.0, 10.0), 0usize);
        tree.insert(vec2(20.0, 10.0), 1usize);
        let live = [vec2(100.0, 100.0), vec2(20.0, 10.0)];
        let locate = |&i: &usize| live[i];

        let mut found = Vec::new();
        tree.query_located_into(&Bound::new(90.0, 90.0, 20.0, 20.0), &locate, &mut found);
        assert_eq!(found, vec![0]);
        assert!(tree.query(&Bound::new(90.0, 90.0, 20.0, 20.0)).is_empty());

        found.clear();
        tree.query_located_into(&Bound::new(5.0, 5.0, 10.0, 10.0), &locate, &mut found);
        assert!(found.is_empty());
        assert_eq!(tree.query(&Bound::new(5.0, 5.0, 10.0, 10.0)), vec![0]);
    }

    #[test]
    fn leaf_bounds_cover_the_root_area() {
        let mut tree = QuadTree::new(2, viewport());
        for i in 0..40usize {
            tree.insert(vec2((i * 37 % 800) as f32, (i * 53 % 400) as f32), i);
        }
        let mut area = 0.0;
        let mut leaves = 0;
        tree.for_each_leaf_bound(&mut |bound: Bound| {
            area += bound.w * bound.h;
            leaves += 1;
        });
        assert_eq!(leaves, tree.leaf_count());
        assert!((area - 800.0 * 400.0).abs() < 1e-2);
    }
}
