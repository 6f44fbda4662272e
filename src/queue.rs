/// Anything that can be ordered by the priority queue.
pub trait Weighted {
    fn weight(&self) -> u64;
}

/// Array-backed binary min-heap ordered on [`Weighted::weight`].
///
/// Ties are resolved by the swap sequence of sift-up/sift-down and nothing
/// else, so the same insertion order always yields the same extraction order.
/// The tree builder relies on this to rebuild identical trees when decoding.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    nodes: Vec<T>,
}

impl<T: Weighted> PriorityQueue<T> {
    pub fn new() -> Self {
        PriorityQueue { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PriorityQueue {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn insert(&mut self, node: T) {
        self.nodes.push(node);
        self.sift_up(self.nodes.len() - 1);
    }

    /// Removes the node of minimum weight. The last node takes the root's
    /// place before sifting down.
    pub fn extract_min(&mut self) -> Option<T> {
        let last = self.nodes.pop()?;
        if self.nodes.is_empty() {
            return Some(last);
        }
        let min = std::mem::replace(&mut self.nodes[0], last);
        self.sift_down(0);
        Some(min)
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx != 0 {
            let parent = (idx - 1) / 2;
            if self.nodes[parent].weight() <= self.nodes[idx].weight() {
                break;
            }
            self.nodes.swap(parent, idx);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let size = self.nodes.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut smallest = idx;

            if left < size && self.nodes[left].weight() < self.nodes[smallest].weight() {
                smallest = left;
            }
            if right < size && self.nodes[right].weight() < self.nodes[smallest].weight() {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.nodes.swap(smallest, idx);
            idx = smallest;
        }
    }
}

impl<T: Weighted> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
