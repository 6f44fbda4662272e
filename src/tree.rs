use crate::{
    error::CompressError,
    header::{FrequencyTable, Symbol},
    queue::{PriorityQueue, Weighted},
};

#[derive(Debug, PartialEq, Eq)]
pub enum HuffmanTree {
    Node(u64, Box<HuffmanTree>, Box<HuffmanTree>),
    Leaf(u64, Symbol),
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two lightest nodes. The first
    /// extracted node becomes the left child.
    ///
    /// Leaves are queued in ascending symbol order, so the same table always
    /// gives the same tree. A table with a single symbol gives a lone leaf.
    pub fn create(table: &FrequencyTable) -> Result<HuffmanTree, CompressError> {
        // Each merge removes one live node, so the queue never holds more
        // entries than there are distinct symbols.
        let mut queue = PriorityQueue::with_capacity(table.distinct());
        for (symbol, count) in table.symbols() {
            queue.insert(HuffmanTree::Leaf(count as u64, symbol));
        }

        loop {
            let Some(left) = queue.extract_min() else {
                return Err(CompressError::EmptyInput);
            };
            let Some(right) = queue.extract_min() else {
                return Ok(left);
            };
            queue.insert(HuffmanTree::Node(
                left.value() + right.value(),
                Box::new(left),
                Box::new(right),
            ));
        }
    }

    pub fn value(&self) -> u64 {
        match self {
            HuffmanTree::Leaf(count, _) => *count,
            HuffmanTree::Node(count, _, _) => *count,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffmanTree::Leaf(_, _))
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            HuffmanTree::Leaf(_, _) => 0,
            HuffmanTree::Node(_, left, right) => 1 + left.depth().max(right.depth()),
        }
    }
}

impl Weighted for HuffmanTree {
    fn weight(&self) -> u64 {
        self.value()
    }
}
