use std::fmt;

use itertools::Itertools;

use crate::{
    header::{Symbol, SYMBOLS},
    tree::HuffmanTree,
};

/// Upper bound on code length. A tree over 256 symbols is at most 255 deep.
pub const MAX_CODE_LENGTH: usize = 256;

/// Bit sequence of every symbol present in the tree, indexed by symbol.
///
/// Each bit is stored as a `0` or `1` byte, root first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Vec<u8>>; SYMBOLS],
}

impl CodeTable {
    pub fn create(tree: &HuffmanTree) -> Self {
        let mut table = CodeTable {
            codes: std::array::from_fn(|_| None),
        };
        let mut path = Vec::with_capacity(MAX_CODE_LENGTH);
        table.walk(tree, &mut path);
        table
    }

    fn walk(&mut self, node: &HuffmanTree, path: &mut Vec<u8>) {
        match node {
            HuffmanTree::Leaf(_, symbol) => {
                self.codes[*symbol as usize] = Some(path.clone());
            }
            HuffmanTree::Node(_, left, right) => {
                debug_assert!(path.len() < MAX_CODE_LENGTH);
                path.push(0);
                self.walk(left, path);
                path.pop();

                path.push(1);
                self.walk(right, path);
                path.pop();
            }
        }
    }

    /// Code of `symbol`, or `None` if it does not occur in the tree.
    pub fn get(&self, symbol: Symbol) -> Option<&[u8]> {
        self.codes[symbol as usize].as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &[u8])> + '_ {
        (0..=Symbol::MAX)
            .zip(self.codes.iter())
            .filter_map(|(symbol, code)| code.as_deref().map(|code| (symbol, code)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// One `symbol code` line per entry, shortest codes first.
impl fmt::Display for CodeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (symbol, code) in self
            .iter()
            .sorted_by_key(|(symbol, code)| (code.len(), *symbol))
        {
            writeln!(f, "{:#04x} {}", symbol, code.iter().join(""))?;
        }
        Ok(())
    }
}
