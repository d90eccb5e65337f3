use std::{collections::BTreeSet, hash::Hash};

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;
/// Sets whose iteration order is the natural order of the elements. Used wherever a set
/// of states has to be turned into a reproducible name.
pub type OrderedSet<S> = BTreeSet<S>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A partition groups elements of type `I` into pairwise disjoint, non-empty blocks. The
/// position of a block in the partition is its block index.
#[derive(Debug, Clone)]
pub struct Partition<I: Hash + Eq>(Vec<BTreeSet<I>>);

impl<I: Hash + Eq> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Hash + Eq> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Hash + Eq> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Hash + Eq> Eq for Partition<I> {}

impl<I: Hash + Eq + Ord> Partition<I> {
    /// Returns the size of the partition, i.e. the number of blocks.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a partition from an iterator that yields iterators over the elements of
    /// each block. Empty blocks are dropped.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .filter(|block| !block.is_empty())
                .collect(),
        )
    }

    /// Returns the index of the block containing `element`, if any.
    pub fn block_of<Q>(&self, element: &Q) -> Option<usize>
    where
        I: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.iter().position(|block| block.contains(element))
    }

    /// Builds a lookup table from elements to their block index.
    pub fn index(&self) -> Map<&I, usize> {
        self.0
            .iter()
            .enumerate()
            .flat_map(|(i, block)| block.iter().map(move |x| (x, i)))
            .collect()
    }
}

impl<I: Hash + Eq + Ord> From<Vec<BTreeSet<I>>> for Partition<I> {
    fn from(value: Vec<BTreeSet<I>>) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::Partition;

    #[test]
    fn partition_drops_empty_blocks() {
        let partition = Partition::new([vec![1, 2], vec![], vec![3]]);
        assert_eq!(partition.size(), 2);
        assert_eq!(partition.block_of(&3), Some(1));
        assert_eq!(partition.block_of(&4), None);
        assert_eq!(partition, Partition::new([vec![3], vec![2, 1]]));

        let converted = Partition::from(vec![BTreeSet::from([1, 2]), BTreeSet::new()]);
        assert_eq!(converted.size(), 1);
    }
}
