/// The branch a walk down the tree takes from a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Towards values strictly less than the node's.
    Left,
    /// Towards values greater than or equal to the node's.
    Right,
}

impl Direction {
    /// Where `value` belongs relative to a node holding `pivot`. Ties go right.
    pub(crate) fn towards<T: Ord>(value: &T, pivot: &T) -> Self {
        if value < pivot {
            Self::Left
        } else {
            Self::Right
        }
    }
}
