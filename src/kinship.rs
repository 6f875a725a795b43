use generational_arena::Index;
use std::fmt;
use tracing::trace;

/// Outcome of classifying the relationship between two members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kinship {
    /// Both names resolved to the same node
    Same,
    /// One member is a direct ancestor/descendant of the other, at any
    /// generational distance
    DirectLine { removal: usize },
    /// Cousins of the given degree (0 = shared parent level, 1 = first
    /// cousins, 2 = second cousins)
    Cousins { degree: usize, removal: usize },
    /// No classification rule matched. Happens for trees deeper or more
    /// irregular than the rules cover; an in-band result, not an error.
    Unclassified,
}

impl Kinship {
    /// Cousin degree, with -1 for identity and direct lineage. None when
    /// unclassified.
    pub fn degree(&self) -> Option<i64> {
        match self {
            Kinship::Same | Kinship::DirectLine { .. } => Some(-1),
            Kinship::Cousins { degree, .. } => Some(*degree as i64),
            Kinship::Unclassified => None,
        }
    }

    /// Absolute depth difference between the two members. None when
    /// unclassified.
    pub fn removal(&self) -> Option<usize> {
        match self {
            Kinship::Same => Some(0),
            Kinship::DirectLine { removal } | Kinship::Cousins { removal, .. } => Some(*removal),
            Kinship::Unclassified => None,
        }
    }

    /// The `(degree, removal)` pair view, None when unclassified.
    pub fn as_pair(&self) -> Option<(i64, usize)> {
        Some((self.degree()?, self.removal()?))
    }
}

impl fmt::Display for Kinship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kinship::Same => write!(f, "same person"),
            Kinship::DirectLine { removal } => write!(f, "non cousin, {} removed", removal),
            Kinship::Cousins { degree, removal } => {
                let word = match degree {
                    0 => "zeroth",
                    1 => "first",
                    2 => "second",
                    _ => "distant",
                };
                write!(f, "{} cousin, {} removed", word, removal)
            }
            Kinship::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Decision table for the cousin degree, over the two ancestor chains with
/// the root removed and both truncated to the shorter length.
///
/// Rows are keyed on (truncated length, identity of the first and second
/// chain positions). Coverage stops at second cousins in trees up to four
/// generations; anything else yields None. A general formula exists (degree =
/// min distance to the lowest common ancestor, minus one) but deviates from
/// this table on the covered cases, so the table is authoritative.
pub(crate) fn degree_from_chains(a: &[Index], b: &[Index]) -> Option<usize> {
    debug_assert_eq!(a.len(), b.len());

    let degree = match (a, b) {
        // One generation below the root on the shorter side
        ([_], [_]) => Some(0),
        // Shared parent-level ancestor, at most two generations deep
        ([a0, _], [b0, _]) if a0 == b0 => Some(0),
        // Distinct children of the root two generations deep
        ([a0, _], [b0, _]) if a0 != b0 => Some(1),
        // Same child of the root, distinct grandparent-level ancestors
        ([a0, a1, _], [b0, b1, _]) if a0 == b0 && a1 != b1 => Some(1),
        // Distinct children of the root and distinct grandparent-level ancestors
        ([a0, a1, _], [b0, b1, _]) if a0 != b0 && a1 != b1 => Some(2),
        _ => None,
    };

    trace!(len = a.len(), ?degree, "degree table lookup");
    degree
}

#[cfg(test)]
mod tests {
    use super::*;
    use generational_arena::Arena;

    fn indices(n: usize) -> Vec<Index> {
        let mut arena = Arena::new();
        (0..n).map(|i| arena.insert(i)).collect()
    }

    #[test]
    fn test_length_one_is_always_zeroth() {
        let ix = indices(2);
        assert_eq!(degree_from_chains(&[ix[0]], &[ix[0]]), Some(0));
        assert_eq!(degree_from_chains(&[ix[0]], &[ix[1]]), Some(0));
    }

    #[test]
    fn test_length_two_splits_on_first_position() {
        let ix = indices(4);
        assert_eq!(degree_from_chains(&[ix[0], ix[1]], &[ix[0], ix[2]]), Some(0));
        assert_eq!(degree_from_chains(&[ix[0], ix[1]], &[ix[2], ix[3]]), Some(1));
    }

    #[test]
    fn test_length_three_splits_on_second_position() {
        let ix = indices(6);
        // same root child, different grandparent level
        assert_eq!(
            degree_from_chains(&[ix[0], ix[1], ix[2]], &[ix[0], ix[3], ix[4]]),
            Some(1)
        );
        // different root children, different grandparent level
        assert_eq!(
            degree_from_chains(&[ix[0], ix[1], ix[2]], &[ix[5], ix[3], ix[4]]),
            Some(2)
        );
        // agreeing grandparent level falls through
        assert_eq!(
            degree_from_chains(&[ix[0], ix[1], ix[2]], &[ix[0], ix[1], ix[4]]),
            None
        );
    }

    #[test]
    fn test_length_four_falls_through() {
        let ix = indices(8);
        assert_eq!(
            degree_from_chains(&ix[0..4], &ix[4..8]),
            None
        );
    }
}
