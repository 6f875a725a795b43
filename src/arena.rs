use generational_arena::{Arena, Index};
use std::fmt;
use termtree::Tree;
use tracing::instrument;

/// Tree node for a single family member.
///
/// Links are arena indices: the arena owns every node, parent references are
/// non-owning back-pointers, so the parent/child relation never turns into an
/// ownership cycle.
#[derive(Debug)]
pub struct Member {
    /// Identifying name of this member
    pub name: String,
    /// Index of the parent node in the arena, None for the founder
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in attachment order
    pub children: Vec<Index>,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Sets this node's parent back-reference only. The caller is responsible
    /// for also appending this node to the parent's children; the two link
    /// halves are separate operations (see `FamilyArena::insert_member`).
    pub fn set_parent(&mut self, parent: Index) {
        self.parent = Some(parent);
    }

    pub fn parent(&self) -> Option<Index> {
        self.parent
    }

    /// Appends `child` to the children sequence. Insertion order is preserved.
    pub fn add_child(&mut self, child: Index) {
        self.children.push(child);
    }

    /// Membership by node identity, not by name.
    pub fn has_child(&self, child: Index) -> bool {
        self.children.contains(&child)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Arena-based storage for one family tree.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
#[derive(Debug, Default)]
pub struct FamilyArena {
    /// Arena storage for all member nodes
    arena: Arena<Member>,
    /// Index of the founder node, None for an empty arena
    root: Option<Index>,
}

impl FamilyArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Inserts a member and wires both link halves: the new node's parent
    /// back-reference and the parent's children entry. A member inserted
    /// without a parent becomes the root.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_member(&mut self, name: &str, parent: Option<Index>) -> Index {
        let member_idx = self.arena.insert(Member::new(name));

        if let Some(parent_idx) = parent {
            if let Some(member) = self.arena.get_mut(member_idx) {
                member.set_parent(parent_idx);
            }
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.add_child(member_idx);
            }
        } else {
            self.root = Some(member_idx);
        }

        member_idx
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_member(&self, idx: Index) -> Option<&Member> {
        self.arena.get(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_member_mut(&mut self, idx: Index) -> Option<&mut Member> {
        self.arena.get_mut(idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn member_count(&self) -> usize {
        self.arena.len()
    }

    /// Whether `parent` is the immediate parent of `child`, by identity
    /// comparison of the child's parent link.
    #[instrument(level = "trace", skip(self))]
    pub fn is_parent_of(&self, parent: Index, child: Index) -> bool {
        self.arena
            .get(child)
            .map(|c| c.parent() == Some(parent))
            .unwrap_or(false)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> FamilyIterator {
        FamilyIterator::new(self)
    }

    /// Converts the subtree rooted at `idx` into a printable termtree.
    pub fn to_tree_string(&self, idx: Index) -> Tree<String> {
        match self.arena.get(idx) {
            Some(member) => {
                let leaves: Vec<_> = member
                    .children
                    .iter()
                    .map(|&c| self.to_tree_string(c))
                    .collect();
                Tree::new(member.name.clone()).with_leaves(leaves)
            }
            None => Tree::new(String::new()),
        }
    }
}

/// Preorder iterator over all members, root first, children left-to-right.
pub struct FamilyIterator<'a> {
    arena: &'a FamilyArena,
    stack: Vec<Index>,
}

impl<'a> FamilyIterator<'a> {
    fn new(arena: &'a FamilyArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for FamilyIterator<'a> {
    type Item = (Index, &'a Member);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(member) = self.arena.get_member(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in member.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, member));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_member_links_both_directions() {
        let mut arena = FamilyArena::new();
        let root = arena.insert_member("a", None);
        let child = arena.insert_member("b", Some(root));

        assert_eq!(arena.root(), Some(root));
        assert_eq!(arena.get_member(child).unwrap().parent(), Some(root));
        assert!(arena.get_member(root).unwrap().has_child(child));
        assert!(arena.is_parent_of(root, child));
        assert!(!arena.is_parent_of(child, root));
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut arena = FamilyArena::new();
        let root = arena.insert_member("a", None);
        let b = arena.insert_member("b", Some(root));
        let c = arena.insert_member("c", Some(root));

        assert_eq!(arena.get_member(root).unwrap().children, vec![b, c]);
    }

    #[test]
    fn test_iter_visits_all_members_preorder() {
        let mut arena = FamilyArena::new();
        let root = arena.insert_member("a", None);
        let b = arena.insert_member("b", Some(root));
        arena.insert_member("c", Some(root));
        arena.insert_member("d", Some(b));

        let names: Vec<_> = arena.iter().map(|(_, m)| m.name.clone()).collect();
        assert_eq!(names, vec!["a", "b", "d", "c"]);
    }
}
