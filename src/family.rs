use std::collections::HashMap;

use generational_arena::Index;
use itertools::Itertools;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::arena::FamilyArena;
use crate::errors::{FamilyError, FamilyResult};
use crate::kinship::{degree_from_chains, Kinship};

/// A whole genealogy: the arena of member nodes plus a name directory.
///
/// Built once by naming a founder and attaching named children to existing
/// members, then queried read-only. Names are expected to be globally unique;
/// a duplicate name silently replaces the directory entry while the earlier
/// node stays reachable from its parent.
#[derive(Debug)]
pub struct Family {
    arena: FamilyArena,
    /// Name lookup, one entry per name ever attached
    directory: HashMap<String, Index>,
    root: Index,
}

impl Family {
    /// Creates the family with its founder as the root member.
    #[instrument(level = "debug")]
    pub fn new(founder: &str) -> Self {
        let mut arena = FamilyArena::new();
        let root = arena.insert_member(founder, None);
        let mut directory = HashMap::new();
        directory.insert(founder.to_string(), root);
        Self {
            arena,
            directory,
            root,
        }
    }

    fn lookup(&self, name: &str) -> FamilyResult<Index> {
        self.directory
            .get(name)
            .copied()
            .ok_or_else(|| FamilyError::UnknownMember(name.to_string()))
    }

    /// Attaches children to an existing member, in the given order.
    ///
    /// Each name creates a fresh node, registers it in the directory and
    /// wires both parent/child link halves. Duplicate names within one call
    /// create distinct nodes sharing the name.
    #[instrument(level = "debug", skip(self))]
    pub fn attach_children(&mut self, parent_name: &str, child_names: &[&str]) -> FamilyResult<()> {
        let parent_idx = self.lookup(parent_name)?;
        debug!(
            parent = parent_name,
            children = %child_names.iter().join(", "),
            "attaching children"
        );

        for name in child_names {
            let child_idx = self.arena.insert_member(name, Some(parent_idx));
            self.directory.insert(name.to_string(), child_idx);
        }
        Ok(())
    }

    /// Whether `ancestor_name` is the *immediate* parent of `descendant_name`.
    /// One generation only; the name is kept for API compatibility.
    #[instrument(level = "debug", skip(self))]
    pub fn is_ancestor(&self, ancestor_name: &str, descendant_name: &str) -> FamilyResult<bool> {
        let ancestor = self.lookup(ancestor_name)?;
        let descendant = self.lookup(descendant_name)?;
        Ok(self.arena.is_parent_of(ancestor, descendant))
    }

    /// Whether `descendant_name` is an *immediate* child of `ancestor_name`,
    /// checked against the parent's children list. One generation only.
    #[instrument(level = "debug", skip(self))]
    pub fn is_descendant(&self, descendant_name: &str, ancestor_name: &str) -> FamilyResult<bool> {
        let descendant = self.lookup(descendant_name)?;
        let ancestor = self.lookup(ancestor_name)?;
        Ok(self
            .arena
            .get_member(ancestor)
            .map(|m| m.has_child(descendant))
            .unwrap_or(false))
    }

    /// Generational depth of a member: the root is -1, its children 0, their
    /// children 1, and so on.
    #[instrument(level = "debug", skip(self))]
    pub fn depth_of(&self, name: &str) -> FamilyResult<isize> {
        let idx = self.lookup(name)?;
        Ok(self.ancestor_chain(idx).len() as isize - 2)
    }

    /// Classifies the relationship between two members.
    ///
    /// Identity and direct lineage (at any distance) come first; otherwise
    /// the truncated ancestor chains are run through the cousin decision
    /// table. Pairs the table does not cover come back as
    /// `Kinship::Unclassified`. The removal is the absolute depth difference
    /// in every non-identity outcome.
    #[instrument(level = "debug", skip(self))]
    pub fn classify_relationship(&self, name_a: &str, name_b: &str) -> FamilyResult<Kinship> {
        let idx_a = self.lookup(name_a)?;
        let idx_b = self.lookup(name_b)?;

        if idx_a == idx_b {
            return Ok(Kinship::Same);
        }

        // Full chains from the root down to each node, inclusive
        let chain_a = self.ancestor_chain(idx_a);
        let chain_b = self.ancestor_chain(idx_b);
        let removal = chain_a.len().abs_diff(chain_b.len());

        let parent_a = self.arena.get_member(idx_a).and_then(|m| m.parent());
        let parent_b = self.arena.get_member(idx_b).and_then(|m| m.parent());
        if parent_a == parent_b {
            // Siblings, root's children included
            return Ok(Kinship::Cousins { degree: 0, removal });
        }
        if chain_a.contains(&idx_b) || chain_b.contains(&idx_a) {
            return Ok(Kinship::DirectLine { removal });
        }

        // Drop the shared root, truncate both chains to the shorter length
        let len = (chain_a.len() - 1).min(chain_b.len() - 1);
        let trunc_a = &chain_a[1..1 + len];
        let trunc_b = &chain_b[1..1 + len];

        Ok(match degree_from_chains(trunc_a, trunc_b) {
            Some(degree) => Kinship::Cousins { degree, removal },
            None => Kinship::Unclassified,
        })
    }

    /// Chain of arena indices from the root down to `idx`, both inclusive.
    /// Iterative walk over parent links.
    fn ancestor_chain(&self, idx: Index) -> Vec<Index> {
        let mut chain = Vec::new();
        let mut current = Some(idx);
        while let Some(i) = current {
            chain.push(i);
            current = self.arena.get_member(i).and_then(|m| m.parent());
        }
        chain.reverse();
        chain
    }

    /// All member names in preorder, founder first.
    pub fn member_names(&self) -> Vec<String> {
        self.arena.iter().map(|(_, m)| m.name.clone()).collect()
    }

    pub fn member_count(&self) -> usize {
        self.arena.member_count()
    }

    /// Printable tree of the whole family.
    pub fn render(&self) -> Tree<String> {
        self.arena.to_tree_string(self.root)
    }
}
