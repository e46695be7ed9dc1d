//! List expansion
//!
//! A placeholder node is cloned once per item. Each clone is inserted right
//! before the placeholder, so clones appear in item order in the
//! placeholder's slot, and the placeholder is removed at the end.

use crate::{NodeMut, NodeRef, Result, Template};

impl Template {
    /// Expand `target` into one copy per item, then remove `target`.
    ///
    /// `f` runs on each clone after it has been attached. A parentless
    /// `target` makes the call a no-op; a stale `target` is an error. If `f`
    /// fails, expansion stops: clones made so far remain, the placeholder is
    /// kept and the error is returned.
    pub fn repeat_node<I, F>(&mut self, target: NodeRef, items: I, mut f: F) -> Result<()>
    where
        I: IntoIterator,
        F: FnMut(&mut NodeMut<'_>, I::Item) -> Result<()>,
    {
        self.check(target)?;
        let Some(parent) = self.parent(target) else {
            tracing::debug!("repeat_node: {} has no parent, nothing to expand", target.id());
            return Ok(());
        };

        let mut count = 0usize;
        for item in items {
            let clone = self.copy(target)?;
            self.tree_mut()
                .insert_before(parent.id(), clone.id(), Some(target.id()))?;
            f(&mut NodeMut::new(self, clone), item)?;
            count += 1;
        }

        self.discard(target)?;
        tracing::debug!("repeat_node: expanded {} into {} copies", target.id(), count);
        Ok(())
    }
}
