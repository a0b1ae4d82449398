//! # Undo/Redo Stack
//!
//! Tracks page edits and replays their inverses.
//!
//! - Each mutation records its inverse before being applied
//! - Undo applies the inverses and moves the batch to the redo stack
//! - Redo reapplies the original mutations
//! - New edits clear the redo stack
//! - Batches group several mutations into one undo step

use crate::{Mutation, MutationError};
use protypo_tree::ProtypoNode;

/// Mutations that are undone/redone together
#[derive(Debug, Clone, Default)]
pub struct MutationBatch {
    /// Application order
    pub mutations: Vec<Mutation>,

    /// Undo order (reverse of application)
    pub inverses: Vec<Mutation>,

    pub description: Option<String>,
}

impl MutationBatch {
    pub fn single(mutation: Mutation, inverse: Mutation) -> Self {
        Self {
            mutations: vec![mutation],
            inverses: vec![inverse],
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug)]
pub struct UndoStack {
    undo_stack: Vec<MutationBatch>,
    redo_stack: Vec<MutationBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    current_batch: Option<MutationBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply a mutation and record it for undo
    pub fn apply(&mut self, mutation: Mutation, page: &mut Vec<ProtypoNode>) -> Result<(), MutationError> {
        mutation.validate(page)?;
        let inverse = mutation.to_inverse(page)?;
        mutation.apply(page)?;

        if let Some(batch) = &mut self.current_batch {
            batch.mutations.push(mutation);
            batch.inverses.insert(0, inverse);
        } else {
            self.push_batch(MutationBatch::single(mutation, inverse));
        }

        Ok(())
    }

    /// Start a batch of mutations (undone/redone together)
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.current_batch = Some(MutationBatch::default().with_description(description));
    }

    /// End the current batch and push it to the undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.mutations.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    /// Roll back whatever the open batch applied and discard it. If the
    /// rollback fails the page is left as it was and the batch is kept as an
    /// ordinary undo step.
    pub fn abort_batch(&mut self, page: &mut Vec<ProtypoNode>) -> Result<(), MutationError> {
        let Some(batch) = self.current_batch.take() else {
            return Ok(());
        };

        if let Err(err) = replay(&batch.inverses, page) {
            if !batch.mutations.is_empty() {
                self.push_batch(batch);
            }
            return Err(err);
        }
        Ok(())
    }

    fn push_batch(&mut self, batch: MutationBatch) {
        self.undo_stack.push(batch);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Undo the most recent batch. Returns false when there is nothing to undo.
    /// On failure the page and both stacks are unchanged.
    pub fn undo(&mut self, page: &mut Vec<ProtypoNode>) -> Result<bool, MutationError> {
        let Some(batch) = self.undo_stack.last() else {
            return Ok(false);
        };

        replay(&batch.inverses, page)?;
        if let Some(batch) = self.undo_stack.pop() {
            self.redo_stack.push(batch);
        }
        Ok(true)
    }

    /// Redo the most recently undone batch
    pub fn redo(&mut self, page: &mut Vec<ProtypoNode>) -> Result<bool, MutationError> {
        let Some(batch) = self.redo_stack.last() else {
            return Ok(false);
        };

        replay(&batch.mutations, page)?;
        if let Some(batch) = self.redo_stack.pop() {
            self.undo_stack.push(batch);
        }
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }
}

/// Restore every mutation onto a copy of the page, committing only if all succeed
fn replay(mutations: &[Mutation], page: &mut Vec<ProtypoNode>) -> Result<(), MutationError> {
    let mut scratch = page.clone();
    for mutation in mutations {
        mutation.restore(&mut scratch)?;
    }
    *page = scratch;
    Ok(())
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
