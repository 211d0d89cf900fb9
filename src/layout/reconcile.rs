//! Reconciliation — reuse previously-persisted annotation ids.
//!
//! A pure merge, not a hidden cache: index the previous auto-generated
//! annotations by hierarchy cell, copy the old id onto any fresh
//! annotation whose cell matches. A reused id signals "update in place"
//! to the persistence collaborator; a fresh id signals "create". This is
//! what stops repeated regenerations from stacking duplicate shapes.

use hashbrown::HashMap;

use crate::model::{Annotation, AnnotationId, CellKey};

/// Merge previous ids into freshly generated annotations by cell key.
/// Manual annotations in `previous` carry no cell key and never match.
pub fn reconcile_annotations(mut fresh: Vec<Annotation>, previous: &[Annotation]) -> Vec<Annotation> {
    let prior_ids: HashMap<CellKey, &AnnotationId> = previous
        .iter()
        .filter_map(|a| a.cell_key().map(|key| (key, &a.id)))
        .collect();

    for annotation in &mut fresh {
        if let Some(key) = annotation.cell_key() {
            if let Some(id) = prior_ids.get(&key) {
                annotation.id = (*id).clone();
            }
        }
    }
    fresh
}
