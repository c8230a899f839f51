// src/fields/merge.rs

//! Presence-based merging of same-shaped field sets.
//!
//! Sources are supplied in ascending priority order (built-in defaults,
//! then config-file values, then flag values). For each slot, the value
//! from the highest-priority source that actually set it wins; if nobody
//! set it, the destination keeps its zero value.

use crate::errors::{NotirunError, Result};
use crate::fields::{FieldSet, Slot, SlotMut};

/// Merge `sources` (ascending priority) into `dest`.
///
/// `dest` is normally a freshly defaulted field set; it is overwritten
/// slot-by-slot. All inputs must share `dest`'s shape; a mismatch returns
/// [`NotirunError::ShapeMismatch`] before anything is written.
pub fn merge_fields(dest: &mut dyn FieldSet, sources: &[&dyn FieldSet]) -> Result<()> {
    let shape: Vec<_> = dest.slots().iter().map(Slot::kind).collect();

    for (i, source) in sources.iter().enumerate() {
        let src_shape: Vec<_> = source.slots().iter().map(Slot::kind).collect();
        if src_shape != shape {
            return Err(NotirunError::ShapeMismatch(format!(
                "source {} has shape {:?}, destination has {:?}",
                i, src_shape, shape
            )));
        }
    }

    // Later sources overwrite earlier ones, so the last present value per
    // slot (the highest-priority one) is what remains.
    for source in sources {
        let mut dest_slots = dest.slots_mut();
        for (dst, src) in dest_slots.iter_mut().zip(source.slots()) {
            if !src.is_present() {
                continue;
            }
            match (dst, src) {
                (SlotMut::Text(d), Slot::Text(s)) => **d = s.to_string(),
                (SlotMut::Number(d), Slot::Number(s)) => **d = s,
                // Unreachable after the shape check above.
                _ => unreachable!("slot kinds diverged after shape check"),
            }
        }
    }

    Ok(())
}
