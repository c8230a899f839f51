// src/fields/mod.rs

//! The field-slot abstraction shared by every notification kind.
//!
//! A notification kind (banner, speech, ...) is a plain struct of text and
//! numeric fields. To let evaluation and merging work generically across
//! kinds, each kind exposes its fields as an *ordered slot list* via the
//! [`FieldSet`] trait. The generic algorithms in [`eval`] and [`merge`]
//! iterate positionally over those slots and never see field names.
//!
//! Presence semantics:
//! - a text slot is "present" when it is non-empty;
//! - a number slot is "present" when it is `Some`.
//!
//! Two field sets have the same *shape* when their slot lists have equal
//! length and pairwise-equal slot kinds. Mixing shapes is a wiring bug and
//! surfaces as [`crate::errors::NotirunError::ShapeMismatch`].

pub mod eval;
pub mod merge;

pub use eval::eval_fields;
pub use merge::merge_fields;

/// Read-only view of one field slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a> {
    Text(&'a str),
    Number(Option<u32>),
}

/// Mutable view of one field slot.
#[derive(Debug)]
pub enum SlotMut<'a> {
    Text(&'a mut String),
    Number(&'a mut Option<u32>),
}

impl Slot<'_> {
    /// Whether the owning source explicitly supplied a value for this slot.
    pub fn is_present(&self) -> bool {
        match self {
            Slot::Text(s) => !s.is_empty(),
            Slot::Number(n) => n.is_some(),
        }
    }

    /// Slot kind tag, used for shape checks.
    pub fn kind(&self) -> SlotKind {
        match self {
            Slot::Text(_) => SlotKind::Text,
            Slot::Number(_) => SlotKind::Number,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Text,
    Number,
}

/// Implemented by every notification kind's field struct.
///
/// `slots()` and `slots_mut()` must list the same fields in the same order;
/// that ordering *is* the shape contract between sources of the same kind.
pub trait FieldSet {
    fn slots(&self) -> Vec<Slot<'_>>;
    fn slots_mut(&mut self) -> Vec<SlotMut<'_>>;
}
