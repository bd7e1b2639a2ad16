//! Context paths
//!
//! A context path addresses a nested element inside a list or map bin, one
//! step per nesting level, for in-place collection operations.
//!
//! ## Contract
//!
//! - Index and rank steps carry an `i64`; value and key steps carry a
//!   [`Value`]. The payload type is fixed by the variant, so an ill-typed step
//!   cannot be built.
//! - Step order is significant: the first step addresses the outermost level.

use crate::value::Value;
use smallvec::SmallVec;

/// Context step kind, with its wire id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CtxKind {
    /// List element by index
    ListIndex = 0x10,
    /// List element by rank
    ListRank = 0x11,
    /// List element by value
    ListValue = 0x13,
    /// Map entry by index
    MapIndex = 0x20,
    /// Map entry by rank
    MapRank = 0x21,
    /// Map entry by key
    MapKey = 0x22,
    /// Map entry by value
    MapValue = 0x23,
}

impl CtxKind {
    /// Wire id
    pub fn id(&self) -> u8 {
        *self as u8
    }

    /// Kind for a wire id
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            0x10 => Some(CtxKind::ListIndex),
            0x11 => Some(CtxKind::ListRank),
            0x13 => Some(CtxKind::ListValue),
            0x20 => Some(CtxKind::MapIndex),
            0x21 => Some(CtxKind::MapRank),
            0x22 => Some(CtxKind::MapKey),
            0x23 => Some(CtxKind::MapValue),
            _ => None,
        }
    }

    /// Whether the payload must be an integer
    pub fn requires_integer(&self) -> bool {
        matches!(
            self,
            CtxKind::ListIndex | CtxKind::ListRank | CtxKind::MapIndex | CtxKind::MapRank
        )
    }
}

/// One addressing step
#[derive(Debug, Clone, PartialEq)]
pub enum CtxStep<'a> {
    /// List element by index
    ListIndex(i64),
    /// List element by rank
    ListRank(i64),
    /// List element by value
    ListValue(Value<'a>),
    /// Map entry by index
    MapIndex(i64),
    /// Map entry by rank
    MapRank(i64),
    /// Map entry by key
    MapKey(Value<'a>),
    /// Map entry by value
    MapValue(Value<'a>),
}

impl<'a> CtxStep<'a> {
    /// Step kind
    pub fn kind(&self) -> CtxKind {
        match self {
            CtxStep::ListIndex(_) => CtxKind::ListIndex,
            CtxStep::ListRank(_) => CtxKind::ListRank,
            CtxStep::ListValue(_) => CtxKind::ListValue,
            CtxStep::MapIndex(_) => CtxKind::MapIndex,
            CtxStep::MapRank(_) => CtxKind::MapRank,
            CtxStep::MapKey(_) => CtxKind::MapKey,
            CtxStep::MapValue(_) => CtxKind::MapValue,
        }
    }

    /// Build an integer step; `None` for value/key kinds
    pub fn from_integer(kind: CtxKind, n: i64) -> Option<Self> {
        match kind {
            CtxKind::ListIndex => Some(CtxStep::ListIndex(n)),
            CtxKind::ListRank => Some(CtxStep::ListRank(n)),
            CtxKind::MapIndex => Some(CtxStep::MapIndex(n)),
            CtxKind::MapRank => Some(CtxStep::MapRank(n)),
            _ => None,
        }
    }

    /// Build a value step; `None` for index/rank kinds
    pub fn from_value(kind: CtxKind, value: Value<'a>) -> Option<Self> {
        match kind {
            CtxKind::ListValue => Some(CtxStep::ListValue(value)),
            CtxKind::MapKey => Some(CtxStep::MapKey(value)),
            CtxKind::MapValue => Some(CtxStep::MapValue(value)),
            _ => None,
        }
    }

    /// Integer payload of an index/rank step
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CtxStep::ListIndex(n) | CtxStep::ListRank(n) | CtxStep::MapIndex(n) | CtxStep::MapRank(n) => {
                Some(*n)
            }
            _ => None,
        }
    }

    /// Value payload of a value/key step
    pub fn as_value(&self) -> Option<&Value<'a>> {
        match self {
            CtxStep::ListValue(v) | CtxStep::MapKey(v) | CtxStep::MapValue(v) => Some(v),
            _ => None,
        }
    }
}

/// Ordered addressing path into nested collections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextPath<'a> {
    steps: SmallVec<[CtxStep<'a>; 4]>,
}

impl<'a> ContextPath<'a> {
    /// Empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty path with room for `n` steps
    pub fn with_capacity(n: usize) -> Self {
        ContextPath {
            steps: SmallVec::with_capacity(n),
        }
    }

    /// Append a step
    pub fn push(&mut self, step: CtxStep<'a>) {
        self.steps.push(step);
    }

    /// Builder: list element by index
    pub fn list_index(mut self, index: i64) -> Self {
        self.push(CtxStep::ListIndex(index));
        self
    }

    /// Builder: list element by rank
    pub fn list_rank(mut self, rank: i64) -> Self {
        self.push(CtxStep::ListRank(rank));
        self
    }

    /// Builder: list element by value
    pub fn list_value(mut self, value: Value<'a>) -> Self {
        self.push(CtxStep::ListValue(value));
        self
    }

    /// Builder: map entry by index
    pub fn map_index(mut self, index: i64) -> Self {
        self.push(CtxStep::MapIndex(index));
        self
    }

    /// Builder: map entry by rank
    pub fn map_rank(mut self, rank: i64) -> Self {
        self.push(CtxStep::MapRank(rank));
        self
    }

    /// Builder: map entry by key
    pub fn map_key(mut self, key: Value<'a>) -> Self {
        self.push(CtxStep::MapKey(key));
        self
    }

    /// Builder: map entry by value
    pub fn map_value(mut self, value: Value<'a>) -> Self {
        self.push(CtxStep::MapValue(value));
        self
    }

    /// Steps, outermost first
    pub fn steps(&self) -> &[CtxStep<'a>] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when the path has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [CtxKind; 7] = [
        CtxKind::ListIndex,
        CtxKind::ListRank,
        CtxKind::ListValue,
        CtxKind::MapIndex,
        CtxKind::MapRank,
        CtxKind::MapKey,
        CtxKind::MapValue,
    ];

    #[test]
    fn test_kind_ids_round_trip() {
        for kind in ALL_KINDS {
            assert_eq!(CtxKind::from_id(kind.id() as i64), Some(kind));
        }
        assert_eq!(CtxKind::from_id(0x12), None);
        assert_eq!(CtxKind::from_id(-1), None);
    }

    #[test]
    fn test_payload_type_fixed_by_kind() {
        for kind in ALL_KINDS {
            let int_step = CtxStep::from_integer(kind, 3);
            let value_step = CtxStep::from_value(kind, Value::Integer(3));
            if kind.requires_integer() {
                assert_eq!(int_step.map(|s| s.kind()), Some(kind));
                assert!(value_step.is_none());
            } else {
                assert!(int_step.is_none());
                assert_eq!(value_step.map(|s| s.kind()), Some(kind));
            }
        }
    }

    #[test]
    fn test_builder_preserves_order() {
        let path = ContextPath::new()
            .map_key(Value::from("scores"))
            .list_rank(-1)
            .list_index(0);
        assert_eq!(path.len(), 3);
        assert_eq!(path.steps()[0].as_value(), Some(&Value::from("scores")));
        assert_eq!(path.steps()[1].as_integer(), Some(-1));
        assert_eq!(path.steps()[2].kind(), CtxKind::ListIndex);
    }

    #[test]
    fn test_empty_path() {
        let path = ContextPath::with_capacity(2);
        assert!(path.is_empty());
        assert!(path.steps().is_empty());
    }
}
