use serde::{Deserialize, Serialize};

/// Partial-update cell for one envelope field.
///
/// Distinguishes "the caller did not supply this field" ([`FieldUpdate::Keep`])
/// from "the caller supplied a value" ([`FieldUpdate::Set`]), so a patch can
/// change any subset of fields without ambiguity. On the wire, an omitted
/// field deserializes to `Keep`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldUpdate<T> {
    /// Leave the field at its prior value.
    #[default]
    Keep,
    /// Replace the field with the supplied value.
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Returns `true` if this cell carries a new value.
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// The new value, if one was supplied.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Self::Keep => None,
            Self::Set(value) => Some(value),
        }
    }

    /// Consume the cell, yielding the new value if one was supplied.
    pub fn into_set(self) -> Option<T> {
        match self {
            Self::Keep => None,
            Self::Set(value) => Some(value),
        }
    }

    /// Apply the cell to a field slot, overwriting it only when set.
    /// Returns `true` if the slot was written.
    pub fn apply_to(self, slot: &mut T) -> bool {
        match self {
            Self::Keep => false,
            Self::Set(value) => {
                *slot = value;
                true
            }
        }
    }

    /// Map the carried value, preserving `Keep`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FieldUpdate<U> {
        match self {
            Self::Keep => FieldUpdate::Keep,
            Self::Set(value) => FieldUpdate::Set(f(value)),
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            None => Self::Keep,
            Some(value) => Self::Set(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_keep() {
        let cell: FieldUpdate<u32> = FieldUpdate::default();
        assert!(!cell.is_set());
        assert_eq!(cell.as_set(), None);
    }

    #[test]
    fn set_carries_value() {
        let cell = FieldUpdate::Set(7u32);
        assert!(cell.is_set());
        assert_eq!(cell.as_set(), Some(&7));
        assert_eq!(cell.into_set(), Some(7));
    }

    #[test]
    fn apply_to_overwrites_only_when_set() {
        let mut slot = 1u32;
        assert!(!FieldUpdate::Keep.apply_to(&mut slot));
        assert_eq!(slot, 1);
        assert!(FieldUpdate::Set(9).apply_to(&mut slot));
        assert_eq!(slot, 9);
    }

    #[test]
    fn map_preserves_keep() {
        let keep: FieldUpdate<u32> = FieldUpdate::Keep;
        assert_eq!(keep.map(|v| v + 1), FieldUpdate::Keep);
        assert_eq!(FieldUpdate::Set(2).map(|v| v + 1), FieldUpdate::Set(3));
    }

    #[test]
    fn from_option() {
        assert_eq!(FieldUpdate::from(Some("x")), FieldUpdate::Set("x"));
        assert_eq!(FieldUpdate::<&str>::from(None), FieldUpdate::Keep);
    }

    #[test]
    fn serde_roundtrip() {
        let cell = FieldUpdate::Set("new description".to_string());
        let json = serde_json::to_string(&cell).unwrap();
        let parsed: FieldUpdate<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(cell, parsed);

        let keep: FieldUpdate<String> = FieldUpdate::Keep;
        let json = serde_json::to_string(&keep).unwrap();
        let parsed: FieldUpdate<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(keep, parsed);
    }
}
