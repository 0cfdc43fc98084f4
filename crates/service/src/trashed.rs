//! Soft-delete visibility for list and lookup queries.

use sea_orm::{ColumnTrait, Condition};
use serde::{Deserialize, Serialize};

/// Which rows a query sees with respect to `deleted_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trashed {
    /// live rows only
    #[default]
    Without,
    /// live and soft-deleted rows
    With,
    /// soft-deleted rows only
    Only,
}

impl Trashed {
    pub fn admits<T>(self, deleted_at: Option<&T>) -> bool {
        match self {
            Trashed::Without => deleted_at.is_none(),
            Trashed::With => true,
            Trashed::Only => deleted_at.is_some(),
        }
    }

    pub fn condition<C: ColumnTrait>(self, deleted_at: C) -> Condition {
        match self {
            Trashed::Without => Condition::all().add(deleted_at.is_null()),
            Trashed::With => Condition::all(),
            Trashed::Only => Condition::all().add(deleted_at.is_not_null()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Trashed;

    #[test]
    fn admits_by_scope() {
        let deleted = Some(&1);
        assert!(Trashed::Without.admits::<i32>(None));
        assert!(!Trashed::Without.admits(deleted));
        assert!(Trashed::With.admits(deleted));
        assert!(Trashed::Only.admits(deleted));
        assert!(!Trashed::Only.admits::<i32>(None));
    }

    #[test]
    fn parses_lowercase() {
        let t: Trashed = serde_json::from_str("\"only\"").unwrap();
        assert_eq!(t, Trashed::Only);
    }
}
