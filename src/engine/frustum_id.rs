use std::fmt;

use uuid::Uuid;

/// Stable identifier of the observer a frustum belongs to.
///
/// Cloning a frustum keeps its id, since the clone describes the same
/// observer at a later tick. Duplicated observers ask for a fresh one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrustumId(Uuid);

impl FrustumId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for FrustumId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FrustumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_unique() {
        assert_ne!(FrustumId::new(), FrustumId::new());
    }

    #[test]
    fn copies_keep_the_id() {
        let id = FrustumId::new();
        let copy = id;
        assert_eq!(id, copy);
        assert_eq!(id.uuid(), FrustumId::from_uuid(id.uuid()).uuid());
    }
}
