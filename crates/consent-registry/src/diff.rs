//! Differences between two successive policies.

use consent_core::PermissionMap;

/// How a policy replacement changed each category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyDiff {
    /// Granted now, not granted before (including newly added grants).
    pub granted: Vec<String>,
    /// Granted before, not granted now (including removed grants).
    pub revoked: Vec<String>,
    /// Present now, absent before.
    pub added: Vec<String>,
    /// Present before, absent now.
    pub removed: Vec<String>,
}

impl PolicyDiff {
    /// Compare `old` against `new`. Output lists are sorted.
    pub fn between(old: &PermissionMap, new: &PermissionMap) -> Self {
        let mut diff = Self::default();

        for (category, now) in new.iter() {
            let before = old.get(category);
            if before.is_none() {
                diff.added.push(category.to_string());
            }
            let was_granted = before.unwrap_or(false);
            if now && !was_granted {
                diff.granted.push(category.to_string());
            } else if !now && was_granted {
                diff.revoked.push(category.to_string());
            }
        }

        for (category, was_granted) in old.iter() {
            if !new.contains(category) {
                diff.removed.push(category.to_string());
                if was_granted {
                    diff.revoked.push(category.to_string());
                }
            }
        }

        diff.revoked.sort();
        diff
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
            && self.revoked.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
    }
}
