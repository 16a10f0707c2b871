use crate::parser::scanner::Role;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// One team's role -> class assignment as read from the log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamComposition {
    roles: HashMap<Role, Vec<String>>,
}

impl TeamComposition {
    pub fn new() -> Self {
        TeamComposition {
            roles: HashMap::new(),
        }
    }

    /// Replaces any classes already recorded for `role`.
    pub fn set_role(&mut self, role: Role, classes: Vec<String>) {
        self.roles.insert(role, classes);
    }

    pub fn classes(&self, role: Role) -> Option<&[String]> {
        self.roles.get(&role).map(Vec::as_slice)
    }

    pub fn assigned_roles(&self) -> usize {
        self.roles.len()
    }

    /// Canonical key: roles in fixed order, classes lower-cased in the order they were logged.
    ///
    /// `Top[fighter], Jungle[tank], Mid[None], Bot[marksman], Support[support,tank]`
    pub fn signature(&self) -> CompositionSignature {
        let segments: Vec<String> = Role::ALL
            .iter()
            .map(|role| {
                let classes = self
                    .classes(*role)
                    .map(|classes| {
                        classes
                            .iter()
                            .map(|c| c.trim().to_lowercase())
                            .filter(|c| !c.is_empty())
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default();

                if classes.is_empty() {
                    format!("{}[None]", role)
                } else {
                    format!("{}[{}]", role, classes.join(","))
                }
            })
            .collect();

        CompositionSignature(segments.join(", "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CompositionSignature(String);

impl CompositionSignature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CompositionSignature {
    fn from(raw: &str) -> Self {
        CompositionSignature(raw.to_string())
    }
}

impl fmt::Display for CompositionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(entries: &[(Role, &[&str])]) -> TeamComposition {
        let mut comp = TeamComposition::new();
        for (role, classes) in entries {
            comp.set_role(*role, classes.iter().map(|c| c.to_string()).collect());
        }
        comp
    }

    #[test]
    fn test_signature_uses_canonical_role_order() {
        let comp = team(&[
            (Role::Support, &["Support"]),
            (Role::Top, &["Fighter"]),
            (Role::Bot, &["Marksman"]),
        ]);
        assert_eq!(
            comp.signature().as_str(),
            "Top[fighter], Jungle[None], Mid[None], Bot[marksman], Support[support]"
        );
    }

    #[test]
    fn test_signature_ignores_case_and_whitespace() {
        let a = team(&[(Role::Mid, &["Mage", "Assassin"])]);
        let b = team(&[(Role::Mid, &[" MAGE ", "assassin"])]);
        assert_eq!(a.signature(), b.signature());
    }

    #[test]
    fn test_signature_preserves_class_order() {
        let a = team(&[(Role::Jungle, &["Tank", "Fighter"])]);
        let b = team(&[(Role::Jungle, &["Fighter", "Tank"])]);
        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn test_signature_changes_with_role_assignment() {
        let a = team(&[(Role::Top, &["Tank"])]);
        let b = team(&[(Role::Mid, &["Tank"])]);
        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn test_empty_class_list_renders_as_none() {
        let comp = team(&[(Role::Top, &[])]);
        assert!(comp.signature().as_str().starts_with("Top[None], "));
        assert_eq!(comp.signature(), TeamComposition::new().signature());
    }

    #[test]
    fn test_set_role_last_write_wins() {
        let mut comp = team(&[(Role::Bot, &["Mage"])]);
        comp.set_role(Role::Bot, vec!["Marksman".to_string()]);
        assert_eq!(comp.classes(Role::Bot), Some(&["Marksman".to_string()][..]));
        assert_eq!(comp.assigned_roles(), 1);
    }
}
