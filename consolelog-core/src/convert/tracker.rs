//! Object identity tracking for a single logging call

use std::collections::HashMap;

use crate::value::{ObjectId, ObjectRef};

/// Outcome of showing an object to the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sighting {
    /// First time this object is seen; it has just been assigned a token
    First,
    /// Seen before; carries the token assigned on first sighting
    Repeat(String),
}

#[derive(Debug)]
struct Tracked {
    // Keeps the allocation alive so its address cannot be reused mid-call.
    _object: ObjectRef,
    token: String,
}

/// Maps object identity to reference tokens, in first-seen order
///
/// The Nth distinct object gets the token `object (<TypeName>) [N]`.
/// An identity is assigned exactly once.
#[derive(Debug, Default)]
pub struct IdentityTracker {
    seen: HashMap<ObjectId, Tracked>,
}

impl IdentityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sighting of `object`
    pub fn track(&mut self, object: &ObjectRef) -> Sighting {
        let id = object.id();
        if let Some(tracked) = self.seen.get(&id) {
            return Sighting::Repeat(tracked.token.clone());
        }

        let token = Self::token_for(object.type_name(), self.seen.len() + 1);
        self.seen.insert(
            id,
            Tracked {
                _object: object.clone(),
                token,
            },
        );
        Sighting::First
    }

    /// Token assigned to `object`, if it has been seen
    pub fn token(&self, object: &ObjectRef) -> Option<&str> {
        self.seen.get(&object.id()).map(|t| t.token.as_str())
    }

    /// Number of distinct objects seen
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    fn token_for(type_name: &str, n: usize) -> String {
        format!("object ({}) [{}]", type_name, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Field, Inspect};

    struct Named(&'static str);

    impl Inspect for Named {
        fn type_name(&self) -> &str {
            self.0
        }

        fn fields(&self) -> Vec<Field> {
            Vec::new()
        }
    }

    #[test]
    fn test_first_seen_order() {
        let x = ObjectRef::new(Named("X"));
        let y = ObjectRef::new(Named("Y"));
        let mut tracker = IdentityTracker::new();

        assert_eq!(tracker.track(&x), Sighting::First);
        assert_eq!(tracker.track(&y), Sighting::First);
        assert_eq!(tracker.track(&x), Sighting::Repeat("object (X) [1]".to_string()));
        assert_eq!(tracker.track(&y), Sighting::Repeat("object (Y) [2]".to_string()));
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_token_lookup() {
        let x = ObjectRef::new(Named("X"));
        let other = ObjectRef::new(Named("X"));
        let mut tracker = IdentityTracker::new();
        assert!(tracker.is_empty());

        tracker.track(&x);
        assert_eq!(tracker.token(&x), Some("object (X) [1]"));
        // Same type, different object.
        assert_eq!(tracker.token(&other), None);
    }
}
