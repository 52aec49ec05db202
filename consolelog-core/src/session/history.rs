//! Call-site de-duplication

/// Last call-site that was actually emitted
///
/// Starts empty, which never compares equal to a real call-site, so the
/// first row always shows its call-site.
#[derive(Debug, Clone, Default)]
pub struct CallSiteHistory {
    last: Option<String>,
}

impl CallSiteHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last emitted call-site
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Decide whether `call_site` is shown
    ///
    /// Returns `None` when it repeats the last emitted call-site, otherwise
    /// records it and returns it.
    pub fn admit(&mut self, call_site: String) -> Option<String> {
        if self.last.as_deref() == Some(call_site.as_str()) {
            return None;
        }
        self.last = Some(call_site.clone());
        Some(call_site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consecutive_repeat_suppressed() {
        let mut history = CallSiteHistory::new();
        assert_eq!(history.admit("a : 1".into()), Some("a : 1".to_string()));
        assert_eq!(history.admit("a : 1".into()), None);
        assert_eq!(history.admit("b : 2".into()), Some("b : 2".to_string()));
        assert_eq!(history.admit("a : 1".into()), Some("a : 1".to_string()));
        assert_eq!(history.last(), Some("a : 1"));
    }

    #[test]
    fn test_first_call_site_never_suppressed() {
        let mut history = CallSiteHistory::new();
        assert_eq!(history.last(), None);
        // Even an empty string is a real call-site distinct from "no history".
        assert_eq!(history.admit(String::new()), Some(String::new()));
    }
}
