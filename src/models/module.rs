//! Reusable markup module definition.

use serde::{Deserialize, Serialize};

use crate::constants::MODULE_ID_PREFIX;
use crate::models::generate_id;
use crate::parser::extract_placeholders;

/// A reusable HTML fragment containing `{{placeholder}}` tokens.
///
/// The `id` is assigned once at creation and never reused, even after the
/// module is deleted. `name` and `code` are edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Opaque unique identifier (e.g. "mod_3f2a…")
    pub id: String,
    /// Display label
    pub name: String,
    /// Raw markup with placeholders
    pub code: String,
}

impl Module {
    /// Creates a module with a freshly generated id.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: generate_id(MODULE_ID_PREFIX),
            name: name.into(),
            code: code.into(),
        }
    }

    /// Placeholder names declared by this module's code, in first-occurrence order.
    #[must_use]
    pub fn placeholders(&self) -> Vec<String> {
        extract_placeholders(&self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_module_has_prefixed_unique_id() {
        let a = Module::new("Hero", "<img src='{{url}}'>");
        let b = Module::new("Hero", "<img src='{{url}}'>");
        assert!(a.id.starts_with("mod_"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_placeholders_follow_code() {
        let module = Module::new("CTA", "<a href='{{ctaURL}}'>{{ctaText}}</a>");
        assert_eq!(module.placeholders(), vec!["ctaURL", "ctaText"]);
    }

    #[test]
    fn test_json_shape() {
        let module = Module {
            id: "mod_1".to_string(),
            name: "Footer".to_string(),
            code: "</body>".to_string(),
        };
        let json = serde_json::to_value(&module).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "mod_1", "name": "Footer", "code": "</body>"})
        );
    }
}
