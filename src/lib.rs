//! UI Resolver - turns declarative element trees into typed UI trees
//!
//! This library resolves a JSON element tree against precedence-ranked token
//! sources and a translation source, producing a [`Resolution`]: a tree of
//! typed [`ResolvedNode`]s plus the function references a renderer must
//! register.
//!
//! # Example
//!
//! ```rust
//! use ui_resolver::{resolve_dynamic, Locale, NoopTranslations, TokenSource, TreeRoot};
//!
//! let tree = TreeRoot::from_json_str(r#"{
//!     "handling": "dynamic",
//!     "root": {
//!         "id": "greeting",
//!         "kind": "text",
//!         "parameters": { "text": "$$value$name" }
//!     }
//! }"#).unwrap();
//!
//! let mut source = TokenSource::new(0);
//! source.add("name", "Alice").unwrap();
//!
//! let resolution = resolve_dynamic(&tree, &Locale::default(), &NoopTranslations, &[&source]).unwrap();
//! let json = serde_json::to_string(&resolution.nodes).unwrap();
//! assert!(json.contains("Alice"));
//! ```

pub mod config;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod resolve;
pub mod token;
pub mod tree;
pub mod ui;
pub mod value;

pub use config::{FileError, ResolveConfig};
pub use error::{Position, ResolveError};
pub use i18n::{Locale, NoopTranslations, TranslationMap, TranslationSource};
pub use resolve::{Resolution, Resolver};
pub use token::{FunctionArg, FunctionCall, TokenError, TokenSource};
pub use tree::{ElementNode, FileLoader, Handling, MemoryLoader, TreeLoader, TreeRoot};
pub use ui::{Container, Input, ResolvedNode};
pub use value::{Record, Value, ValueShape};

/// Resolve a tree without placeholder substitution and default configuration
///
/// # Example
///
/// ```rust
/// use ui_resolver::{resolve_static, ElementNode, Handling, TreeRoot};
///
/// let tree = TreeRoot::new(
///     Handling::Static,
///     ElementNode::new("text").with_id("hello").with_param("text", "hello"),
/// );
/// let resolution = resolve_static(&tree).unwrap();
/// assert_eq!(resolution.root().and_then(|node| node.id()), Some("hello"));
/// ```
pub fn resolve_static(tree: &TreeRoot) -> Result<Resolution, ResolveError> {
    Resolver::new().resolve_static(tree)
}

/// Resolve a tree with placeholder substitution and default configuration.
/// Linked trees are not available; use a [`Resolver`] with a loader for them.
pub fn resolve_dynamic(
    tree: &TreeRoot,
    locale: &Locale,
    translations: &dyn TranslationSource,
    sources: &[&TokenSource],
) -> Result<Resolution, ResolveError> {
    Resolver::new().resolve_dynamic(tree, locale, translations, sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_static_text() {
        let tree = TreeRoot::new(
            Handling::Static,
            ElementNode::new("text").with_param("text", "hello"),
        );
        let resolution = resolve_static(&tree).unwrap();
        match resolution.root() {
            Some(ResolvedNode::Container(Container::Text(text))) => assert_eq!(text.text, "hello"),
            other => panic!("expected text, got {:?}", other),
        }
    }

    #[test]
    fn test_resolution_serializes() {
        let tree = TreeRoot::new(
            Handling::Static,
            ElementNode::new("content")
                .with_id("page")
                .with_child(ElementNode::new("text").with_id("t").with_param("text", "hi")),
        );
        let resolution = resolve_static(&tree).unwrap();
        let json = serde_json::to_value(&resolution).unwrap();
        assert_eq!(json["nodes"][0]["node"], "container");
        assert_eq!(json["nodes"][0]["kind"], "content");
        assert_eq!(json["nodes"][0]["children"][0]["text"], "hi");
        assert!(json["functions"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_handling() {
        let tree = TreeRoot::from_json_str(r#"{"handling": "sometimes", "root": {"kind": "empty"}}"#)
            .unwrap();
        let err = resolve_static(&tree).unwrap_err();
        assert!(err.to_string().contains("sometimes"));
    }
}
