//! Integration tests for linked sub-trees

use pretty_assertions::assert_eq;

use ui_resolver::tree::LoadError;
use ui_resolver::{
    Container, ElementNode, Handling, Locale, MemoryLoader, NoopTranslations, Record,
    ResolveConfig, ResolveError, ResolvedNode, Resolver, TokenSource, TreeRoot, Value,
};

fn component(path: &str) -> ElementNode {
    ElementNode::new("component").with_param("path", path)
}

fn page(child: ElementNode) -> TreeRoot {
    TreeRoot::new(
        Handling::Dynamic,
        ElementNode::new("content").with_id("page").with_child(child),
    )
}

fn texts(node: &ResolvedNode) -> Vec<String> {
    node.children()
        .into_iter()
        .map(|child| match child {
            ResolvedNode::Container(Container::Text(text)) => text.text.clone(),
            other => panic!("expected text, got {:?}", other),
        })
        .collect()
}

#[test]
fn test_linked_tree_is_inlined() {
    let loader = MemoryLoader::new().with_tree(
        "card.json",
        TreeRoot::new(
            Handling::Dynamic,
            ElementNode::new("text")
                .with_id("card")
                .with_param("text", "$$value$title"),
        ),
    );
    let mut source = TokenSource::new(0);
    source.add("title", "Welcome").unwrap();

    let resolver = Resolver::new().with_loader(loader);
    let resolution = resolver
        .resolve_dynamic(
            &page(component("card.json")),
            &Locale::default(),
            &NoopTranslations,
            &[&source],
        )
        .expect("Should resolve");

    assert_eq!(texts(resolution.root().unwrap()), vec!["Welcome"]);
}

#[test]
fn test_source_key_repeats_linked_tree() {
    let loader = MemoryLoader::new().with_tree(
        "card.json",
        TreeRoot::new(
            Handling::Dynamic,
            ElementNode::new("text")
                .with_id("card")
                .with_param("text", "$$value$title"),
        ),
    );
    let cards = ["One", "Two", "Three"]
        .iter()
        .map(|title| {
            let mut record = Record::new();
            record.insert("title".to_string(), Value::from(*title));
            Value::Record(record)
        })
        .collect::<Vec<_>>();
    let mut source = TokenSource::new(0);
    source.add("cards", Value::List(cards)).unwrap();

    let resolver = Resolver::new().with_loader(loader);
    let resolution = resolver
        .resolve_dynamic(
            &page(component("card.json").with_param("sourceKey", "cards")),
            &Locale::default(),
            &NoopTranslations,
            &[&source],
        )
        .expect("Should resolve");

    assert_eq!(
        texts(resolution.root().unwrap()),
        vec!["One", "Two", "Three"]
    );
}

#[test]
fn test_linked_tree_functions_are_collected() {
    let loader = MemoryLoader::new().with_tree(
        "tags.json",
        TreeRoot::new(
            Handling::Static,
            ElementNode::new("form").with_id("tag-form").with_child(
                ElementNode::new("tag")
                    .with_id("labels")
                    .with_param("name", "labels"),
            ),
        ),
    );
    let tree = TreeRoot::new(Handling::Static, component("tags.json"));

    let resolution = Resolver::new()
        .with_loader(loader)
        .resolve_static(&tree)
        .expect("Should resolve");
    assert_eq!(resolution.functions.len(), 1);
    assert_eq!(resolution.functions[0].name, "registerTagInput");
    assert_eq!(resolution.root().and_then(ResolvedNode::id), Some("tag-form"));
}

#[test]
fn test_static_parent_keeps_linked_tree_static() {
    let loader = MemoryLoader::new().with_tree(
        "card.json",
        TreeRoot::new(
            Handling::Dynamic,
            ElementNode::new("text")
                .with_id("card")
                .with_param("text", "$$value$title"),
        ),
    );
    let tree = TreeRoot::new(
        Handling::Static,
        ElementNode::new("content")
            .with_id("page")
            .with_child(component("card.json")),
    );

    let resolution = Resolver::new()
        .with_loader(loader)
        .resolve_static(&tree)
        .expect("Should resolve");
    assert_eq!(texts(resolution.root().unwrap()), vec!["$$value$title"]);
}

#[test]
fn test_linked_root_uses_parent_context() {
    let loader = MemoryLoader::new().with_tree(
        "form.json",
        TreeRoot::new(
            Handling::Static,
            ElementNode::new("form").with_id("nested"),
        ),
    );
    let tree = TreeRoot::new(
        Handling::Static,
        ElementNode::new("form")
            .with_id("outer")
            .with_child(component("form.json")),
    );

    let resolution = Resolver::new()
        .with_loader(loader)
        .resolve_static(&tree)
        .expect("Should resolve");
    let inputs = resolution.root().unwrap().children();
    assert_eq!(inputs.len(), 1);
    assert!(inputs[0].is_failure());
}

#[test]
fn test_cyclic_link_is_fatal() {
    let loader = MemoryLoader::new()
        .with_tree(
            "a.json",
            TreeRoot::new(
                Handling::Static,
                ElementNode::new("content")
                    .with_id("a")
                    .with_child(component("b.json")),
            ),
        )
        .with_tree(
            "b.json",
            TreeRoot::new(
                Handling::Static,
                ElementNode::new("content")
                    .with_id("b")
                    .with_child(component("a.json")),
            ),
        );
    let tree = TreeRoot::new(
        Handling::Static,
        ElementNode::new("content")
            .with_id("root")
            .with_child(component("a.json")),
    );

    let err = Resolver::new()
        .with_loader(loader)
        .resolve_static(&tree)
        .unwrap_err();
    assert!(matches!(err, ResolveError::CyclicLink { .. }));
    insta::assert_snapshot!(err.to_string(), @"cyclic linked tree: a.json -> b.json -> a.json");
}

#[test]
fn test_link_depth_is_bounded() {
    let mut loader = MemoryLoader::new();
    for (path, next) in [("one.json", "two.json"), ("two.json", "three.json")] {
        loader.insert(
            path,
            TreeRoot::new(
                Handling::Static,
                ElementNode::new("content")
                    .with_id(path)
                    .with_child(component(next)),
            ),
        );
    }
    loader.insert(
        "three.json",
        TreeRoot::new(
            Handling::Static,
            ElementNode::new("text").with_id("leaf").with_param("text", "deep"),
        ),
    );
    let tree = TreeRoot::new(Handling::Static, component("one.json"));

    let shallow = Resolver::new()
        .with_loader(loader.clone())
        .with_config(ResolveConfig::new().with_max_link_depth(2));
    let err = shallow.resolve_static(&tree).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"linked trees nest deeper than 2: one.json -> two.json -> three.json");

    let deep = Resolver::new().with_loader(loader);
    let resolution = deep.resolve_static(&tree).expect("Should resolve");
    assert_eq!(resolution.root().and_then(ResolvedNode::id), Some("one.json"));
}

#[test]
fn test_missing_linked_tree_surfaces_loader_error() {
    let tree = TreeRoot::new(
        Handling::Static,
        ElementNode::new("content")
            .with_id("page")
            .with_child(component("nowhere.json")),
    );

    let err = Resolver::new().resolve_static(&tree).unwrap_err();
    assert!(matches!(
        err,
        ResolveError::Load(LoadError::NotFound { ref path }) if path == "nowhere.json"
    ));
}
