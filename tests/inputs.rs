//! Integration tests for input and container builders

use pretty_assertions::assert_eq;

use ui_resolver::ui::{Action, ButtonClass, Direction, InputOption, MarkerCategory, MarkerType};
use ui_resolver::{
    resolve_dynamic, resolve_static, Container, ElementNode, FunctionCall, Handling, Input,
    Locale, NoopTranslations, ResolvedNode, TokenSource, TreeRoot,
};
use ui_resolver::tree::MarkerDescriptor;

fn form(inputs: Vec<ElementNode>) -> TreeRoot {
    let mut form = ElementNode::new("form").with_id("form");
    for input in inputs {
        form = form.with_child(input);
    }
    TreeRoot::new(Handling::Static, form)
}

fn resolved_inputs(tree: &TreeRoot) -> Vec<Input> {
    let resolution = resolve_static(tree).expect("Should resolve");
    resolution
        .root()
        .unwrap()
        .children()
        .into_iter()
        .map(|node| match node {
            ResolvedNode::Input(input) => input.clone(),
            other => panic!("expected input, got {:?}", other),
        })
        .collect()
}

fn option(text: &str) -> ElementNode {
    ElementNode::new("input_value").with_param("text", text)
}

#[test]
fn test_textfield_defaults() {
    let tree = form(vec![ElementNode::new("textfield")
        .with_id("email")
        .with_param("name", "email")]);

    match &resolved_inputs(&tree)[0] {
        Input::Textfield(field) => {
            assert_eq!(field.field.name, "email");
            assert_eq!(field.field.submit_as, "email");
            assert_eq!(field.max_chars, 150);
            assert_eq!(field.value, "");
            assert!(field.on_enter_press.is_none());
            assert_eq!(field.base.common.id, "email");
        }
        other => panic!("expected textfield, got {:?}", other),
    }
}

#[test]
fn test_numeric_defaults_span_i32() {
    let tree = form(vec![
        ElementNode::new("slider").with_id("s").with_param("name", "s"),
        ElementNode::new("number")
            .with_id("n")
            .with_param("name", "n")
            .with_param("min", 0)
            .with_param("max", "10"),
    ]);

    let inputs = resolved_inputs(&tree);
    match &inputs[0] {
        Input::Slider(slider) => {
            assert_eq!(slider.value, 0);
            assert_eq!(slider.min, i64::from(i32::MIN));
            assert_eq!(slider.max, i64::from(i32::MAX));
        }
        other => panic!("expected slider, got {:?}", other),
    }
    match &inputs[1] {
        Input::Number(number) => {
            assert_eq!((number.min, number.max), (0, 10));
        }
        other => panic!("expected number, got {:?}", other),
    }
}

#[test]
fn test_submittable_input_requires_name() {
    let tree = form(vec![
        ElementNode::new("textfield").with_id("anonymous"),
        ElementNode::new("password").with_id("pw").with_param("name", "pw"),
    ]);

    let resolution = resolve_static(&tree).expect("Should resolve");
    let inputs = resolution.root().unwrap().children();
    assert!(inputs[0].is_failure());
    match inputs[1] {
        ResolvedNode::Input(Input::Password(password)) => assert_eq!(password.placeholder, "***"),
        other => panic!("expected password, got {:?}", other),
    }
}

#[test]
fn test_radio_options_from_children() {
    let tree = form(vec![ElementNode::new("radio")
        .with_id("size")
        .with_param("name", "size")
        .with_child(option("Small").with_id("s").with_param("value", "s"))
        .with_child(option("Large").with_param("checked", true))
        .with_child(option("Hidden").with_param("active", false))]);

    match &resolved_inputs(&tree)[0] {
        Input::Radio(radio) => {
            assert_eq!(radio.options.len(), 2);
            assert_eq!(radio.options[0].id, "s");
            assert_eq!(radio.options[0].value, "s");
            assert_eq!(radio.options[1].text, "Large");
            assert_eq!(radio.options[1].value, "no value set");
            assert!(radio.options[1].checked);
        }
        other => panic!("expected radio, got {:?}", other),
    }
}

#[test]
fn test_radio_without_options_fails() {
    let tree = form(vec![ElementNode::new("radio").with_id("r").with_param("name", "r")]);

    let resolution = resolve_static(&tree).expect("Should resolve");
    assert!(resolution.root().unwrap().children()[0].is_failure());
}

#[test]
fn test_option_children_must_be_options() {
    let tree = form(vec![ElementNode::new("select")
        .with_id("pick")
        .with_param("name", "pick")
        .with_child(ElementNode::new("text").with_param("text", "nope"))]);

    let resolution = resolve_static(&tree).expect("Should resolve");
    assert!(resolution.root().unwrap().children()[0].is_failure());
}

#[test]
fn test_select_values_from_token_source() {
    let tree = TreeRoot::new(
        Handling::Dynamic,
        ElementNode::new("form").with_id("form").with_child(
            ElementNode::new("select")
                .with_id("color")
                .with_param("name", "color")
                .with_param("value", "green")
                .with_param("values", "$$value$colors"),
        ),
    );
    let mut source = TokenSource::new(0);
    source.add("colors", "red||green").unwrap();

    let resolution = resolve_dynamic(&tree, &Locale::default(), &NoopTranslations, &[&source])
        .expect("Should resolve");
    match resolution.root().unwrap().children()[0] {
        ResolvedNode::Input(Input::Select(select)) => {
            assert_eq!(select.selected, "green");
            assert_eq!(
                select.options,
                vec![InputOption::new("red", "red"), InputOption::new("green", "green")]
            );
        }
        other => panic!("expected select, got {:?}", other),
    }
}

#[test]
fn test_list_marks_selected_values() {
    let tree = form(vec![ElementNode::new("list")
        .with_id("l")
        .with_param("name", "l")
        .with_param("multiple", true)
        .with_param("selectedValues", "b||c")
        .with_param("values", "a||b||c")]);

    match &resolved_inputs(&tree)[0] {
        Input::List(list) => {
            let checked: Vec<bool> = list.options.iter().map(|o| o.checked).collect();
            assert_eq!(checked, vec![false, true, true]);
            assert!(list.multiple);
        }
        other => panic!("expected list, got {:?}", other),
    }
}

#[test]
fn test_tag_registers_function() {
    let tree = form(vec![ElementNode::new("tag")
        .with_id("labels")
        .with_param("name", "labels")
        .with_param("fetchUrl", "/tags")
        .with_param("enforceWhitelist", true)
        .with_param("maxTags", 5)]);

    let resolution = resolve_static(&tree).expect("Should resolve");
    assert_eq!(
        resolution.functions,
        vec![FunctionCall::register_tag_input("labels", "/tags", "", true, 5)]
    );
    assert_eq!(
        resolution.functions[0].to_js(),
        "registerTagInput('labels', '/tags', '', true, 5);"
    );
}

#[test]
fn test_failed_tag_registers_nothing() {
    let tree = form(vec![ElementNode::new("tag")
        .with_id("labels")
        .with_param("name", "labels")
        .with_param("value", 5)]);

    let resolution = resolve_static(&tree).expect("Should resolve");
    let inputs = resolution.root().unwrap().children();
    assert_eq!(inputs.len(), 1);
    assert!(inputs[0].is_failure());
    assert_eq!(resolution.functions, Vec::<FunctionCall>::new());
}

#[test]
fn test_markers_translate_text() {
    let tree = TreeRoot::new(
        Handling::Dynamic,
        ElementNode::new("form").with_id("form").with_child(
            ElementNode::new("textfield")
                .with_id("email")
                .with_param("name", "email")
                .with_marker(MarkerDescriptor::new("warning", "EMPTY", "$$text$required"))
                .with_marker(MarkerDescriptor::new("error", "not-parsable", "Bad address")),
        ),
    );
    let translations = |_: &Locale, key: &str| (key == "required").then(|| "Required".to_string());
    let source = TokenSource::new(0);

    let resolution = resolve_dynamic(&tree, &Locale::default(), &translations, &[&source])
        .expect("Should resolve");
    let input = resolution.root().unwrap().children()[0].as_input().unwrap().clone();
    let markers = &input.base().markers;
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].owner_id, "email");
    assert_eq!(markers[0].category, MarkerCategory::Warning);
    assert_eq!(markers[0].kind, MarkerType::Empty);
    assert_eq!(markers[0].text, "Required");
    assert_eq!(markers[1].kind, MarkerType::NotParsable);
    assert_eq!(markers[1].text, "Bad address");
}

#[test]
fn test_unknown_marker_category_fails_input() {
    let tree = form(vec![ElementNode::new("textfield")
        .with_id("x")
        .with_param("name", "x")
        .with_marker(MarkerDescriptor::new("shout", "empty", "!"))]);

    let resolution = resolve_static(&tree).expect("Should resolve");
    assert!(resolution.root().unwrap().children()[0].is_failure());
}

#[test]
fn test_gated_input_becomes_empty() {
    let tree = form(vec![ElementNode::new("textfield")
        .with_id("x")
        .with_param("name", "x")
        .with_param("active", false)]);

    let resolution = resolve_static(&tree).expect("Should resolve");
    assert_eq!(resolution.root().unwrap().children(), vec![&ResolvedNode::Empty]);
}

#[test]
fn test_form_direction_and_connected_button() {
    let tree = TreeRoot::new(
        Handling::Static,
        ElementNode::new("form")
            .with_id("f")
            .with_param("direction", "Horizontal-Reverse")
            .with_param("connectedBtn", "submit-btn"),
    );

    let resolution = resolve_static(&tree).expect("Should resolve");
    match resolution.root() {
        Some(ResolvedNode::Container(Container::Form(form))) => {
            assert_eq!(form.direction, Direction::HorizontalReverse);
            assert_eq!(
                form.common.attributes.get("data-connected-btn").map(String::as_str),
                Some("submit-btn")
            );
        }
        other => panic!("expected form, got {:?}", other),
    }
}

#[test]
fn test_modal_button_defaults() {
    let tree = TreeRoot::new(
        Handling::Static,
        ElementNode::new("modal")
            .with_id("confirm")
            .with_param("name", "confirm")
            .with_param("btnNameRight", "OK")
            .with_param("btnClassRight", "success")
            .with_child(ElementNode::new("text").with_param("text", "Sure?")),
    );

    let resolution = resolve_static(&tree).expect("Should resolve");
    match resolution.root() {
        Some(ResolvedNode::Container(Container::Modal(modal))) => {
            assert_eq!(modal.left.text, "cancel");
            assert_eq!(modal.left.action, Action::Call(FunctionCall::close_modal()));
            assert_eq!(modal.center.action, Action::None);
            assert_eq!(modal.right.text, "OK");
            assert_eq!(modal.right.class, ButtonClass::Success);
            assert_eq!(
                modal.right.action,
                Action::Call(FunctionCall::submit_from_modal())
            );
            assert_eq!(modal.content.len(), 1);
        }
        other => panic!("expected modal, got {:?}", other),
    }
}

#[test]
fn test_table_columns_resolve_per_segment() {
    let tree = TreeRoot::new(
        Handling::Dynamic,
        ElementNode::new("table")
            .with_id("people")
            .with_param("name", "people")
            .with_param("columnNames", "$$text$col.name||Age")
            .with_child(
                ElementNode::new("table_row")
                    .with_id("row")
                    .with_param("tableName", "people")
                    .with_child(ElementNode::new("text").with_param("text", "Ann")),
            ),
    );
    let translations = |_: &Locale, key: &str| (key == "col.name").then(|| "Name".to_string());
    let source = TokenSource::new(0);

    let resolution = resolve_dynamic(&tree, &Locale::default(), &translations, &[&source])
        .expect("Should resolve");
    match resolution.root() {
        Some(ResolvedNode::Container(Container::Table(table))) => {
            assert_eq!(table.columns, vec!["Name", "Age"]);
            assert_eq!(table.rows.len(), 1);
        }
        other => panic!("expected table, got {:?}", other),
    }
}

#[test]
fn test_tab_pages_and_burger_items() {
    let tree = TreeRoot::new(
        Handling::Static,
        ElementNode::new("content")
            .with_id("page")
            .with_child(
                ElementNode::new("tab").with_id("tabs").with_child(
                    ElementNode::new("tab_page")
                        .with_id("first")
                        .with_param("text", "First")
                        .with_child(ElementNode::new("text").with_param("text", "one")),
                ),
            )
            .with_child(
                ElementNode::new("burger").with_id("menu").with_child(
                    ElementNode::new("item")
                        .with_param("url", "/home")
                        .with_param("text", "Home"),
                ),
            ),
    );

    let resolution = resolve_static(&tree).expect("Should resolve");
    let nodes = resolution.root().unwrap().children();
    match nodes[0] {
        ResolvedNode::Container(Container::Tab(tab)) => {
            assert_eq!(tab.pages.len(), 1);
            assert_eq!(tab.pages[0].id, "first");
            assert_eq!(tab.pages[0].children.len(), 1);
        }
        other => panic!("expected tab, got {:?}", other),
    }
    match nodes[1] {
        ResolvedNode::Container(Container::Burger(burger)) => {
            assert_eq!(burger.icon, "bi-caret-right-fill");
            assert_eq!(burger.items[0].url, "/home");
        }
        other => panic!("expected burger, got {:?}", other),
    }
}

#[test]
fn test_splitted_head_and_tail() {
    let text = |t: &str| ElementNode::new("text").with_id(t).with_param("text", t);
    let tree = TreeRoot::new(
        Handling::Static,
        ElementNode::new("splitted")
            .with_id("s")
            .with_child(text("a"))
            .with_child(text("b"))
            .with_child(text("c")),
    );

    let resolution = resolve_static(&tree).expect("Should resolve");
    match resolution.root() {
        Some(ResolvedNode::Container(Container::Splitted(splitted))) => {
            assert_eq!(splitted.head.as_ref().and_then(|n| n.id()), Some("a"));
            assert_eq!(splitted.center.len(), 1);
            assert_eq!(splitted.tail.as_ref().and_then(|n| n.id()), Some("c"));
        }
        other => panic!("expected splitted, got {:?}", other),
    }
}
