//! Element kinds and the per-parent tables of legal child kinds

use std::fmt;

use crate::value::normalize_keyword;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    Audio,
    Burger,
    Button,
    ButtonBar,
    ButtonIcon,
    Content,
    Empty,
    Form,
    Heading,
    Hidden,
    Image,
    Link,
    Modal,
    Splitted,
    Tab,
    Table,
    TableRow,
    Text,
}

impl ContainerKind {
    pub const ALL: [ContainerKind; 18] = [
        ContainerKind::Audio,
        ContainerKind::Burger,
        ContainerKind::Button,
        ContainerKind::ButtonBar,
        ContainerKind::ButtonIcon,
        ContainerKind::Content,
        ContainerKind::Empty,
        ContainerKind::Form,
        ContainerKind::Heading,
        ContainerKind::Hidden,
        ContainerKind::Image,
        ContainerKind::Link,
        ContainerKind::Modal,
        ContainerKind::Splitted,
        ContainerKind::Tab,
        ContainerKind::Table,
        ContainerKind::TableRow,
        ContainerKind::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ContainerKind::Audio => "audio",
            ContainerKind::Burger => "burger",
            ContainerKind::Button => "button",
            ContainerKind::ButtonBar => "button_bar",
            ContainerKind::ButtonIcon => "button_icon",
            ContainerKind::Content => "content",
            ContainerKind::Empty => "empty",
            ContainerKind::Form => "form",
            ContainerKind::Heading => "heading",
            ContainerKind::Hidden => "hidden",
            ContainerKind::Image => "image",
            ContainerKind::Link => "link",
            ContainerKind::Modal => "modal",
            ContainerKind::Splitted => "splitted",
            ContainerKind::Tab => "tab",
            ContainerKind::Table => "table",
            ContainerKind::TableRow => "table_row",
            ContainerKind::Text => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Button,
    Checkbox,
    Currency,
    Date,
    File,
    Hidden,
    Link,
    List,
    Number,
    Password,
    Radio,
    Select,
    Slider,
    Switch,
    Tag,
    Textarea,
    Textbox,
    Textfield,
}

impl InputKind {
    pub const ALL: [InputKind; 18] = [
        InputKind::Button,
        InputKind::Checkbox,
        InputKind::Currency,
        InputKind::Date,
        InputKind::File,
        InputKind::Hidden,
        InputKind::Link,
        InputKind::List,
        InputKind::Number,
        InputKind::Password,
        InputKind::Radio,
        InputKind::Select,
        InputKind::Slider,
        InputKind::Switch,
        InputKind::Tag,
        InputKind::Textarea,
        InputKind::Textbox,
        InputKind::Textfield,
    ];

    pub fn name(self) -> &'static str {
        match self {
            InputKind::Button => "button",
            InputKind::Checkbox => "checkbox",
            InputKind::Currency => "currency",
            InputKind::Date => "date",
            InputKind::File => "file",
            InputKind::Hidden => "hidden",
            InputKind::Link => "link",
            InputKind::List => "list",
            InputKind::Number => "number",
            InputKind::Password => "password",
            InputKind::Radio => "radio",
            InputKind::Select => "select",
            InputKind::Slider => "slider",
            InputKind::Switch => "switch",
            InputKind::Tag => "tag",
            InputKind::Textarea => "textarea",
            InputKind::Textbox => "textbox",
            InputKind::Textfield => "textfield",
        }
    }
}

/// A buildable element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Container(ContainerKind),
    Input(InputKind),
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Container(k) => k.name(),
            Kind::Input(k) => k.name(),
        }
    }

    /// Whether any context knows this name. `button`, `link` and `hidden`
    /// exist both as container and as input.
    pub fn is_known(raw: &str) -> bool {
        let name = normalize_keyword(raw);
        ContainerKind::ALL.iter().any(|k| k.name() == name)
            || InputKind::ALL.iter().any(|k| k.name() == name)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kinds the engine interprets itself instead of building a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Resolve another tree in place (`path`, optional `sourceKey`)
    LinkedTree,
}

impl Directive {
    pub fn from_name(raw: &str) -> Option<Self> {
        match normalize_keyword(raw).as_str() {
            "component" => Some(Directive::LinkedTree),
            _ => None,
        }
    }
}

/// Kinds of auxiliary child entries that only make sense under one parent
pub(crate) const BURGER_ITEM: &str = "item";
pub(crate) const OPTION: &str = "input_value";
pub(crate) const TAB_PAGE: &str = "tab_page";

/// The parent context a child kind is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Root,
    Content,
    Link,
    Modal,
    Form,
    Table,
    TableRow,
    Splitted,
    ButtonBar,
}

use ContainerKind as C;

const fn c(kind: ContainerKind) -> Kind {
    Kind::Container(kind)
}

const fn i(kind: InputKind) -> Kind {
    Kind::Input(kind)
}

const ROOT: &[Kind] = &[
    c(C::Audio),
    c(C::Burger),
    c(C::Button),
    c(C::ButtonBar),
    c(C::ButtonIcon),
    c(C::Content),
    c(C::Empty),
    c(C::Form),
    c(C::Heading),
    c(C::Hidden),
    c(C::Image),
    c(C::Link),
    c(C::Modal),
    c(C::Splitted),
    c(C::Tab),
    c(C::Table),
    c(C::TableRow),
    c(C::Text),
];

const CONTENT: &[Kind] = &[
    c(C::Audio),
    c(C::Burger),
    c(C::Button),
    c(C::ButtonBar),
    c(C::ButtonIcon),
    c(C::Content),
    c(C::Empty),
    c(C::Form),
    c(C::Heading),
    c(C::Hidden),
    c(C::Image),
    c(C::Link),
    c(C::Splitted),
    c(C::Tab),
    c(C::Table),
    c(C::Text),
];

const LINK: &[Kind] = &[c(C::Text)];

const MODAL: &[Kind] = &[
    c(C::Content),
    c(C::Form),
    c(C::Heading),
    c(C::Hidden),
    c(C::Image),
    c(C::Link),
    c(C::Table),
    c(C::Text),
];

const FORM: &[Kind] = &[
    i(InputKind::Button),
    i(InputKind::Checkbox),
    i(InputKind::Currency),
    i(InputKind::Date),
    i(InputKind::File),
    i(InputKind::Hidden),
    i(InputKind::Link),
    i(InputKind::List),
    i(InputKind::Number),
    i(InputKind::Password),
    i(InputKind::Radio),
    i(InputKind::Select),
    i(InputKind::Slider),
    i(InputKind::Switch),
    i(InputKind::Tag),
    i(InputKind::Textarea),
    i(InputKind::Textbox),
    i(InputKind::Textfield),
];

const TABLE: &[Kind] = &[c(C::TableRow)];

const TABLE_ROW: &[Kind] = &[
    c(C::Audio),
    c(C::Burger),
    c(C::Button),
    c(C::ButtonBar),
    c(C::ButtonIcon),
    c(C::Content),
    c(C::Empty),
    c(C::Hidden),
    c(C::Image),
    c(C::Link),
    c(C::Splitted),
    c(C::Text),
];

const SPLITTED: &[Kind] = &[
    c(C::Audio),
    c(C::Burger),
    c(C::Button),
    c(C::ButtonBar),
    c(C::ButtonIcon),
    c(C::Content),
    c(C::Empty),
    c(C::Form),
    c(C::Heading),
    c(C::Hidden),
    c(C::Image),
    c(C::Link),
    c(C::Splitted),
    c(C::Tab),
    c(C::Table),
    c(C::TableRow),
    c(C::Text),
];

const BUTTON_BAR: &[Kind] = &[c(C::Button)];

impl Context {
    pub fn name(self) -> &'static str {
        match self {
            Context::Root => "root",
            Context::Content => "content",
            Context::Link => "link",
            Context::Modal => "modal",
            Context::Form => "form",
            Context::Table => "table",
            Context::TableRow => "table_row",
            Context::Splitted => "splitted",
            Context::ButtonBar => "button_bar",
        }
    }

    /// Legal child kinds in this context
    pub fn kinds(self) -> &'static [Kind] {
        match self {
            Context::Root => ROOT,
            Context::Content => CONTENT,
            Context::Link => LINK,
            Context::Modal => MODAL,
            Context::Form => FORM,
            Context::Table => TABLE,
            Context::TableRow => TABLE_ROW,
            Context::Splitted => SPLITTED,
            Context::ButtonBar => BUTTON_BAR,
        }
    }

    pub fn allows(self, kind: Kind) -> bool {
        self.kinds().contains(&kind)
    }

    /// Match a raw kind name case-insensitively against this context
    pub fn lookup(self, raw: &str) -> Option<Kind> {
        let name = normalize_keyword(raw);
        self.kinds().iter().copied().find(|k| k.name() == name)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
