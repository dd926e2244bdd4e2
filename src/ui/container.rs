//! Container variants of the resolved tree

use serde::Serialize;

use super::{Action, ButtonClass, Common, Direction, ResolvedNode};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Container {
    Audio(Audio),
    Burger(Burger),
    Button(Button),
    ButtonBar(ButtonBar),
    ButtonIcon(ButtonIcon),
    Content(Content),
    Form(Form),
    Heading(Heading),
    Hidden(Hidden),
    Image(Image),
    Link(Link),
    Modal(Modal),
    Splitted(Splitted),
    Tab(Tab),
    Table(Table),
    TableRow(TableRow),
    Text(Text),
}

impl Container {
    pub fn common(&self) -> &Common {
        match self {
            Container::Audio(c) => &c.common,
            Container::Burger(c) => &c.common,
            Container::Button(c) => &c.common,
            Container::ButtonBar(c) => &c.common,
            Container::ButtonIcon(c) => &c.common,
            Container::Content(c) => &c.common,
            Container::Form(c) => &c.common,
            Container::Heading(c) => &c.common,
            Container::Hidden(c) => &c.common,
            Container::Image(c) => &c.common,
            Container::Link(c) => &c.common,
            Container::Modal(c) => &c.common,
            Container::Splitted(c) => &c.common,
            Container::Tab(c) => &c.common,
            Container::Table(c) => &c.common,
            Container::TableRow(c) => &c.common,
            Container::Text(c) => &c.common,
        }
    }

    /// Nested resolved nodes in document order
    pub fn children(&self) -> Vec<&ResolvedNode> {
        match self {
            Container::Content(c) => c.children.iter().collect(),
            Container::Form(c) => c.inputs.iter().collect(),
            Container::Hidden(c) => c.child.iter().map(|b| b.as_ref()).collect(),
            Container::Link(c) => c.content.iter().map(|b| b.as_ref()).collect(),
            Container::Modal(c) => c.content.iter().collect(),
            Container::Splitted(c) => c
                .head
                .iter()
                .map(|b| b.as_ref())
                .chain(c.center.iter())
                .chain(c.tail.iter().map(|b| b.as_ref()))
                .collect(),
            Container::Tab(c) => c.pages.iter().flat_map(|p| p.children.iter()).collect(),
            Container::Table(c) => c.rows.iter().collect(),
            Container::TableRow(c) => c.cells.iter().collect(),
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Audio {
    #[serde(flatten)]
    pub common: Common,
    pub src: String,
    pub controls: bool,
    pub autoplay: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurgerItem {
    pub icon: String,
    pub url: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Burger {
    #[serde(flatten)]
    pub common: Common,
    pub icon: String,
    pub items: Vec<BurgerItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    #[serde(flatten)]
    pub common: Common,
    pub text: String,
    pub class: ButtonClass,
    pub on_click: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonBar {
    #[serde(flatten)]
    pub common: Common,
    pub buttons: Vec<ResolvedNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonIcon {
    #[serde(flatten)]
    pub common: Common,
    pub image: String,
    pub tooltip: String,
    pub class: ButtonClass,
    pub on_click: Action,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    #[serde(flatten)]
    pub common: Common,
    pub children: Vec<ResolvedNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Form {
    #[serde(flatten)]
    pub common: Common,
    pub direction: Direction,
    pub inputs: Vec<ResolvedNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    #[serde(flatten)]
    pub common: Common,
    pub text: String,
    pub tooltip: String,
    /// Heading level, 1 to 6
    pub size: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hidden {
    #[serde(flatten)]
    pub common: Common,
    pub child: Option<Box<ResolvedNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    #[serde(flatten)]
    pub common: Common,
    pub src: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    #[serde(flatten)]
    pub common: Common,
    pub href: String,
    pub tooltip: String,
    pub target: String,
    pub content: Option<Box<ResolvedNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalButton {
    pub text: String,
    pub class: ButtonClass,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Modal {
    #[serde(flatten)]
    pub common: Common,
    pub name: String,
    pub request_url: String,
    pub close_on_overlay_click: bool,
    pub left: ModalButton,
    pub center: ModalButton,
    pub right: ModalButton,
    pub content: Vec<ResolvedNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Splitted {
    #[serde(flatten)]
    pub common: Common,
    pub head: Option<Box<ResolvedNode>>,
    pub center: Vec<ResolvedNode>,
    pub tail: Option<Box<ResolvedNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabPage {
    pub id: String,
    pub text: String,
    pub children: Vec<ResolvedNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    #[serde(flatten)]
    pub common: Common,
    pub pages: Vec<TabPage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    #[serde(flatten)]
    pub common: Common,
    pub name: String,
    pub columns: Vec<String>,
    pub sortable: bool,
    pub rows: Vec<ResolvedNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    #[serde(flatten)]
    pub common: Common,
    pub table_name: String,
    pub cells: Vec<ResolvedNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    #[serde(flatten)]
    pub common: Common,
    pub text: String,
    pub tooltip: String,
    pub inline: bool,
}
