//! Builders for container kinds

use super::engine::{Engine, Site};
use super::kinds::{ContainerKind, Context, BURGER_ITEM, TAB_PAGE};
use crate::error::ResolveError;
use crate::token::FunctionCall;
use crate::ui::container::{
    Audio, Burger, BurgerItem, Button, ButtonBar, ButtonIcon, Content, Form, Heading, Hidden,
    Image, Link, Modal, ModalButton, Splitted, Tab, TabPage, Table, TableRow, Text,
};
use crate::ui::{Action, ButtonClass, Container, Direction, ResolvedNode};
use crate::value::{FromValue, Value, LIST_SEPARATOR};

const DEFAULT_BURGER_ICON: &str = "bi-caret-right-fill";
const DEFAULT_TARGET: &str = "_self";
const CONNECTED_BUTTON_ATTRIBUTE: &str = "data-connected-btn";

impl Engine<'_> {
    pub(super) fn container(
        &mut self,
        site: &Site<'_>,
        kind: ContainerKind,
    ) -> Result<ResolvedNode, ResolveError> {
        let container = match kind {
            ContainerKind::Audio => Container::Audio(self.audio(site)?),
            ContainerKind::Burger => Container::Burger(self.burger(site)?),
            ContainerKind::Button => Container::Button(self.button(site)?),
            ContainerKind::ButtonBar => Container::ButtonBar(ButtonBar {
                common: self.common(site)?,
                buttons: self.children(site, Context::ButtonBar)?,
            }),
            ContainerKind::ButtonIcon => Container::ButtonIcon(self.button_icon(site)?),
            ContainerKind::Content => Container::Content(Content {
                common: self.common(site)?,
                children: self.children(site, Context::Content)?,
            }),
            ContainerKind::Empty => return Ok(ResolvedNode::Empty),
            ContainerKind::Form => Container::Form(self.form(site)?),
            ContainerKind::Heading => Container::Heading(self.heading(site)?),
            ContainerKind::Hidden => Container::Hidden(Hidden {
                common: self.common(site)?,
                child: self.first_child(site, Context::Content)?,
            }),
            ContainerKind::Image => Container::Image(Image {
                common: self.common(site)?,
                src: self.required(site, "src")?,
                tooltip: self.param_or(site, "tooltip", String::new())?,
            }),
            ContainerKind::Link => Container::Link(self.link_container(site)?),
            ContainerKind::Modal => Container::Modal(self.modal(site)?),
            ContainerKind::Splitted => Container::Splitted(self.splitted(site)?),
            ContainerKind::Tab => Container::Tab(self.tab(site)?),
            ContainerKind::Table => Container::Table(self.table(site)?),
            ContainerKind::TableRow => Container::TableRow(TableRow {
                common: self.common(site)?,
                table_name: self.required(site, "tableName")?,
                cells: self.children(site, Context::TableRow)?,
            }),
            ContainerKind::Text => Container::Text(Text {
                common: self.common(site)?,
                text: self.required(site, "text")?,
                tooltip: self.param_or(site, "tooltip", String::new())?,
                inline: self.param_or(site, "inline", false)?,
            }),
        };
        Ok(ResolvedNode::Container(container))
    }

    fn audio(&mut self, site: &Site<'_>) -> Result<Audio, ResolveError> {
        Ok(Audio {
            common: self.common(site)?,
            src: self.required(site, "src")?,
            controls: self.param_or(site, "controls", false)?,
            autoplay: self.param_or(site, "autoplay", false)?,
        })
    }

    fn burger(&mut self, site: &Site<'_>) -> Result<Burger, ResolveError> {
        let common = self.common(site)?;
        let icon = self.param_or(site, "icon", DEFAULT_BURGER_ICON.to_string())?;

        let mut items = Vec::new();
        for entry in self.entries(site, BURGER_ITEM)? {
            items.push(BurgerItem {
                icon: self.param_or(&entry, "icon", String::new())?,
                url: self.required(&entry, "url")?,
                text: self.required(&entry, "text")?,
            });
        }

        Ok(Burger {
            common,
            icon,
            items,
        })
    }

    fn button(&mut self, site: &Site<'_>) -> Result<Button, ResolveError> {
        Ok(Button {
            common: self.common(site)?,
            text: self.required(site, "text")?,
            class: self.param_or(site, "btnClass", ButtonClass::Default)?,
            on_click: self.param_or(site, "onClick", Action::None)?,
        })
    }

    fn button_icon(&mut self, site: &Site<'_>) -> Result<ButtonIcon, ResolveError> {
        Ok(ButtonIcon {
            common: self.common(site)?,
            image: self.required(site, "image")?,
            tooltip: self.param_or(site, "tooltip", String::new())?,
            class: self.param_or(site, "btnClass", ButtonClass::Default)?,
            on_click: self.required(site, "onClick")?,
            title: self.param_or(site, "title", String::new())?,
        })
    }

    fn form(&mut self, site: &Site<'_>) -> Result<Form, ResolveError> {
        let mut common = self.common(site)?;
        let direction = self.param_or(site, "direction", Direction::None)?;
        let connected: String = self.param_or(site, "connectedBtn", String::new())?;
        if !connected.trim().is_empty() {
            common
                .attributes
                .insert(CONNECTED_BUTTON_ATTRIBUTE.to_string(), connected);
        }

        Ok(Form {
            common,
            direction,
            inputs: self.children(site, Context::Form)?,
        })
    }

    fn heading(&mut self, site: &Site<'_>) -> Result<Heading, ResolveError> {
        let size: i64 = self.param_or(site, "size", 1)?;
        Ok(Heading {
            common: self.common(site)?,
            text: self.required(site, "text")?,
            tooltip: self.param_or(site, "tooltip", String::new())?,
            size: size.clamp(1, 6) as u8,
        })
    }

    fn link_container(&mut self, site: &Site<'_>) -> Result<Link, ResolveError> {
        Ok(Link {
            common: self.common(site)?,
            href: self.required(site, "href")?,
            tooltip: self.param_or(site, "tooltip", String::new())?,
            target: self.param_or(site, "target", DEFAULT_TARGET.to_string())?,
            content: self.first_child(site, Context::Link)?,
        })
    }

    fn modal(&mut self, site: &Site<'_>) -> Result<Modal, ResolveError> {
        Ok(Modal {
            common: self.common(site)?,
            name: self.required(site, "name")?,
            request_url: self.param_or(site, "requestUrl", String::new())?,
            close_on_overlay_click: self.param_or(site, "closeOnOverlayClick", false)?,
            left: self.modal_button(site, "Left", "cancel", FunctionCall::close_modal().into())?,
            center: self.modal_button(site, "Center", "", Action::None)?,
            right: self.modal_button(site, "Right", "submit", FunctionCall::submit_from_modal().into())?,
            content: self.children(site, Context::Modal)?,
        })
    }

    fn modal_button(
        &self,
        site: &Site<'_>,
        side: &str,
        text: &str,
        action: Action,
    ) -> Result<ModalButton, ResolveError> {
        Ok(ModalButton {
            text: self.param_or(site, &format!("btnName{}", side), text.to_string())?,
            class: self.param_or(site, &format!("btnClass{}", side), ButtonClass::Default)?,
            action: self.param_or(site, &format!("btnFunction{}", side), action)?,
        })
    }

    /// First child is the head, last the tail, the rest the centre
    fn splitted(&mut self, site: &Site<'_>) -> Result<Splitted, ResolveError> {
        let common = self.common(site)?;
        let mut center = self.children(site, Context::Splitted)?;
        let head = if center.is_empty() {
            None
        } else {
            Some(Box::new(center.remove(0)))
        };
        let tail = center.pop().map(Box::new);

        Ok(Splitted {
            common,
            head,
            center,
            tail,
        })
    }

    fn tab(&mut self, site: &Site<'_>) -> Result<Tab, ResolveError> {
        let common = self.common(site)?;

        let mut pages = Vec::new();
        for entry in self.entries(site, TAB_PAGE)? {
            pages.push(TabPage {
                id: self.id(&entry)?,
                text: self.required(&entry, "text")?,
                children: self.children(&entry, Context::Content)?,
            });
        }

        Ok(Tab { common, pages })
    }

    fn table(&mut self, site: &Site<'_>) -> Result<Table, ResolveError> {
        Ok(Table {
            common: self.common(site)?,
            name: self.required(site, "name")?,
            columns: self.column_names(site)?,
            sortable: self.param_or(site, "sortable", false)?,
            rows: self.children(site, Context::Table)?,
        })
    }

    /// `columnNames` is split before substitution, so every segment may be a
    /// placeholder of its own
    fn column_names(&self, site: &Site<'_>) -> Result<Vec<String>, ResolveError> {
        const PARAM: &str = "columnNames";
        let segments = match site.node.parameters.get(PARAM) {
            None => return Ok(Vec::new()),
            Some(Value::Text(raw)) => raw.split(LIST_SEPARATOR).map(str::to_string).collect(),
            Some(other) => Vec::<String>::from_value(other).ok_or_else(|| {
                ResolveError::mismatch(
                    self.position(site),
                    PARAM,
                    <Vec<String> as FromValue>::SHAPE,
                    other.describe(),
                )
            })?,
        };
        segments
            .iter()
            .filter(|segment| !segment.is_empty())
            .map(|segment| self.literal(site, PARAM, segment, None))
            .collect()
    }
}
