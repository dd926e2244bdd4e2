//! Builders for input kinds

use super::engine::{Engine, Site};
use super::kinds::{InputKind, OPTION};
use crate::error::ResolveError;
use crate::token::FunctionCall;
use crate::ui::input::{
    Button, Checkbox, Currency, Date, Field, File, Hidden, InputBase, Link, List, Number,
    Password, Radio, Select, Slider, Switch, Tag, Textarea, Textbox, Textfield,
};
use crate::ui::{Action, ButtonClass, Input, InputOption, ResolvedNode};

const DEFAULT_DATE: &str = "0000-00-00";
const DEFAULT_TARGET: &str = "_self";
const NOT_SELECTED: &str = "NOT_SELECTED";
const NO_TEXT_SET: &str = "no text set";
const NO_VALUE_SET: &str = "no value set";
const MIN: i64 = i32::MIN as i64;
const MAX: i64 = i32::MAX as i64;

impl Engine<'_> {
    pub(super) fn input(&mut self, site: &Site<'_>, kind: InputKind) -> Result<ResolvedNode, ResolveError> {
        let base = self.input_base(site)?;
        let input = match kind {
            InputKind::Button => Input::Button(Button {
                base,
                text: self.required(site, "text")?,
                class: self.param_or(site, "btnClass", ButtonClass::Default)?,
                on_click: self.param_or(site, "onClick", Action::None)?,
            }),
            InputKind::Checkbox => Input::Checkbox(Checkbox {
                base,
                field: self.field(site)?,
                checked: self.param_or(site, "checked", false)?,
                boxes: self.options(site, "boxes", false)?,
            }),
            InputKind::Currency => Input::Currency(Currency {
                base,
                field: self.field(site)?,
                value_front: self.param_or(site, "valueF", 0)?,
                value_back: self.param_or(site, "valueB", 0)?,
                symbol: self.param_or(site, "symbol", String::new())?,
                min: self.param_or(site, "min", MIN)?,
                max: self.param_or(site, "max", MAX)?,
                placeholder: self.param_or(site, "placeholder", String::new())?,
            }),
            InputKind::Date => Input::Date(Date {
                base,
                field: self.field(site)?,
                value: self.param_or(site, "value", DEFAULT_DATE.to_string())?,
            }),
            InputKind::File => Input::File(File {
                base,
                field: self.field(site)?,
                multiple: self.param_or(site, "multiple", false)?,
                accept: self.param_or(site, "accept", "*".to_string())?,
            }),
            InputKind::Hidden => Input::Hidden(Hidden {
                base,
                field: self.field(site)?,
                value: self.param_or(site, "value", String::new())?,
            }),
            InputKind::Link => Input::Link(Link {
                base,
                text: self.required(site, "text")?,
                href: self.required(site, "href")?,
                target: self.param_or(site, "target", DEFAULT_TARGET.to_string())?,
            }),
            InputKind::List => Input::List(self.list(site, base)?),
            InputKind::Number => Input::Number(Number {
                base,
                field: self.field(site)?,
                value: self.param_or(site, "value", String::new())?,
                min: self.param_or(site, "min", MIN)?,
                max: self.param_or(site, "max", MAX)?,
                placeholder: self.param_or(site, "placeholder", String::new())?,
                prefix: self.param_or(site, "prefix", String::new())?,
                suffix: self.param_or(site, "suffix", String::new())?,
                on_enter_press: self.param_or(site, "onEnterPress", Action::None)?,
            }),
            InputKind::Password => Input::Password(Password {
                base,
                field: self.field(site)?,
                placeholder: self.param_or(site, "placeholder", "***".to_string())?,
                on_enter_press: self.param_or(site, "onEnterPress", Action::None)?,
            }),
            InputKind::Radio => Input::Radio(Radio {
                base,
                field: self.field(site)?,
                options: self.options(site, "values", true)?,
            }),
            InputKind::Select => Input::Select(Select {
                base,
                field: self.field(site)?,
                selected: self.param_or(site, "value", NOT_SELECTED.to_string())?,
                options: self.options(site, "values", false)?,
            }),
            InputKind::Slider => Input::Slider(Slider {
                base,
                field: self.field(site)?,
                value: self.param_or(site, "value", 0)?,
                min: self.param_or(site, "min", MIN)?,
                max: self.param_or(site, "max", MAX)?,
            }),
            InputKind::Switch => Input::Switch(Switch {
                base,
                field: self.field(site)?,
                checked: self.param_or(site, "checked", false)?,
            }),
            InputKind::Tag => Input::Tag(self.tag(site, base)?),
            InputKind::Textarea => Input::Textarea(Textarea {
                base,
                field: self.field(site)?,
                value: self.param_or(site, "value", String::new())?,
                max_chars: self.param_or(site, "maxChars", 32000)?,
                placeholder: self.param_or(site, "placeholder", String::new())?,
            }),
            InputKind::Textbox => Input::Textbox(Textbox {
                base,
                field: self.field(site)?,
                value: self.param_or(site, "value", String::new())?,
            }),
            InputKind::Textfield => Input::Textfield(Textfield {
                base,
                field: self.field(site)?,
                value: self.param_or(site, "value", String::new())?,
                placeholder: self.param_or(site, "placeholder", String::new())?,
                prefix: self.param_or(site, "prefix", String::new())?,
                suffix: self.param_or(site, "suffix", String::new())?,
                max_chars: self.param_or(site, "maxChars", 150)?,
                on_enter_press: self.param_or(site, "onEnterPress", Action::None)?,
            }),
        };
        Ok(ResolvedNode::Input(input))
    }

    fn input_base(&self, site: &Site<'_>) -> Result<InputBase, ResolveError> {
        let common = self.common(site)?;
        let markers = self.markers(site, &common.id)?;
        Ok(InputBase {
            tooltip: self.param_or(site, "tooltip", String::new())?,
            on_input: self.param_or(site, "onInput", Action::None)?,
            info_text: self.param_or(site, "infoText", String::new())?,
            info_url: self.param_or(site, "infoUrl", String::new())?,
            markers,
            common,
        })
    }

    fn field(&self, site: &Site<'_>) -> Result<Field, ResolveError> {
        let name: String = self.required(site, "name")?;
        let submit_as = self.param_or(site, "submitAs", name.clone())?;
        Ok(Field { name, submit_as })
    }

    /// Options come from the list parameter `param` when present, else from
    /// `input_value` children
    fn options(
        &mut self,
        site: &Site<'_>,
        param: &str,
        required: bool,
    ) -> Result<Vec<InputOption>, ResolveError> {
        let options = if site.node.parameters.contains_key(param) {
            self.required(site, param)?
        } else {
            let mut options = Vec::new();
            for entry in self.entries(site, OPTION)? {
                let text: String = self.param_or(&entry, "text", NO_TEXT_SET.to_string())?;
                options.push(InputOption {
                    id: self.id(&entry)?,
                    value: self.param_or(&entry, "value", NO_VALUE_SET.to_string())?,
                    checked: self.param_or(&entry, "checked", false)?,
                    classes: self.classes(&entry)?,
                    text,
                });
            }
            options
        };

        if required && options.is_empty() {
            return Err(ResolveError::invalid_at(
                self.position(site),
                "option list can not be empty",
            ));
        }
        Ok(options)
    }

    fn list(&mut self, site: &Site<'_>, base: InputBase) -> Result<List, ResolveError> {
        let field = self.field(site)?;
        let multiple = self.param_or(site, "multiple", false)?;
        let selected: Vec<String> = self.param_or(site, "selectedValues", Vec::new())?;
        let mut options = self.options(site, "values", false)?;
        for option in &mut options {
            option.checked |= selected.contains(&option.value);
        }
        Ok(List {
            base,
            field,
            multiple,
            options,
        })
    }

    /// Tag inputs need client-side setup, registered in the run's function list
    fn tag(&mut self, site: &Site<'_>, base: InputBase) -> Result<Tag, ResolveError> {
        let field = self.field(site)?;
        let fetch_url: String = self.param_or(site, "fetchUrl", String::new())?;
        let search_url: String = self.param_or(site, "searchUrl", String::new())?;
        let enforce_whitelist = self.param_or(site, "enforceWhitelist", false)?;
        let max_tags = self.param_or(site, "maxTags", MAX)?;
        let value = self.param_or(site, "value", String::new())?;
        let pattern = self.param_or(site, "pattern", String::new())?;

        // Registered only once the whole input has resolved
        self.functions.push(FunctionCall::register_tag_input(
            &base.common.id,
            &fetch_url,
            &search_url,
            enforce_whitelist,
            max_tags,
        ));

        Ok(Tag {
            value,
            pattern,
            base,
            field,
        })
    }
}
