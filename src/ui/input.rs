//! Input variants of the resolved tree

use serde::Serialize;

use super::{Action, ButtonClass, Common, Marker};
use crate::value::{FromValue, Value, ValueShape};

/// Fields shared by every input
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InputBase {
    #[serde(flatten)]
    pub common: Common,
    pub tooltip: String,
    pub on_input: Action,
    pub info_text: String,
    pub info_url: String,
    pub markers: Vec<Marker>,
}

/// Submission fields of inputs that carry a form value
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Field {
    pub name: String,
    pub submit_as: String,
}

/// One selectable option of a checkbox, list, radio or select
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InputOption {
    pub id: String,
    pub text: String,
    pub value: String,
    pub checked: bool,
    pub classes: Vec<String>,
}

impl InputOption {
    pub fn new(text: &str, value: &str) -> Self {
        Self {
            text: text.to_string(),
            value: value.to_string(),
            ..Default::default()
        }
    }

    fn from_item(value: &Value) -> Option<Self> {
        match value {
            Value::Text(text) => Some(Self::new(text, text)),
            Value::Record(record) => {
                let text = record.get("text").and_then(Value::as_text)?;
                let value = record
                    .get("value")
                    .and_then(Value::as_text)
                    .unwrap_or(text);
                let checked = match record.get("checked") {
                    Some(v) => bool::from_value(v)?,
                    None => false,
                };
                Some(Self {
                    checked,
                    ..Self::new(text, value)
                })
            }
            _ => None,
        }
    }
}

impl FromValue for Vec<InputOption> {
    const SHAPE: ValueShape = ValueShape::List;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(InputOption::from_item).collect(),
            Value::Text(raw) => Self::from_literal(raw),
            _ => None,
        }
    }

    /// `"red||green"` gives two options whose text doubles as value
    fn from_literal(raw: &str) -> Option<Self> {
        Vec::<String>::from_literal(raw)
            .map(|items| items.iter().map(|s| InputOption::new(s, s)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Input {
    Button(Button),
    Checkbox(Checkbox),
    Currency(Currency),
    Date(Date),
    File(File),
    Hidden(Hidden),
    Link(Link),
    List(List),
    Number(Number),
    Password(Password),
    Radio(Radio),
    Select(Select),
    Slider(Slider),
    Switch(Switch),
    Tag(Tag),
    Textarea(Textarea),
    Textbox(Textbox),
    Textfield(Textfield),
}

impl Input {
    pub fn base(&self) -> &InputBase {
        match self {
            Input::Button(i) => &i.base,
            Input::Checkbox(i) => &i.base,
            Input::Currency(i) => &i.base,
            Input::Date(i) => &i.base,
            Input::File(i) => &i.base,
            Input::Hidden(i) => &i.base,
            Input::Link(i) => &i.base,
            Input::List(i) => &i.base,
            Input::Number(i) => &i.base,
            Input::Password(i) => &i.base,
            Input::Radio(i) => &i.base,
            Input::Select(i) => &i.base,
            Input::Slider(i) => &i.base,
            Input::Switch(i) => &i.base,
            Input::Tag(i) => &i.base,
            Input::Textarea(i) => &i.base,
            Input::Textbox(i) => &i.base,
            Input::Textfield(i) => &i.base,
        }
    }

    /// Submission fields; buttons and links submit nothing
    pub fn field(&self) -> Option<&Field> {
        match self {
            Input::Button(_) | Input::Link(_) => None,
            Input::Checkbox(i) => Some(&i.field),
            Input::Currency(i) => Some(&i.field),
            Input::Date(i) => Some(&i.field),
            Input::File(i) => Some(&i.field),
            Input::Hidden(i) => Some(&i.field),
            Input::List(i) => Some(&i.field),
            Input::Number(i) => Some(&i.field),
            Input::Password(i) => Some(&i.field),
            Input::Radio(i) => Some(&i.field),
            Input::Select(i) => Some(&i.field),
            Input::Slider(i) => Some(&i.field),
            Input::Switch(i) => Some(&i.field),
            Input::Tag(i) => Some(&i.field),
            Input::Textarea(i) => Some(&i.field),
            Input::Textbox(i) => Some(&i.field),
            Input::Textfield(i) => Some(&i.field),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    #[serde(flatten)]
    pub base: InputBase,
    pub text: String,
    pub class: ButtonClass,
    pub on_click: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Checkbox {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    pub checked: bool,
    pub boxes: Vec<InputOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Currency {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    /// Whole units
    pub value_front: i64,
    /// Fractional units
    pub value_back: i64,
    pub symbol: String,
    pub min: i64,
    pub max: i64,
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Date {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct File {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    pub multiple: bool,
    pub accept: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hidden {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    #[serde(flatten)]
    pub base: InputBase,
    pub text: String,
    pub href: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    pub multiple: bool,
    pub options: Vec<InputOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Number {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    pub value: String,
    pub min: i64,
    pub max: i64,
    pub placeholder: String,
    pub prefix: String,
    pub suffix: String,
    pub on_enter_press: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Password {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    pub placeholder: String,
    pub on_enter_press: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Radio {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    pub options: Vec<InputOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Select {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    pub selected: String,
    pub options: Vec<InputOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slider {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    pub value: i64,
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Switch {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tag {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    pub value: String,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Textarea {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    pub value: String,
    pub max_chars: i64,
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Textbox {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Textfield {
    #[serde(flatten)]
    pub base: InputBase,
    #[serde(flatten)]
    pub field: Field,
    pub value: String,
    pub placeholder: String,
    pub prefix: String,
    pub suffix: String,
    pub max_chars: i64,
    pub on_enter_press: Action,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Record;

    #[test]
    fn test_options_from_text_list() {
        let value = Value::List(vec![Value::from("red"), Value::from("green")]);
        let options = Vec::<InputOption>::from_value(&value).unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].value, "green");
    }

    #[test]
    fn test_options_from_records() {
        let mut record = Record::new();
        record.insert("text".to_string(), Value::from("Red"));
        record.insert("value".to_string(), Value::from("r"));
        record.insert("checked".to_string(), Value::from(true));
        let options = Vec::<InputOption>::from_value(&Value::List(vec![Value::Record(record)])).unwrap();
        assert_eq!(options[0].text, "Red");
        assert_eq!(options[0].value, "r");
        assert!(options[0].checked);
    }

    #[test]
    fn test_options_reject_bad_items() {
        let value = Value::List(vec![Value::from(1)]);
        assert!(Vec::<InputOption>::from_value(&value).is_none());
    }

    #[test]
    fn test_options_from_literal() {
        let options = Vec::<InputOption>::from_literal("a||b").unwrap();
        assert_eq!(options, vec![InputOption::new("a", "a"), InputOption::new("b", "b")]);
    }
}
