//! Form Schema & Validation
//!
//! Every resource page describes its form as a list of `FieldSpec`s plus a few
//! cross-field `Rule`s. The generic form modal renders from that schema and
//! validation runs here, before anything is sent.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::ValidationError;

/// Input widget and wire type of a form field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Url,
    Date,
    Checkbox,
    /// One entry per line, sent as an array
    Lines,
    /// Fixed (value, label) options
    Select(&'static [(&'static str, &'static str)]),
    /// Options loaded from another collection: (endpoint, label key)
    Remote {
        endpoint: &'static str,
        label_key: &'static str,
    },
    /// File upload; `accept` is passed to the input element
    File { accept: &'static str },
}

/// One form field; `name` is the wire key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            placeholder: "",
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

/// Cross-field constraints
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// At least one of the two fields must be present
    OneOf(&'static str, &'static str),
    /// Two `Lines` fields must hold the same number of entries
    SameLength(&'static str, &'static str),
    /// A numeric field must be a valid index into a `Lines` field
    IndexWithin(&'static str, &'static str),
}

/// Current value of one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Lines(Vec<String>),
    /// A file slot: the URL already stored on the server and/or the name of a
    /// newly picked file (the `web_sys::File` itself lives outside this map)
    File {
        existing_url: Option<String>,
        attached: Option<String>,
    },
}

impl FieldValue {
    pub fn empty_for(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Checkbox => FieldValue::Flag(false),
            FieldKind::Lines => FieldValue::Lines(Vec::new()),
            FieldKind::File { .. } => FieldValue::File {
                existing_url: None,
                attached: None,
            },
            _ => FieldValue::Text(String::new()),
        }
    }

    /// Whether this satisfies a "required" constraint
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.trim().is_empty(),
            // A checkbox always carries a value
            FieldValue::Flag(_) => true,
            FieldValue::Lines(lines) => lines.iter().any(|l| !l.trim().is_empty()),
            FieldValue::File { existing_url, attached } => {
                attached.is_some() || existing_url.as_deref().is_some_and(|u| !u.trim().is_empty())
            }
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            _ => "",
        }
    }

    /// Lines with blanks dropped and whitespace trimmed
    pub fn lines(&self) -> Vec<String> {
        match self {
            FieldValue::Lines(lines) => lines
                .iter()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Split textarea input into lines, keeping a trailing empty line so the
/// text round-trips while the user is typing
pub fn split_lines(input: &str) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }
    input.split('\n').map(|l| l.trim_end_matches('\r').to_string()).collect()
}

/// `(id, label)` for one record of a `Remote` option list
pub fn remote_option(item: &Value, label_key: &str) -> Option<(String, String)> {
    let id = remote_id(item);
    if id.is_empty() {
        return None;
    }
    let label = item
        .get(label_key)
        .map(json_to_text)
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| id.clone());
    Some((id, label))
}

/// Values of a whole form, keyed by field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    values: BTreeMap<String, FieldValue>,
}

impl FormValues {
    /// Blank form for create mode
    pub fn empty(specs: &[FieldSpec]) -> Self {
        let values = specs
            .iter()
            .map(|spec| (spec.name.to_string(), FieldValue::empty_for(spec.kind)))
            .collect();
        Self { values }
    }

    /// Prefill from an item's JSON for edit mode
    pub fn from_item(specs: &[FieldSpec], item: &Value) -> Self {
        let mut form = Self::empty(specs);
        for spec in specs {
            let Some(raw) = item.get(spec.name) else { continue };
            if raw.is_null() {
                continue;
            }
            let value = match spec.kind {
                FieldKind::Checkbox => FieldValue::Flag(raw.as_bool().unwrap_or(false)),
                FieldKind::Lines => FieldValue::Lines(match raw {
                    Value::Array(entries) => entries.iter().map(json_to_text).collect(),
                    other => split_lines(&json_to_text(other)),
                }),
                FieldKind::File { .. } => FieldValue::File {
                    existing_url: Some(json_to_text(raw)).filter(|u| !u.is_empty()),
                    attached: None,
                },
                FieldKind::Date => FieldValue::Text(date_input_value(&json_to_text(raw))),
                FieldKind::Remote { .. } => FieldValue::Text(remote_id(raw)),
                _ => FieldValue::Text(json_to_text(raw)),
            };
            form.values.insert(spec.name.to_string(), value);
        }
        form
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: &str, value: FieldValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn text(&self, name: &str) -> &str {
        self.get(name).map(FieldValue::as_text).unwrap_or("")
    }

    pub fn set_text(&mut self, name: &str, text: String) {
        self.set(name, FieldValue::Text(text));
    }

    /// Record a picked file (or clear it with `None`), keeping the existing URL
    pub fn attach_file(&mut self, name: &str, file_name: Option<String>) {
        let existing_url = match self.get(name) {
            Some(FieldValue::File { existing_url, .. }) => existing_url.clone(),
            _ => None,
        };
        self.set(name, FieldValue::File { existing_url, attached: file_name });
    }

    fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some_and(FieldValue::is_present)
    }
}

fn json_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Referenced records may come back populated (`{"_id": .., "title": ..}`)
fn remote_id(value: &Value) -> String {
    match value {
        Value::Object(map) => map
            .get("id")
            .or_else(|| map.get("_id"))
            .map(json_to_text)
            .unwrap_or_default(),
        other => json_to_text(other),
    }
}

/// `<input type="date">` wants `YYYY-MM-DD`; timestamps are truncated
fn date_input_value(raw: &str) -> String {
    raw.get(..10).unwrap_or(raw).to_string()
}

/// Validate required fields, numeric fields and cross-field rules.
///
/// Returns the first failure in schema order.
pub fn validate(specs: &[FieldSpec], rules: &[Rule], values: &FormValues) -> Result<(), ValidationError> {
    let label_of = |name: &str| {
        specs
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.label)
            .unwrap_or(name)
            .to_string()
    };

    // Fields covered by a OneOf rule are checked by the rule instead
    let alternative = |name: &str| {
        rules
            .iter()
            .any(|r| matches!(r, Rule::OneOf(a, b) if *a == name || *b == name))
    };

    for spec in specs {
        if spec.required && !alternative(spec.name) && !values.is_present(spec.name) {
            return Err(ValidationError::Required(spec.label.to_string()));
        }
        if spec.kind == FieldKind::Number {
            let text = values.text(spec.name).trim();
            if !text.is_empty() && !text.parse::<f64>().is_ok_and(f64::is_finite) {
                return Err(ValidationError::NotANumber(spec.label.to_string()));
            }
        }
    }

    for rule in rules {
        match *rule {
            Rule::OneOf(a, b) => {
                if !values.is_present(a) && !values.is_present(b) {
                    return Err(ValidationError::OneOf(label_of(a), label_of(b)));
                }
            }
            Rule::SameLength(a, b) => {
                let left = values.get(a).map(FieldValue::lines).unwrap_or_default();
                let right = values.get(b).map(FieldValue::lines).unwrap_or_default();
                if left.len() != right.len() {
                    return Err(ValidationError::LengthMismatch(label_of(a), label_of(b)));
                }
            }
            Rule::IndexWithin(index, list) => {
                let text = values.text(index).trim();
                if text.is_empty() {
                    continue;
                }
                let len = values.get(list).map(|v| v.lines().len()).unwrap_or(0);
                match text.parse::<usize>() {
                    Ok(i) if i < len => {}
                    _ => return Err(ValidationError::IndexOutOfRange(label_of(index), label_of(list))),
                }
            }
        }
    }

    Ok(())
}
