//! Request Payloads
//!
//! A create/update body built from form values. It is sent as JSON unless a
//! file is attached, in which case it becomes multipart form data. Generic
//! over the file handle so the encoding logic runs without a browser.

use serde_json::{Map, Number, Value};

use crate::error::{ApiError, ApiResult};
use crate::forms::{FieldKind, FieldSpec, FieldValue, FormValues};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Multipart,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PayloadValue<F> {
    Text(String),
    Number(Number),
    Bool(bool),
    List(Vec<String>),
    File(F),
}

/// One multipart part, borrowed from the payload
#[derive(Debug, PartialEq)]
pub enum Part<'a, F> {
    Text(String),
    File(&'a F),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payload<F> {
    fields: Vec<(String, PayloadValue<F>)>,
}

impl<F> Default for Payload<F> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<F> Payload<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str, value: PayloadValue<F>) {
        self.fields.push((name.to_string(), value));
    }

    pub fn encoding(&self) -> Encoding {
        if self.fields.iter().any(|(_, v)| matches!(v, PayloadValue::File(_))) {
            Encoding::Multipart
        } else {
            Encoding::Json
        }
    }

    /// JSON object of every non-file field
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in &self.fields {
            let json = match value {
                PayloadValue::Text(text) => Value::String(text.clone()),
                PayloadValue::Number(n) => Value::Number(n.clone()),
                PayloadValue::Bool(b) => Value::Bool(*b),
                PayloadValue::List(items) => Value::Array(items.iter().cloned().map(Value::String).collect()),
                PayloadValue::File(_) => continue,
            };
            map.insert(name.clone(), json);
        }
        Value::Object(map)
    }

    /// Multipart parts in field order; lists travel as JSON strings
    pub fn multipart_parts(&self) -> Vec<(&str, Part<'_, F>)> {
        self.fields
            .iter()
            .map(|(name, value)| {
                let part = match value {
                    PayloadValue::Text(text) => Part::Text(text.clone()),
                    PayloadValue::Number(n) => Part::Text(n.to_string()),
                    PayloadValue::Bool(b) => Part::Text(b.to_string()),
                    PayloadValue::List(items) => {
                        Part::Text(Value::Array(items.iter().cloned().map(Value::String).collect()).to_string())
                    }
                    PayloadValue::File(file) => Part::File(file),
                };
                (name.as_str(), part)
            })
            .collect()
    }

    /// Build from validated form values.
    ///
    /// Empty optional fields are left out so the server keeps its defaults; a
    /// file field without a new attachment is left out so the stored file stays.
    pub fn from_form(specs: &[FieldSpec], values: &FormValues, mut file_for: impl FnMut(&str) -> Option<F>) -> Self {
        let mut payload = Self::new();
        for spec in specs {
            let Some(value) = values.get(spec.name) else { continue };
            match (spec.kind, value) {
                (FieldKind::Checkbox, FieldValue::Flag(flag)) => {
                    payload.push(spec.name, PayloadValue::Bool(*flag));
                }
                (FieldKind::Lines, FieldValue::Lines(_)) => {
                    let lines = value.lines();
                    if !lines.is_empty() || spec.required {
                        payload.push(spec.name, PayloadValue::List(lines));
                    }
                }
                (FieldKind::File { .. }, FieldValue::File { attached: Some(_), .. }) => {
                    if let Some(file) = file_for(spec.name) {
                        payload.push(spec.name, PayloadValue::File(file));
                    }
                }
                (FieldKind::Number, FieldValue::Text(text)) => {
                    if let Some(n) = parse_number(text) {
                        payload.push(spec.name, PayloadValue::Number(n));
                    }
                }
                (_, FieldValue::Text(text)) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        payload.push(spec.name, PayloadValue::Text(text.to_string()));
                    }
                }
                _ => {}
            }
        }
        payload
    }
}

fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if let Ok(i) = text.parse::<i64>() {
        return Some(Number::from(i));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64)
}

impl Payload<web_sys::File> {
    /// Browser `FormData` for a multipart request
    pub fn to_form_data(&self) -> ApiResult<web_sys::FormData> {
        let js_err = |e: wasm_bindgen::JsValue| ApiError::Decode(format!("could not build form data: {:?}", e));
        let form = web_sys::FormData::new().map_err(js_err)?;
        for (name, part) in self.multipart_parts() {
            match part {
                Part::Text(text) => form.append_with_str(name, &text).map_err(js_err)?,
                Part::File(file) => form
                    .append_with_blob_and_filename(name, file, &file.name())
                    .map_err(js_err)?,
            }
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::split_lines;
    use serde_json::json;

    fn specs() -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("titleEn", "Title", FieldKind::Text).required(),
            FieldSpec::new("pieces", "Pieces", FieldKind::Number),
            FieldSpec::new("ageGroup", "Age group", FieldKind::Text),
            FieldSpec::new("isActive", "Active", FieldKind::Checkbox),
            FieldSpec::new("optionsEn", "Options", FieldKind::Lines),
            FieldSpec::new("image", "Image", FieldKind::File { accept: "image/*" }),
        ]
    }

    #[test]
    fn test_json_when_no_file_attached() {
        let specs = specs();
        let mut values = FormValues::empty(&specs);
        values.set_text("titleEn", " Jigsaw Jungle ".to_string());
        values.set_text("pieces", "24".to_string());
        values.set("isActive", FieldValue::Flag(true));
        values.set("optionsEn", FieldValue::Lines(split_lines("a\n\nb")));

        let payload: Payload<&str> = Payload::from_form(&specs, &values, |_| None);
        assert_eq!(payload.encoding(), Encoding::Json);
        assert_eq!(
            payload.to_json(),
            json!({
                "titleEn": "Jigsaw Jungle",
                "pieces": 24,
                "isActive": true,
                "optionsEn": ["a", "b"]
            })
        );
    }

    #[test]
    fn test_existing_file_is_not_resent() {
        let specs = specs();
        let item = json!({ "titleEn": "Old", "image": "https://cdn.zaitoon.app/old.png" });
        let values = FormValues::from_item(&specs, &item);
        let payload: Payload<&str> = Payload::from_form(&specs, &values, |_| Some("should-not-be-used"));
        assert_eq!(payload.encoding(), Encoding::Json);
        assert!(payload.to_json().get("image").is_none());
    }

    #[test]
    fn test_multipart_when_file_attached() {
        let specs = specs();
        let mut values = FormValues::empty(&specs);
        values.set_text("titleEn", "Puzzle".to_string());
        values.set("optionsEn", FieldValue::Lines(vec!["x".to_string()]));
        values.attach_file("image", Some("puzzle.png".to_string()));

        let payload: Payload<&str> = Payload::from_form(&specs, &values, |name| {
            assert_eq!(name, "image");
            Some("<puzzle.png bytes>")
        });
        assert_eq!(payload.encoding(), Encoding::Multipart);

        let parts = payload.multipart_parts();
        assert_eq!(parts[0], ("titleEn", Part::Text("Puzzle".to_string())));
        assert!(parts.contains(&("isActive", Part::Text("false".to_string()))));
        assert!(parts.contains(&("optionsEn", Part::Text("[\"x\"]".to_string()))));
        assert!(parts.contains(&("image", Part::File(&"<puzzle.png bytes>"))));
    }

    #[test]
    fn test_decimal_numbers() {
        assert_eq!(parse_number("2.5").and_then(|n| n.as_f64()), Some(2.5));
        assert_eq!(parse_number(""), None);
    }
}
