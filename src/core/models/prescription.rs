use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Medicine {
    pub name: String,
    pub dosage: String,
    pub days: String,
}

/// Typed view over the model's reply. The persisted document stays exactly
/// as the model produced it; this view only reads from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrescriptionRecord {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub date: String,
    pub medicines: Vec<Medicine>,
}

impl PrescriptionRecord {
    pub fn from_value(value: &Value) -> Self {
        let medicines = value
            .get("medicines")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|item| Medicine {
                        name: read_string_field(item, "name"),
                        dosage: read_string_field(item, "dosage"),
                        days: read_string_field(item, "days"),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: read_string_field(value, "name"),
            age: read_string_field(value, "age"),
            gender: read_string_field(value, "gender"),
            date: read_string_field(value, "date"),
            medicines,
        }
    }
}

// Models occasionally answer with bare numbers ("age": 45); keep their text form.
fn read_string_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
