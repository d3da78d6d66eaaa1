use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;

/// Trait for types usable as a Gemini `responseSchema`.
///
/// Automatically implemented for any `JsonSchema + DeserializeOwned` type.
pub trait ResponseSchema: JsonSchema + DeserializeOwned {
    /// Generate a Gemini-compatible JSON schema for this type.
    ///
    /// Gemini accepts an OpenAPI-style subset: `type`, `description`,
    /// `enum`, `items`, `properties`, `required`, `nullable`. Everything
    /// else schemars emits (`$schema`, `title`, `additionalProperties`,
    /// `format`, `$ref`/`definitions`) is rejected and must be stripped
    /// or inlined.
    fn gemini_schema() -> serde_json::Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        inline_refs(&mut value);
        strip_unsupported(&mut value);

        if let serde_json::Value::Object(map) = &mut value {
            map.remove("definitions");
        }

        value
    }
}

impl<T: JsonSchema + DeserializeOwned> ResponseSchema for T {}

fn strip_unsupported(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            map.remove("$schema");
            map.remove("title");
            map.remove("additionalProperties");
            map.remove("format");

            for (_, v) in map.iter_mut() {
                strip_unsupported(v);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                strip_unsupported(item);
            }
        }
        _ => {}
    }
}

fn inline_refs(value: &mut serde_json::Value) {
    let definitions = if let serde_json::Value::Object(map) = value {
        map.get("definitions").cloned()
    } else {
        None
    };

    if let Some(defs) = definitions {
        inline_refs_recursive(value, &defs);
    }
}

fn inline_refs_recursive(value: &mut serde_json::Value, definitions: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(ref_path)) = map.get("$ref").cloned() {
                if ref_path.starts_with("#/definitions/") {
                    let type_name = ref_path.trim_start_matches("#/definitions/");
                    if let Some(def) = definitions.get(type_name) {
                        *value = def.clone();
                        inline_refs_recursive(value, definitions);
                        return;
                    }
                }
            }

            if let Some(serde_json::Value::Array(all_of)) = map.get("allOf").cloned() {
                if all_of.len() == 1 {
                    *value = all_of.into_iter().next().unwrap();
                    inline_refs_recursive(value, definitions);
                    return;
                }
            }

            for (_, v) in map.iter_mut() {
                inline_refs_recursive(v, definitions);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs_recursive(item, definitions);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct Verdict {
        relevant: bool,
        reason: String,
    }

    #[test]
    fn schema_has_both_properties() {
        let schema = Verdict::gemini_schema();
        let props = schema["properties"].as_object().unwrap();
        assert!(props.contains_key("relevant"));
        assert!(props.contains_key("reason"));
    }

    #[test]
    fn schema_strips_unsupported_keys() {
        let schema = Verdict::gemini_schema();
        let text = serde_json::to_string(&schema).unwrap();
        assert!(!text.contains("$schema"));
        assert!(!text.contains("additionalProperties"));
        assert!(!text.contains("\"title\""));
    }

    #[test]
    fn nested_struct_inlined() {
        #[derive(Deserialize, JsonSchema)]
        struct Inner {
            score: f64,
        }

        #[derive(Deserialize, JsonSchema)]
        struct Outer {
            inner: Inner,
        }

        let schema = Outer::gemini_schema();
        assert!(!schema.as_object().unwrap().contains_key("definitions"));

        let inner = &schema["properties"]["inner"];
        assert!(inner.get("$ref").is_none());
        assert_eq!(inner["type"], "object");
    }
}
