use anyhow::{Context, Result, anyhow, bail};
use schemars::{Schema, schema_for};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Number,
    /// Array of numbers, entered as one comma-separated line.
    NumberList,
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    /// `Option<T>` fields accept a blank answer.
    pub nullable: bool,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

// Return the whole tagged-enum schema for T
pub fn schema_for<T: schemars::JsonSchema>() -> Schema {
    schema_for!(T)
}

/// Field specs of the `params` object for the variant tagged `kind_key`.
pub fn specs_for_kind(root: &Schema, kind_key: &str) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;

    let alts = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(|v| v.as_array())
        .context("missing oneOf/anyOf")?;

    for branch in alts {
        let bobj = branch.as_object().context("branch is not object")?;
        let Some(props) = bobj.get("properties").and_then(|v| v.as_object()) else {
            continue;
        };
        if !discriminant_matches(props, kind_key) {
            continue;
        }

        let Some(params_obj) = props
            .get("params")
            .and_then(|v| v.as_object())
            .and_then(|o| resolve_ref_obj(root_obj, o))
        else {
            return Ok(vec![]);
        };
        let Some(params_props) = params_obj.get("properties").and_then(|v| v.as_object()) else {
            return Ok(vec![]);
        };

        let required: Vec<&str> = params_obj
            .get("required")
            .and_then(|v| v.as_array())
            .map(|a| a.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default();

        let mut out = Vec::new();
        for (name, field_schema) in params_props {
            let mut fs_obj = field_schema
                .as_object()
                .context("field schema not object")?;
            if fs_obj.get("$ref").is_some() {
                fs_obj = resolve_ref_obj(root_obj, fs_obj)
                    .ok_or_else(|| anyhow!("failed to resolve field $ref for '{name}'"))?;
            }

            let Some((kind, nullable)) = detect_field_kind(fs_obj) else {
                continue;
            };

            let min = fs_obj
                .get("minimum")
                .or_else(|| fs_obj.get("exclusiveMinimum"))
                .and_then(|v| v.as_f64());
            let max = fs_obj
                .get("maximum")
                .or_else(|| fs_obj.get("exclusiveMaximum"))
                .and_then(|v| v.as_f64());

            out.push(FieldSpec {
                name: name.clone(),
                title: fs_obj
                    .get("title")
                    .and_then(|v| v.as_str())
                    .unwrap_or(name)
                    .to_string(),
                description: fs_obj
                    .get("description")
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
                required: required.contains(&name.as_str()),
                nullable,
                kind,
                default: fs_obj.get("default").cloned(),
                min,
                max,
            });
        }

        return Ok(out);
    }

    bail!("no branch found for type={kind_key}");
}

fn discriminant_matches(props: &Map<String, Value>, kind_key: &str) -> bool {
    let Some(tobj) = props.get("type").and_then(|v| v.as_object()) else {
        return false;
    };
    if tobj.get("const").and_then(|v| v.as_str()) == Some(kind_key) {
        return true;
    }
    matches!(
        tobj.get("enum").and_then(|v| v.as_array()).map(Vec::as_slice),
        Some([only]) if only.as_str() == Some(kind_key)
    )
}

/// Resolve a local $ref like "#/$defs/MeanParameters" against the root object.
/// Returns the referenced object map, or None if it can't be resolved.
fn resolve_ref_obj<'a>(
    root_obj: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    match obj.get("$ref") {
        Some(Value::String(r)) => {
            let path = r.strip_prefix("#/")?;
            let mut cur: &Map<String, Value> = root_obj;
            for raw_seg in path.split('/') {
                // JSON Pointer unescape (~1 => /, ~0 => ~)
                let seg = raw_seg.replace("~1", "/").replace("~0", "~");
                cur = cur.get(&seg)?.as_object()?;
            }
            Some(cur)
        }
        _ => Some(obj),
    }
}

fn scalar_kind(ty: &str) -> Option<FieldKind> {
    match ty {
        "integer" => Some(FieldKind::Integer),
        "number" => Some(FieldKind::Number),
        _ => None,
    }
}

/// Kind of a field plus whether `null` is allowed.
fn detect_field_kind(fs_obj: &Map<String, Value>) -> Option<(FieldKind, bool)> {
    match fs_obj.get("type")? {
        Value::String(s) if s == "array" => {
            let items = fs_obj.get("items")?.as_object()?;
            match items.get("type")?.as_str().and_then(scalar_kind)? {
                FieldKind::Number | FieldKind::Integer => Some((FieldKind::NumberList, false)),
                FieldKind::NumberList => None,
            }
        }
        Value::String(s) => scalar_kind(s).map(|k| (k, false)),
        Value::Array(arr) => {
            // unions like ["integer","null"] for Option<T>
            let nullable = arr.iter().any(|v| v.as_str() == Some("null"));
            arr.iter()
                .filter_map(|v| v.as_str())
                .find_map(scalar_kind)
                .map(|k| (k, nullable))
        }
        _ => None,
    }
}
