//! Legacy data migration.
//!
//! Older saved data may lack descriptors, `z_frame` or `angle`. These
//! functions repair such records into the current schema. They are only
//! meant for loading; normal construction stays strict.

use scipyen_core::{Result, SchemaError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;
use uuid::Uuid;

use crate::kind::{PrimitiveKind, ShapeKind, ValueKind};
use crate::serialization::{GraphicsSnapshot, PlanarDocument};
use crate::state::{DescriptorState, DescriptorValue, MAX_ANGLE, MIN_ANGLE};

fn malformed(what: &str, reason: impl Into<String>) -> SchemaError {
    SchemaError::Malformed {
        what: what.to_string(),
        reason: reason.into(),
    }
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| malformed(what, format!("expected an object, got {}", value)).into())
}

/// Convert one legacy state record of `kind` to a [`DescriptorState`].
///
/// Missing descriptors default to 0 (or an empty string for text), a
/// missing `z_frame` to ubiquitous and a missing `angle` to 0. An
/// out-of-range angle is clamped and unknown keys are dropped. A `z_frame`
/// that is neither an integer nor null is rejected.
pub fn copy_convert_state(kind: PrimitiveKind, value: &Value) -> Result<DescriptorState> {
    let record = as_object(value, "state")?;

    let mut fields = BTreeMap::new();
    for name in kind.descriptors() {
        let expected = kind.value_kind(name).unwrap_or(ValueKind::Number);
        let converted = match (expected, record.get(*name)) {
            (ValueKind::Number, Some(Value::Number(n))) => n.as_f64().map(DescriptorValue::Number),
            (ValueKind::Text, Some(Value::String(s))) => Some(DescriptorValue::Text(s.clone())),
            (ValueKind::Text, Some(Value::Number(n))) => Some(DescriptorValue::Text(n.to_string())),
            _ => None,
        };
        let converted = converted.unwrap_or_else(|| {
            debug!(kind = %kind, descriptor = %name, "Filling missing legacy descriptor");
            match expected {
                ValueKind::Number => DescriptorValue::Number(0.0),
                ValueKind::Text => DescriptorValue::Text(String::new()),
            }
        });
        fields.insert(name.to_string(), converted);
    }

    for key in record.keys() {
        if key != "z_frame" && key != "angle" && !kind.descriptors().contains(&key.as_str()) {
            debug!(kind = %kind, key = %key, "Dropping unknown legacy field");
        }
    }

    let z_frame = match record.get("z_frame") {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => match n.as_i64().and_then(|z| i32::try_from(z).ok()) {
            Some(z) => Some(z),
            None => {
                return Err(SchemaError::InvalidFrameType {
                    value: n.to_string(),
                }
                .into())
            }
        },
        Some(other) => {
            return Err(SchemaError::InvalidFrameType {
                value: other.to_string(),
            }
            .into())
        }
    };

    let angle = match record.get("angle").and_then(Value::as_f64) {
        Some(a) if (MIN_ANGLE..=MAX_ANGLE).contains(&a) => a,
        Some(a) => {
            debug!(kind = %kind, angle = a, "Clamping legacy angle");
            a.clamp(MIN_ANGLE, MAX_ANGLE)
        }
        None => 0.0,
    };

    Ok(DescriptorState::from_fields(fields, z_frame, angle))
}

/// Convert a list of legacy state records; a lone record counts as a list
/// of one.
pub fn copy_convert_states(kind: PrimitiveKind, value: &Value) -> Result<Vec<DescriptorState>> {
    match value {
        Value::Array(items) => items.iter().map(|v| copy_convert_state(kind, v)).collect(),
        Value::Object(_) => Ok(vec![copy_convert_state(kind, value)?]),
        Value::Null => Ok(Vec::new()),
        other => Err(malformed("states", format!("expected a list, got {}", other)).into()),
    }
}

fn kind_of(record: &Map<String, Value>) -> Result<ShapeKind> {
    let name = record
        .get("kind")
        .or_else(|| record.get("type_name"))
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("object", "missing kind"))?;
    ShapeKind::from_name(name)
        .ok_or_else(|| malformed("object", format!("unknown kind '{}'", name)).into())
}

/// Upgrade a legacy object record (including path elements) to a snapshot.
///
/// The states are normalized and frame indices are recomputed from them.
pub fn migrate_snapshot(value: &Value) -> Result<GraphicsSnapshot> {
    let record = as_object(value, "object")?;
    let kind = kind_of(record)?;

    let name = record
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(kind.name())
        .to_string();
    let current_frame = record
        .get("current_frame")
        .and_then(Value::as_i64)
        .and_then(|f| i32::try_from(f).ok())
        .unwrap_or(0);
    let closed = record.get("closed").and_then(Value::as_bool).unwrap_or(match kind {
        ShapeKind::Primitive(k) => k.closed_by_default(),
        ShapeKind::Path => false,
    });
    let id = record
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    let linked = record
        .get("linked")
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .filter_map(|s| Uuid::parse_str(s).ok())
                .collect()
        })
        .unwrap_or_default();

    let (states, elements) = match kind {
        ShapeKind::Primitive(k) => {
            let states = match record.get("states") {
                Some(states) => copy_convert_states(k, states)?,
                None => Vec::new(),
            };
            (states, Vec::new())
        }
        ShapeKind::Path => {
            let elements = record
                .get("elements")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(migrate_snapshot).collect::<Result<Vec<_>>>())
                .transpose()?
                .unwrap_or_default();
            (Vec::new(), elements)
        }
    };

    let draft = GraphicsSnapshot {
        id,
        kind,
        graphics_type: kind.graphics_type(),
        name,
        states,
        frame_indices: Vec::new(),
        current_frame,
        closed,
        linked: Vec::new(),
        elements,
        position: None,
    };
    let mut snapshot = draft.to_shape()?.reduce();
    snapshot.id = id;
    snapshot.linked = linked;
    debug!(kind = %kind, name = %snapshot.name, "Migrated legacy object");
    Ok(snapshot)
}

/// Upgrade a legacy document: either a list of objects or a map with an
/// `objects` list and an optional `name`.
pub fn migrate_document(value: &Value) -> Result<PlanarDocument> {
    let (name, objects) = match value {
        Value::Array(items) => ("Untitled", items.as_slice()),
        Value::Object(map) => {
            let name = map.get("name").and_then(Value::as_str).unwrap_or("Untitled");
            let objects = map
                .get("objects")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            (name, objects)
        }
        other => return Err(malformed("document", format!("expected a list or map, got {}", other)).into()),
    };

    let mut document = PlanarDocument::new(name);
    document.objects = objects.iter().map(migrate_snapshot).collect::<Result<Vec<_>>>()?;
    Ok(document)
}
