//! Descriptor states.
//!
//! A [`DescriptorState`] is one assignment of a primitive's descriptor
//! values, plus the two reserved fields `z_frame` (which frames the state is
//! visible in) and `angle` (rotation in multiples of pi).

use scipyen_core::{Result, SchemaError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::kind::{PrimitiveKind, ValueKind};

pub const MIN_ANGLE: f64 = -2.0;
pub const MAX_ANGLE: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptorValue {
    Number(f64),
    Text(String),
}

impl DescriptorValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DescriptorValue::Number(v) => Some(*v),
            DescriptorValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DescriptorValue::Text(s) => Some(s),
            DescriptorValue::Number(_) => None,
        }
    }

    pub fn value_kind(&self) -> ValueKind {
        match self {
            DescriptorValue::Number(_) => ValueKind::Number,
            DescriptorValue::Text(_) => ValueKind::Text,
        }
    }
}

impl From<f64> for DescriptorValue {
    fn from(v: f64) -> Self {
        DescriptorValue::Number(v)
    }
}

impl From<&str> for DescriptorValue {
    fn from(v: &str) -> Self {
        DescriptorValue::Text(v.to_string())
    }
}

impl From<String> for DescriptorValue {
    fn from(v: String) -> Self {
        DescriptorValue::Text(v)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptorState {
    fields: BTreeMap<String, DescriptorValue>,
    pub(crate) z_frame: Option<i32>,
    angle: f64,
}

impl DescriptorState {
    /// Build a state from values given in the kind's declared order.
    pub fn from_values(
        kind: PrimitiveKind,
        values: Vec<DescriptorValue>,
        z_frame: Option<i32>,
    ) -> Result<Self> {
        let names = kind.descriptors();
        if values.len() != names.len() {
            return Err(SchemaError::Arity {
                kind: kind.name().to_string(),
                expected: names.len(),
                actual: values.len(),
            }
            .into());
        }

        let fields = names
            .iter()
            .map(|n| n.to_string())
            .zip(values)
            .collect();
        let state = Self {
            fields,
            z_frame,
            angle: 0.0,
        };
        state.validate(kind)?;
        Ok(state)
    }

    /// Numeric-only shortcut used by the infallible convenience constructors.
    pub(crate) fn from_numbers(kind: PrimitiveKind, values: &[f64]) -> Self {
        debug_assert_eq!(values.len(), kind.descriptors().len());
        let fields = kind
            .descriptors()
            .iter()
            .zip(values)
            .map(|(n, v)| (n.to_string(), DescriptorValue::Number(*v)))
            .collect();
        Self {
            fields,
            z_frame: None,
            angle: 0.0,
        }
    }

    pub(crate) fn from_fields(fields: BTreeMap<String, DescriptorValue>, z_frame: Option<i32>, angle: f64) -> Self {
        Self {
            fields,
            z_frame,
            angle,
        }
    }

    /// Check the field set and value types against the kind's schema.
    pub fn validate(&self, kind: PrimitiveKind) -> Result<()> {
        let declared = kind.descriptors();
        let missing: Vec<String> = declared
            .iter()
            .filter(|n| !self.fields.contains_key(**n))
            .map(|n| n.to_string())
            .collect();
        let unexpected: Vec<String> = self
            .fields
            .keys()
            .filter(|k| !declared.contains(&k.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(SchemaError::DescriptorMismatch {
                kind: kind.name().to_string(),
                missing,
                unexpected,
            }
            .into());
        }

        for (name, value) in &self.fields {
            if let Some(expected) = kind.value_kind(name) {
                if value.value_kind() != expected {
                    return Err(SchemaError::ValueType {
                        kind: kind.name().to_string(),
                        name: name.clone(),
                        expected: expected.as_str().to_string(),
                    }
                    .into());
                }
            }
        }

        check_angle(self.angle)
    }

    pub fn get(&self, name: &str) -> Option<&DescriptorValue> {
        self.fields.get(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(DescriptorValue::as_f64)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(DescriptorValue::as_str)
    }

    /// Numeric field lookup that treats a missing field as 0.
    pub(crate) fn num(&self, name: &str) -> f64 {
        self.number(name).unwrap_or(0.0)
    }

    /// Overwrite an existing field. The value type must match what is there.
    pub fn set(&mut self, name: &str, value: impl Into<DescriptorValue>) -> std::result::Result<(), SchemaError> {
        let value = value.into();
        match self.fields.get_mut(name) {
            Some(slot) if slot.value_kind() == value.value_kind() => {
                *slot = value;
                Ok(())
            }
            Some(slot) => Err(SchemaError::ValueType {
                kind: "state".to_string(),
                name: name.to_string(),
                expected: slot.value_kind().as_str().to_string(),
            }),
            None => Err(SchemaError::UnknownDescriptor {
                kind: "state".to_string(),
                name: name.to_string(),
            }),
        }
    }

    /// Add `delta` to a numeric field; missing or text fields are left alone.
    pub(crate) fn shift(&mut self, name: &str, delta: f64) {
        if let Some(DescriptorValue::Number(v)) = self.fields.get_mut(name) {
            *v += delta;
        }
    }

    /// Frame binding; change it through the owner's `set_frame_index` or
    /// `set_state` so the state list stays consistent.
    pub fn z_frame(&self) -> Option<i32> {
        self.z_frame
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f64) -> Result<()> {
        check_angle(angle)?;
        self.angle = angle;
        Ok(())
    }

    /// Field names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Values in the kind's declared order.
    pub fn values(&self, kind: PrimitiveKind) -> Vec<DescriptorValue> {
        kind.descriptors()
            .iter()
            .filter_map(|n| self.fields.get(*n).cloned())
            .collect()
    }

    /// Copy descriptor values and angle from `other`, keeping this state's frame.
    pub fn assign_values(&mut self, other: &DescriptorState) {
        self.fields = other.fields.clone();
        self.angle = other.angle;
    }

    /// Copy of this state bound to another frame.
    pub fn with_frame(&self, z_frame: Option<i32>) -> Self {
        let mut copy = self.clone();
        copy.z_frame = z_frame;
        copy
    }

    pub fn is_ubiquitous(&self) -> bool {
        self.z_frame.is_none()
    }

    pub fn is_frame_avoiding(&self) -> bool {
        self.z_frame.is_some_and(|z| z < 0)
    }

    pub fn is_single_frame(&self) -> bool {
        self.z_frame.is_some_and(|z| z >= 0)
    }

    /// Frame hidden by a frame-avoiding state.
    pub fn avoided_frame(&self) -> Option<i32> {
        self.z_frame.filter(|z| *z < 0).map(|z| !z)
    }
}

fn check_angle(angle: f64) -> Result<()> {
    if !(MIN_ANGLE..=MAX_ANGLE).contains(&angle) {
        return Err(SchemaError::AngleOutOfRange { value: angle }.into());
    }
    Ok(())
}
