//! Hierarchical export layout.
//!
//! Builds a format-neutral tree of groups, datasets and attributes that a
//! persistence layer can write out as HDF5:
//!
//! ```text
//! <object name>            attrs: type_name, name, descriptors, current_frame, closed
//! └── states
//!     ├── state_0          numeric descriptors; attrs: z_frame, angle, text descriptors
//!     └── state_1
//! ```
//!
//! A path holds one child group per element, named `{index}_{element name}`.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::graphics::PlanarGraphics;
use crate::kind::ValueKind;
use crate::path::Path;
use crate::primitive::Primitive;
use crate::shape::Shape;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    TextList(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub name: String,
    pub data: Vec<f64>,
    pub attrs: BTreeMap<String, AttrValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupNode {
    pub name: String,
    pub attrs: BTreeMap<String, AttrValue>,
    pub groups: Vec<GroupNode>,
    pub datasets: Vec<Dataset>,
}

impl GroupNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: BTreeMap::new(),
            groups: Vec::new(),
            datasets: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    pub fn group(&self, name: &str) -> Option<&GroupNode> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.name == name)
    }

    fn set_attr(&mut self, name: &str, value: AttrValue) {
        self.attrs.insert(name.to_string(), value);
    }
}

fn object_group(
    name: &str,
    type_name: &str,
    descriptors: Vec<String>,
    current_frame: i32,
    closed: bool,
) -> GroupNode {
    let mut group = GroupNode::new(name);
    group.set_attr("type_name", AttrValue::Text(type_name.to_string()));
    group.set_attr("name", AttrValue::Text(name.to_string()));
    group.set_attr("descriptors", AttrValue::TextList(descriptors));
    group.set_attr("current_frame", AttrValue::Int(current_frame as i64));
    group.set_attr("closed", AttrValue::Bool(closed));
    group
}

impl Primitive {
    pub fn to_group_tree(&self) -> GroupNode {
        let kind = self.kind();
        let mut group = object_group(
            self.name(),
            kind.name(),
            kind.descriptors().iter().map(|d| d.to_string()).collect(),
            self.current_frame(),
            self.is_closed(),
        );

        let mut states = GroupNode::new("states");
        for (i, state) in self.states().iter().enumerate() {
            let mut attrs = BTreeMap::new();
            attrs.insert(
                "z_frame".to_string(),
                state.z_frame.map_or(AttrValue::Null, |z| AttrValue::Int(z as i64)),
            );
            attrs.insert("angle".to_string(), AttrValue::Float(state.angle()));

            let mut data = Vec::new();
            for name in kind.descriptors() {
                match kind.value_kind(name) {
                    Some(ValueKind::Text) => {
                        let text = state.text(name).unwrap_or_default().to_string();
                        attrs.insert(name.to_string(), AttrValue::Text(text));
                    }
                    _ => data.push(state.num(name)),
                }
            }

            states.datasets.push(Dataset {
                name: format!("state_{}", i),
                data,
                attrs,
            });
        }
        group.groups.push(states);
        group
    }
}

impl Path {
    pub fn to_group_tree(&self) -> GroupNode {
        let mut group = object_group(
            self.name(),
            "Path",
            Vec::new(),
            self.current_frame(),
            self.is_closed(),
        );
        for (i, element) in self.iter().enumerate() {
            let mut child = element.to_group_tree();
            child.name = format!("{}_{}", i, element.name());
            group.groups.push(child);
        }
        group
    }
}

impl Shape {
    pub fn to_group_tree(&self) -> GroupNode {
        match self {
            Shape::Primitive(p) => p.to_group_tree(),
            Shape::Path(p) => p.to_group_tree(),
        }
    }
}

impl PlanarGraphics {
    pub fn to_group_tree(&self) -> GroupNode {
        let mut group = self.shape().to_group_tree();
        group.set_attr("id", AttrValue::Text(self.id().to_string()));
        group
    }
}
