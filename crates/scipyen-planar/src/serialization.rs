//! Snapshots and documents.
//!
//! [`GraphicsSnapshot`] carries everything needed to rebuild a planar
//! graphics object without any rendering code. [`PlanarDocument`] stores a
//! list of snapshots as pretty JSON.

use anyhow::{Context, Result as AnyResult};
use chrono::{DateTime, Utc};
use scipyen_core::{Result, SchemaError};
use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;
use tracing::info;
use uuid::Uuid;

use crate::geometry::Point;
use crate::graphics::PlanarGraphics;
use crate::kind::{GraphicsType, ShapeKind};
use crate::migrate;
use crate::path::Path;
use crate::primitive::Primitive;
use crate::shape::Shape;
use crate::state::DescriptorState;

/// Document format version
pub const DOCUMENT_VERSION: &str = "1.0";

/// Constructor arguments of a planar graphics object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicsSnapshot {
    pub id: Uuid,
    pub kind: ShapeKind,
    pub graphics_type: GraphicsType,
    pub name: String,
    #[serde(default)]
    pub states: Vec<DescriptorState>,
    #[serde(default)]
    pub frame_indices: Vec<Option<i32>>,
    #[serde(default)]
    pub current_frame: i32,
    #[serde(default)]
    pub closed: bool,
    /// Ids of linked objects; mapping functions are not stored.
    #[serde(default)]
    pub linked: Vec<Uuid>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<GraphicsSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
}

impl Primitive {
    pub fn reduce(&self) -> GraphicsSnapshot {
        GraphicsSnapshot {
            id: Uuid::nil(),
            kind: ShapeKind::Primitive(self.kind()),
            graphics_type: self.kind().graphics_type(),
            name: self.name().to_string(),
            states: self.states().to_vec(),
            frame_indices: self.frame_indices(),
            current_frame: self.current_frame(),
            closed: self.is_closed(),
            linked: Vec::new(),
            elements: Vec::new(),
            position: None,
        }
    }
}

impl Path {
    pub fn reduce(&self) -> GraphicsSnapshot {
        let position = match (self.x(), self.y()) {
            (Some(x), Some(y)) => Some(Point::new(x, y)),
            _ => None,
        };
        GraphicsSnapshot {
            id: Uuid::nil(),
            kind: ShapeKind::Path,
            graphics_type: GraphicsType::Path,
            name: self.name().to_string(),
            states: Vec::new(),
            frame_indices: self.frame_indices(),
            current_frame: self.current_frame(),
            closed: self.is_closed(),
            linked: Vec::new(),
            elements: self.iter().map(Primitive::reduce).collect(),
            position,
        }
    }
}

impl Shape {
    pub fn reduce(&self) -> GraphicsSnapshot {
        match self {
            Shape::Primitive(p) => p.reduce(),
            Shape::Path(p) => p.reduce(),
        }
    }
}

impl PlanarGraphics {
    pub fn reduce(&self) -> GraphicsSnapshot {
        let mut snapshot = self.shape().reduce();
        snapshot.id = self.id();
        snapshot.linked = self
            .linked_objects()
            .iter()
            .filter_map(|o| o.try_borrow().ok().map(|o| o.id()))
            .collect();
        snapshot
    }
}

impl GraphicsSnapshot {
    fn malformed(&self, reason: impl Into<String>) -> SchemaError {
        SchemaError::Malformed {
            what: format!("{} snapshot '{}'", self.kind, self.name),
            reason: reason.into(),
        }
    }

    /// Rebuild the shape described by this snapshot.
    pub fn to_shape(&self) -> Result<Shape> {
        if self.graphics_type != self.kind.graphics_type() {
            return Err(self
                .malformed(format!("graphics type {:?} does not match kind", self.graphics_type))
                .into());
        }

        let shape = match self.kind {
            ShapeKind::Primitive(kind) => {
                let primitive = Primitive::from_states(kind, self.states.clone())?
                    .with_name(self.name.clone())
                    .with_current_frame(self.current_frame)
                    .with_closed(self.closed);
                Shape::Primitive(primitive)
            }
            ShapeKind::Path => {
                let elements = self
                    .elements
                    .iter()
                    .map(|e| -> Result<Primitive> {
                        match e.to_shape()? {
                            Shape::Primitive(p) => Ok(p),
                            Shape::Path(_) => Err(self.malformed("nested path element").into()),
                        }
                    })
                    .collect::<Result<Vec<_>>>()?;
                Shape::Path(Path::from_parts(
                    elements,
                    self.name.clone(),
                    self.current_frame,
                    self.closed,
                )?)
            }
        };

        let restored = match &shape {
            Shape::Primitive(p) => p.frame_indices(),
            Shape::Path(p) => p.frame_indices(),
        };
        if !self.frame_indices.is_empty() && restored != self.frame_indices {
            return Err(self
                .malformed(format!(
                    "frame indices {:?} do not match states {:?}",
                    self.frame_indices, restored
                ))
                .into());
        }
        Ok(shape)
    }

    /// Rebuild the object, keeping its id. Links are not restored.
    pub fn restore(&self) -> Result<PlanarGraphics> {
        Ok(PlanarGraphics::with_id(self.id, self.to_shape()?))
    }
}

/// Document metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
}

/// A saved set of planar graphics objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanarDocument {
    pub version: String,
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub objects: Vec<GraphicsSnapshot>,
}

impl PlanarDocument {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            version: DOCUMENT_VERSION.to_string(),
            metadata: DocumentMetadata {
                name: name.into(),
                created: now,
                modified: now,
                author: String::new(),
                description: String::new(),
            },
            objects: Vec::new(),
        }
    }

    pub fn add(&mut self, object: &PlanarGraphics) {
        self.objects.push(object.reduce());
    }

    /// Rebuild every object in document order.
    pub fn restore_all(&self) -> Result<Vec<PlanarGraphics>> {
        self.objects.iter().map(GraphicsSnapshot::restore).collect()
    }

    pub fn save_to_file(&self, path: impl AsRef<FsPath>) -> AnyResult<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize planar document")?;

        std::fs::write(path.as_ref(), json).context("Failed to write planar document")?;

        Ok(())
    }

    /// Load a document. Files without a `version` key are treated as legacy
    /// data and migrated.
    pub fn load_from_file(path: impl AsRef<FsPath>) -> AnyResult<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read planar document")?;

        let value: serde_json::Value =
            serde_json::from_str(&content).context("Failed to parse planar document")?;

        let mut document = if value.get("version").is_some() {
            serde_json::from_value::<PlanarDocument>(value)
                .context("Failed to decode planar document")?
        } else {
            info!(path = %path.as_ref().display(), "Migrating legacy planar document");
            migrate::migrate_document(&value).context("Failed to migrate legacy planar document")?
        };

        document.metadata.modified = Utc::now();

        Ok(document)
    }
}
