//! Document inspection for the `scipyen inspect` command.

use scipyen_core::{PlanarConfig, Result};
use scipyen_planar::{PlanarDocument, PlanarShape, ShapeKind};
use serde::Serialize;
use uuid::Uuid;

/// Measures of one restored object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectSummary {
    pub id: Uuid,
    pub name: String,
    pub kind: ShapeKind,
    pub frame_indices: Vec<Option<i32>>,
    pub curve_length: f64,
    pub approximate_length: f64,
}

/// Names of the objects shown in one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameVisibility {
    pub frame: i32,
    pub objects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectReport {
    pub document: String,
    pub objects: Vec<ObjectSummary>,
    pub frames: Vec<FrameVisibility>,
}

/// Restore every object of `document` and report its measures plus
/// per-frame visibility over `0..n_frames`.
///
/// `n_frames` falls back to `config.frames.default_frame_count`.
pub fn inspect(
    document: &PlanarDocument,
    config: &PlanarConfig,
    n_frames: Option<usize>,
) -> Result<InspectReport> {
    let restored = document.restore_all()?;
    let tolerance = config.geometry.curve_tolerance;

    let objects = restored
        .iter()
        .map(|object| {
            let shape = object.shape();
            ObjectSummary {
                id: object.id(),
                name: object.name().to_string(),
                kind: object.kind(),
                frame_indices: shape.frame_indices(),
                curve_length: shape.curve_length(),
                approximate_length: shape.approximate_length(None, tolerance),
            }
        })
        .collect();

    let n_frames = n_frames.unwrap_or(config.frames.default_frame_count);
    let last = i32::try_from(n_frames).unwrap_or(i32::MAX);
    let frames = (0..last)
        .map(|frame| FrameVisibility {
            frame,
            objects: restored
                .iter()
                .filter(|o| o.shape().has_state_for_frame(frame))
                .map(|o| o.name().to_string())
                .collect(),
        })
        .collect();

    Ok(InspectReport {
        document: document.metadata.name.clone(),
        objects,
        frames,
    })
}
