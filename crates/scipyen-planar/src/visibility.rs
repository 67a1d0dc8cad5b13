//! Frame/state visibility rules.
//!
//! A state list is consistent when:
//! - a ubiquitous state (`z_frame == None`) is the only state present;
//! - at most one state avoids a frame (`z_frame < 0`, hiding `-z_frame - 1`),
//!   and it may only be joined by one state bound to exactly that frame;
//! - single-frame states (`z_frame >= 0`) never share a frame.
//!
//! Under these rules at most one state is visible in any frame.
//!
//! The functions here operate on plain state lists so that primitives and
//! path elements share one implementation. [`check_states`] is a
//! normalization pass; call it after bulk edits, not per query.

use scipyen_core::{FrameError, Result};
use std::collections::BTreeMap;
use tracing::debug;

use crate::state::DescriptorState;

/// How to reassign frame indices for a whole state list.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameIndexSpec {
    /// Collapse to one ubiquitous state built from the visible one.
    Ubiquitous,
    /// One single-frame state per listed frame; unlisted frames are dropped.
    Frames(Vec<i32>),
    /// Selective remap of existing `z_frame` values.
    Remap(BTreeMap<Option<i32>, Option<i32>>),
}

impl From<Vec<i32>> for FrameIndexSpec {
    fn from(frames: Vec<i32>) -> Self {
        if frames.is_empty() {
            FrameIndexSpec::Ubiquitous
        } else {
            FrameIndexSpec::Frames(frames)
        }
    }
}

/// Whether a state with `z_frame` shows in `frame`.
///
/// A negative `frame` stands for "every frame except `-frame - 1`"; only
/// ubiquitous states and states avoiding that same frame show there.
pub fn is_visible(z_frame: Option<i32>, frame: i32) -> bool {
    match z_frame {
        None => true,
        Some(z) if frame >= 0 => {
            if z >= 0 {
                z == frame
            } else {
                z != !frame
            }
        }
        Some(z) => z == frame,
    }
}

pub fn is_state_visible(state: &DescriptorState, frame: i32) -> bool {
    is_visible(state.z_frame, frame)
}

/// Index of the first state visible in `frame`.
///
/// With `visible == false` the match is on the exact binding instead:
/// `z_frame == Some(frame)` or a ubiquitous state.
pub fn state_index(states: &[DescriptorState], frame: i32, visible: bool) -> Option<usize> {
    states.iter().position(|s| {
        if visible {
            is_state_visible(s, frame)
        } else {
            s.z_frame == Some(frame) || s.z_frame.is_none()
        }
    })
}

pub fn get_state(states: &[DescriptorState], frame: i32, visible: bool) -> Option<&DescriptorState> {
    state_index(states, frame, visible).map(|i| &states[i])
}

pub fn get_state_mut(
    states: &mut [DescriptorState],
    frame: i32,
    visible: bool,
) -> Option<&mut DescriptorState> {
    state_index(states, frame, visible).map(move |i| &mut states[i])
}

pub fn frame_indices(states: &[DescriptorState]) -> Vec<Option<i32>> {
    states.iter().map(|s| s.z_frame).collect()
}

/// Re-derive a consistent state list, discarding whatever breaks the rules.
pub fn check_states(states: &mut Vec<DescriptorState>) {
    if let Some(i) = states.iter().position(DescriptorState::is_ubiquitous) {
        let keep = states.swap_remove(i);
        states.clear();
        states.push(keep);
        return;
    }

    let mut seen: Vec<Option<i32>> = Vec::with_capacity(states.len());
    states.retain(|s| {
        if seen.contains(&s.z_frame) {
            false
        } else {
            seen.push(s.z_frame);
            true
        }
    });

    if let Some(avoided) = states.iter().find_map(DescriptorState::avoided_frame) {
        let avoiding = !avoided;
        states.retain(|s| s.z_frame == Some(avoiding) || s.z_frame == Some(avoided));
    }
}

/// Whether a state list satisfies every rule, without modifying it.
pub fn validate_states(states: &[DescriptorState]) -> Result<()> {
    if states.iter().any(DescriptorState::is_ubiquitous) && states.len() > 1 {
        return Err(FrameError::UbiquitousConflict.into());
    }

    let mut singles: Vec<i32> = Vec::new();
    let mut avoiding: Option<i32> = None;
    for z in states.iter().filter_map(|s| s.z_frame) {
        if z < 0 {
            if let Some(first) = avoiding {
                return Err(FrameError::AvoidingConflict { first, second: z }.into());
            }
            avoiding = Some(z);
        } else {
            if singles.contains(&z) {
                return Err(FrameError::DuplicateFrame(z).into());
            }
            singles.push(z);
        }
    }

    if let Some(z) = avoiding {
        let avoided = !z;
        if let Some(frame) = singles.iter().find(|f| **f != avoided) {
            return Err(FrameError::Occupied { frame: *frame }.into());
        }
    }

    Ok(())
}

/// Insert or replace a state for `frame`, resolving conflicts so that the
/// new state is the one visible there.
///
/// Decision table for `frame`:
///
/// | target      | existing                       | result                                              |
/// |-------------|--------------------------------|-----------------------------------------------------|
/// | `None`      | anything                       | new state alone, ubiquitous                         |
/// | `f >= 0`    | a state bound to `f`           | its values replaced                                 |
/// | `f >= 0`    | ubiquitous state               | that state avoids `f`; new state bound to `f`       |
/// | `f >= 0`    | avoiding state (hides `a`)     | avoider expanded into single-frame copies over      |
/// |             |                                | `0..n` except `a` and `f`; new state bound to `f`   |
/// | `f >= 0`    | single-frame states only       | new state appended                                  |
/// | `f < 0`     | anything                       | only a state bound to `-f - 1` survives; new avoider|
///
/// `n` is `n_frames`, or `max(a, f) + 1` when not given.
pub fn set_state(
    states: &mut Vec<DescriptorState>,
    state: DescriptorState,
    frame: Option<i32>,
    n_frames: Option<usize>,
) {
    let Some(frame) = frame else {
        states.clear();
        states.push(state.with_frame(None));
        return;
    };

    if frame < 0 {
        let avoided = !frame;
        states.retain(|s| s.z_frame == Some(avoided));
        states.push(state.with_frame(Some(frame)));
        return;
    }

    if let Some(existing) = states.iter_mut().find(|s| s.z_frame == Some(frame)) {
        existing.assign_values(&state);
        return;
    }

    if let Some(i) = states.iter().position(DescriptorState::is_ubiquitous) {
        let mut previous = states.swap_remove(i);
        previous.z_frame = Some(!frame);
        states.clear();
        states.push(previous);
        states.push(state.with_frame(Some(frame)));
        return;
    }

    if let Some(i) = states.iter().position(DescriptorState::is_frame_avoiding) {
        let avoider = states.remove(i);
        let avoided = avoider.avoided_frame().unwrap_or_default();
        expand_avoiding(states, &avoider, &[avoided, frame], n_frames);
    }

    states.push(state.with_frame(Some(frame)));
}

/// Replace a frame-avoiding state by explicit single-frame copies over
/// `0..n`, skipping `exclude` and frames that already have a state.
fn expand_avoiding(
    states: &mut Vec<DescriptorState>,
    avoider: &DescriptorState,
    exclude: &[i32],
    n_frames: Option<usize>,
) {
    let n = n_frames.unwrap_or_else(|| {
        exclude
            .iter()
            .copied()
            .max()
            .and_then(|m| usize::try_from(m).ok())
            .map_or(0, |m| m + 1)
    });
    debug!(
        z_frame = ?avoider.z_frame,
        n_frames = n,
        "Expanding frame-avoiding state into single-frame states"
    );
    for f in 0..frame_limit(n) {
        if exclude.contains(&f) || states.iter().any(|s| s.z_frame == Some(f)) {
            continue;
        }
        states.push(avoider.with_frame(Some(f)));
    }
}

/// Move the state at `index` to `new_frame`.
///
/// With `check_visible` the moved state wins any conflict, resolved as in
/// [`set_state`]. Without it a conflict is an error and nothing changes.
/// Returns `false` when there is no state at `index`.
pub fn set_frame_index(
    states: &mut Vec<DescriptorState>,
    index: usize,
    new_frame: Option<i32>,
    check_visible: bool,
    n_frames: Option<usize>,
) -> Result<bool> {
    if index >= states.len() {
        return Ok(false);
    }

    if !check_visible {
        let mut candidate = states.clone();
        candidate[index].z_frame = new_frame;
        validate_states(&candidate)?;
        *states = candidate;
        return Ok(true);
    }

    let moved = states.remove(index);
    set_state(states, moved, new_frame, n_frames);
    Ok(true)
}

/// Apply a [`FrameIndexSpec`] to a state list.
///
/// `current_frame` selects the state used as a template when one is
/// needed. Invalid specs leave the list untouched.
pub fn set_frame_indices(
    states: &mut Vec<DescriptorState>,
    spec: &FrameIndexSpec,
    current_frame: i32,
) -> Result<()> {
    match spec {
        FrameIndexSpec::Ubiquitous => {
            if let Some(template) = template_state(states, current_frame) {
                let template = template.with_frame(None);
                states.clear();
                states.push(template);
            }
            Ok(())
        }
        FrameIndexSpec::Frames(frames) if frames.is_empty() => {
            set_frame_indices(states, &FrameIndexSpec::Ubiquitous, current_frame)
        }
        FrameIndexSpec::Frames(frames) => {
            let mut seen = Vec::with_capacity(frames.len());
            for f in frames {
                if *f < 0 {
                    return Err(FrameError::NegativeFrame(*f).into());
                }
                if seen.contains(f) {
                    return Err(FrameError::DuplicateFrame(*f).into());
                }
                seen.push(*f);
            }

            let Some(fallback) = template_state(states, current_frame).cloned() else {
                return Ok(());
            };
            let distributed = frames
                .iter()
                .map(|f| {
                    get_state(states, *f, true)
                        .unwrap_or(&fallback)
                        .with_frame(Some(*f))
                })
                .collect();
            *states = distributed;
            Ok(())
        }
        FrameIndexSpec::Remap(map) => remap_frame_state_associations(states, map),
    }
}

/// Rebind states whose `z_frame` is a key of `map` to the mapped value.
///
/// Fails without changes when two targets coincide or the result would
/// break a visibility rule.
pub fn remap_frame_state_associations(
    states: &mut Vec<DescriptorState>,
    map: &BTreeMap<Option<i32>, Option<i32>>,
) -> Result<()> {
    let mut targets: Vec<Option<i32>> = Vec::with_capacity(map.len());
    for target in map.values() {
        if targets.contains(target) {
            return Err(FrameError::DuplicateTarget(*target).into());
        }
        targets.push(*target);
    }

    let remapped: Vec<DescriptorState> = states
        .iter()
        .map(|s| match map.get(&s.z_frame) {
            Some(target) => s.with_frame(*target),
            None => s.clone(),
        })
        .collect();
    validate_states(&remapped)?;
    *states = remapped;
    Ok(())
}

/// Copy the values of `source` into the states bound to each of `frames`.
pub fn propagate_state(
    states: &mut Vec<DescriptorState>,
    source: &DescriptorState,
    frames: &[i32],
    n_frames: Option<usize>,
) -> Result<()> {
    if let Some(f) = frames.iter().find(|f| **f < 0) {
        return Err(FrameError::NegativeFrame(*f).into());
    }
    for f in frames {
        set_state(states, source.clone(), Some(*f), n_frames);
    }
    Ok(())
}

/// Remove the state bound exactly to `z_frame`.
pub fn remove_state(states: &mut Vec<DescriptorState>, z_frame: Option<i32>) -> Option<DescriptorState> {
    states
        .iter()
        .position(|s| s.z_frame == z_frame)
        .map(|i| states.remove(i))
}

/// Exclusive upper frame for an expansion over `n_frames` frames.
fn frame_limit(n_frames: usize) -> i32 {
    i32::try_from(n_frames).unwrap_or(i32::MAX)
}

fn template_state(states: &[DescriptorState], current_frame: i32) -> Option<&DescriptorState> {
    get_state(states, current_frame, true).or_else(|| states.first())
}
