// src/data_input/profile.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{AnalysisError, Result};

/// One timed maneuver from a motion profile, in profile ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManeuverDescriptor {
    pub time: f64,
    pub fade_duration: f64,
    pub total_duration: f64,
    pub omega: Vec<f64>, // length 1 (single axis) or 3
    pub gain: Vec<f64>,
    pub phase: Vec<f64>,
    pub axis: String,
}

fn as_number_list(value: &Value) -> Option<Vec<f64>> {
    match value {
        Value::Number(n) => n.as_f64().map(|v| vec![v]),
        Value::Array(items) => items.iter().map(Value::as_f64).collect(),
        _ => None,
    }
}

fn axis_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn field<'a>(value: &'a Value, pointer: &str, field: &'static str, index: usize) -> Result<&'a Value> {
    value
        .pointer(pointer)
        .filter(|v| !v.is_null())
        .ok_or(AnalysisError::MissingField { field, index })
}

fn number(value: &Value, pointer: &str, name: &'static str, index: usize) -> Result<f64> {
    field(value, pointer, name, index)?
        .as_f64()
        .ok_or(AnalysisError::MissingField { field: name, index })
}

fn number_list(value: &Value, pointer: &str, name: &'static str, index: usize) -> Result<Vec<f64>> {
    as_number_list(field(value, pointer, name, index)?)
        .ok_or(AnalysisError::MissingField { field: name, index })
}

impl ManeuverDescriptor {
    /// Builds a descriptor from one entry of the profile's `moves` array.
    pub fn from_move(entry: &Value, index: usize) -> Result<Self> {
        let omega = number_list(entry, "/move/profile/omg", "profile.omg", index)?;
        if omega.len() != 1 && omega.len() != 3 {
            return Err(AnalysisError::MissingField {
                field: "profile.omg",
                index,
            });
        }
        Ok(Self {
            time: number(entry, "/time", "time", index)?,
            fade_duration: number(entry, "/move/profile/Tfade", "profile.Tfade", index)?,
            total_duration: number(entry, "/move/profile/Ttotal", "profile.Ttotal", index)?,
            omega,
            gain: number_list(entry, "/move/profile/gain", "profile.gain", index)?,
            phase: number_list(entry, "/move/profile/phi0", "profile.phi0", index)?,
            axis: axis_label(field(entry, "/move/axis", "axis", index)?),
        })
    }

    /// Start shifted later by `offset` ticks.
    pub fn shifted(&self, offset: f64) -> Self {
        Self {
            time: self.time + offset,
            ..self.clone()
        }
    }
}

/// Extracts the descriptors of every move whose profile type contains `kind`.
///
/// Moves without a profile, or of another kind, are ignored. Matching moves
/// missing a required field are skipped with a warning.
pub fn parse_profile(document: &Value, kind: &str) -> Vec<ManeuverDescriptor> {
    let Some(moves) = document.get("moves").and_then(Value::as_array) else {
        warn!("Profile has no 'moves' array");
        return Vec::new();
    };

    let mut descriptors = Vec::new();
    for (index, entry) in moves.iter().enumerate() {
        let matches_kind = entry
            .pointer("/move/profile/type")
            .and_then(Value::as_str)
            .map(|t| t.contains(kind))
            .unwrap_or(false);
        if !matches_kind {
            continue;
        }
        match ManeuverDescriptor::from_move(entry, index) {
            Ok(descriptor) => descriptors.push(descriptor),
            Err(e) => warn!("Skipping maneuver: {}", e),
        }
    }
    descriptors
}

/// Reads a JSON motion profile from disk.
pub fn read_profile(path: &Path, kind: &str) -> Result<Vec<ManeuverDescriptor>> {
    let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
    let document: Value =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| AnalysisError::json(path, e))?;
    let descriptors = parse_profile(&document, kind);
    info!("Read {} '{}' maneuvers from {}", descriptors.len(), kind, path.display());
    Ok(descriptors)
}

/// Concatenates profiles played back to back. Every descriptor of a later
/// source is shifted by the end (`time + total_duration`) of the last
/// descriptor chained so far.
pub fn chain_profiles(sources: Vec<Vec<ManeuverDescriptor>>) -> Vec<ManeuverDescriptor> {
    let mut chained: Vec<ManeuverDescriptor> = Vec::new();
    for source in sources {
        let offset = chained
            .last()
            .map(|last| last.time + last.total_duration)
            .unwrap_or(0.0);
        chained.extend(source.iter().map(|d| d.shifted(offset)));
    }
    chained
}
