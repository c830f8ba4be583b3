// src/dof.rs
// Degree-of-freedom naming for the motion platform.
// The measured position dataset stores all six axes side by side; the index
// of each axis in that dataset follows `DOF_NAMES`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{ACC_CMD, ACC_MES, POS_CMD, POS_MES, VEL_CMD, VEL_MES};

/// Number of platform degrees of freedom.
pub const DOF_COUNT: usize = 6;

/// All DoF names in measured-dataset order.
pub const DOF_NAMES: [&str; DOF_COUNT] = ["x", "y", "z", "phi", "theta", "psi"];

/// One motion axis of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dof {
    X,
    Y,
    Z,
    Phi,
    Theta,
    Psi,
}

impl Dof {
    pub const ALL: [Dof; DOF_COUNT] = [Dof::X, Dof::Y, Dof::Z, Dof::Phi, Dof::Theta, Dof::Psi];

    /// Column index of this axis in the measured position dataset.
    pub fn index(self) -> usize {
        match self {
            Dof::X => 0,
            Dof::Y => 1,
            Dof::Z => 2,
            Dof::Phi => 3,
            Dof::Theta => 4,
            Dof::Psi => 5,
        }
    }

    pub fn name(self) -> &'static str {
        DOF_NAMES[self.index()]
    }

    /// The platform reports heave with the opposite sign to the command.
    pub fn measured_sign(self) -> f64 {
        if self == Dof::Z {
            -1.0
        } else {
            1.0
        }
    }

    /// Rotational axes are commanded in radians, translational ones in metres.
    pub fn is_rotational(self) -> bool {
        matches!(self, Dof::Phi | Dof::Theta | Dof::Psi)
    }

    pub fn from_index(index: usize) -> Option<Dof> {
        Dof::ALL.get(index).copied()
    }
}

impl fmt::Display for Dof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position, velocity or acceleration of one DoF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Quantity {
    Position,
    Velocity,
    Acceleration,
}

impl Quantity {
    pub const ALL: [Quantity; 3] = [Quantity::Position, Quantity::Velocity, Quantity::Acceleration];

    /// `(commanded, measured)` column names.
    pub fn columns(self) -> (&'static str, &'static str) {
        match self {
            Quantity::Position => (POS_CMD, POS_MES),
            Quantity::Velocity => (VEL_CMD, VEL_MES),
            Quantity::Acceleration => (ACC_CMD, ACC_MES),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quantity::Position => "Position",
            Quantity::Velocity => "Velocity",
            Quantity::Acceleration => "Acceleration",
        }
    }

    pub fn unit(self, dof: Dof) -> &'static str {
        match (self, dof.is_rotational()) {
            (Quantity::Position, false) => "m",
            (Quantity::Velocity, false) => "m/s",
            (Quantity::Acceleration, false) => "m/s²",
            (Quantity::Position, true) => "rad",
            (Quantity::Velocity, true) => "rad/s",
            (Quantity::Acceleration, true) => "rad/s²",
        }
    }
}
