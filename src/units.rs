use serde::{Serialize, Deserialize};
use std::fmt;

// SpeedUnit {{{1
#[derive(PartialEq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum SpeedUnit {
    #[default]
    MeterPerSecond,
    Knot,
}

impl From<&str> for SpeedUnit {
    fn from(index: &str) -> Self {
        match index {
            "kn" | "knot" | "knots" => Self::Knot,
            _                       => Self::MeterPerSecond,
        }
    }
}

impl fmt::Display for SpeedUnit { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}",
            match self {
                Self::MeterPerSecond => "m/s",
                Self::Knot           => "kn",
            }
        )
    }
}

impl SpeedUnit { // {{{2
    /// A value in this unit, converted to meters per second.
    pub fn to_mps(&self, value: f64) -> f64 {
        match self {
            Self::MeterPerSecond => value,
            Self::Knot           => knots_to_mps(value),
        }
    }

    /// Meters per second converted to this unit.
    pub fn from_mps(&self, mps: f64) -> f64 {
        match self {
            Self::MeterPerSecond => mps,
            Self::Knot           => mps_to_knots(mps),
        }
    }
}

// Conversion constants {{{1
pub const KNOT2MPS: f64   = 0.514444;
pub const KW2W: f64       = 1000.0;
pub const RPM2RADPS: f64  = std::f64::consts::TAU / 60.0;

// Functions {{{1
//
pub fn knots_to_mps(kn: f64) -> f64 { // {{{2
    kn * KNOT2MPS
}

pub fn mps_to_knots(mps: f64) -> f64 { // {{{2
    mps / KNOT2MPS
}

pub fn rpm_to_rad_per_sec(rpm: f64) -> f64 { // {{{2
    rpm * RPM2RADPS
}
