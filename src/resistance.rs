//! The pluggable resistance prediction contract.
//!
//! A method turns a hull and an operating point into component resistance
//! forces (N) and the propulsion-chain efficiencies the propeller needs.
//! Methods never mutate the hull; every evaluation is a pure function of
//! `(hull, environment, speed)`, so one method instance may be shared freely
//! across ships.

use crate::ConfigError;
use crate::hull::Hull;
use crate::hydro;

use serde::{Serialize, Deserialize};

use std::fmt;

// Environment {{{1
/// Ambient water, wind and sea state at the ship's position.
///
/// The Holtrop method reads only the water fields; the Lang-Mao method reads
/// all of them.
///
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct Environment {
    /// Water salinity as a mass fraction.
    pub salinity: f64,
    /// Water temperature (°C).
    pub water_temp: f64,
    /// True wind speed (m/s).
    pub wind_speed: f64,
    /// Direction the wind blows toward (degrees, true).
    pub wind_direction: f64,
    /// Ship heading (degrees, true).
    pub heading: f64,
    /// Significant wave height (m).
    pub wave_height: f64,
    /// Mean wave circular frequency (rad/s).
    pub wave_frequency: f64,
    /// Mean wave length (m).
    pub wave_length: f64,
}

impl Default for Environment {
    fn default() -> Environment {
        Environment {
            salinity: hydro::DEFAULT_SALINITY,
            water_temp: hydro::DEFAULT_WATER_TEMP,
            wind_speed: 0.0,
            wind_direction: 0.0,
            heading: 0.0,
            wave_height: 0.0,
            wave_frequency: 0.0,
            wave_length: 0.0,
        }
    }
}

impl Environment {
    /// Component of the true wind along the ship heading, positive against
    /// the ship's motion (a head wind).
    ///
    pub fn head_wind(&self) -> f64 {
        let relative = (self.wind_direction - self.heading).to_radians();
        -self.wind_speed * relative.cos()
    }
}

// ittc_friction_line {{{1
/// ITTC-1957 model-ship correlation line `0.075 / (log10 Rn - 2)²`.
///
/// A zero Reynolds number (the hydrology sentinel) yields zero, not NaN.
///
pub fn ittc_friction_line(rn: f64) -> f64 {
    if rn <= 0.0 { return 0.0; }

    0.075 / (rn.log10() - 2.0).powi(2)
}

// resolve_speed {{{1
/// The speed a method evaluates at: the override when given and meaningful,
/// the hull's current speed otherwise.
///
pub fn resolve_speed(hull: &Hull, speed: Option<f64>) -> f64 {
    match speed {
        Some(v) if !v.is_nan() => v,
        _                      => hull.speed(),
    }
}

// ResistanceMethod {{{1
/// A calm-water (or added) resistance prediction method.
///
/// All forces are in newtons. `speed` of `None` (or NaN) means the hull's
/// current speed. Class-1 configuration errors surface as `ConfigError`;
/// malformed physical inputs degrade to zero inside the hydrology layer.
///
pub trait ResistanceMethod: fmt::Debug {
    fn method_name(&self) -> &'static str;

    // Resistance components {{{2
    fn frictional_resistance(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>;
    fn appendage_resistance(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>;
    fn wave_resistance(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>;
    fn bulbous_bow_resistance(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>;
    fn transom_pressure_resistance(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>;
    fn correlation_resistance(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>;
    fn air_resistance(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>;

    /// Sum of every component above.
    fn total_resistance(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>;

    /// Total resistance expressed as a dimensionless coefficient over
    /// `½ ρ v² S`.
    fn resistance_coefficient(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>;

    // Propulsion quantities {{{2
    fn wake_fraction(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>;
    fn thrust_deduction(&self, hull: &Hull, env: &Environment)
        -> Result<f64, ConfigError>;
    fn rotation_efficiency(&self, hull: &Hull, env: &Environment)
        -> Result<f64, ConfigError>;

    /// Speed of advance at the propeller: `(1 - w) v`.
    fn speed_of_advance(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>
    {
        let v = resolve_speed(hull, speed);
        Ok((1.0 - self.wake_fraction(hull, env, speed)?) * v)
    }

    /// Hull efficiency `(1 - t) / (1 - w)`.
    fn hull_efficiency(&self, hull: &Hull, env: &Environment)
        -> Result<f64, ConfigError>
    {
        let w = self.wake_fraction(hull, env, None)?;
        if w >= 1.0 {
            return Err(ConfigError::Unphysical("wake fraction at or above 1"));
        }
        Ok((1.0 - self.thrust_deduction(hull, env)?) / (1.0 - w))
    }
}
