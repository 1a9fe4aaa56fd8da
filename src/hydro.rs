//! Hydrology helpers: dimensionless flow numbers and seawater properties.
//!
//! Malformed physical input (negative speed or length, salinity or
//! temperature outside the correlation range) degrades to a zero result with
//! a logged diagnostic. Callers must treat a zero viscosity as a sentinel
//! failure, not a physical value.

use log::error;

// Physical constants {{{1
/// Standard gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.80665;
/// Reference seawater density (kg/m³).
pub const WATER_RHO: f64 = 1025.0;
/// Reference air density at sea level (kg/m³).
pub const AIR_RHO: f64 = 1.225;
/// Mean ocean salinity (kg of salt per kg of water).
pub const DEFAULT_SALINITY: f64 = 0.035;
/// Reference water temperature (°C) used by the ITTC friction line.
pub const DEFAULT_WATER_TEMP: f64 = 15.0;

// froude_number {{{1
/// Froude number `v / sqrt(g L)`.
///
/// Returns 0 for a negative speed or length.
///
pub fn froude_number(speed: f64, length: f64) -> f64 {
    if speed < 0.0 || length < 0.0 {
        error!("froude_number: negative input (speed {speed}, length {length})");
        return 0.0;
    }
    if length == 0.0 { return 0.0; } // catch divide by zero

    speed / (length * GRAVITY).sqrt()
}

// reynolds_number {{{1
/// Reynolds number `v L / nu` for seawater.
///
/// Returns 0 for a negative speed or length, or when the viscosity
/// correlation rejects its inputs.
///
pub fn reynolds_number(speed: f64, length: f64, salinity: f64, temp_c: f64) -> f64 {
    if speed < 0.0 || length < 0.0 {
        error!("reynolds_number: negative input (speed {speed}, length {length})");
        return 0.0;
    }

    let nu = kinematic_viscosity(salinity, temp_c);
    if nu == 0.0 { return 0.0; } // sentinel from kinematic_viscosity

    speed * length / nu
}

// kinematic_viscosity {{{1
/// Kinematic viscosity of seawater (m²/s).
///
/// Sharqawy, Lienhard and Zubair (2010) correlations for dynamic viscosity
/// and density, salinity as a mass fraction in [0, 1].
///
pub fn kinematic_viscosity(salinity: f64, temp_c: f64) -> f64 {
    if !(0.0..=1.0).contains(&salinity) || temp_c < 0.0 {
        error!("kinematic_viscosity: out of range (salinity {salinity}, temp {temp_c} degC)");
        return 0.0;
    }

    dynamic_viscosity(salinity, temp_c) / water_density(salinity, temp_c)
}

// water_density {{{1
/// Seawater density (kg/m³), Sharqawy et al. (2010) eq. 8.
///
pub fn water_density(salinity: f64, temp_c: f64) -> f64 {
    if !(0.0..=1.0).contains(&salinity) || temp_c < 0.0 {
        error!("water_density: out of range (salinity {salinity}, temp {temp_c} degC)");
        return 0.0;
    }

    let s = salinity;
    let t = temp_c;

    let fresh = 9.999e2 + 2.034e-2 * t - 6.162e-3 * t * t
        + 2.261e-5 * t.powi(3) - 4.657e-8 * t.powi(4);
    let salt = 8.020e2 * s - 2.001 * s * t + 1.677e-2 * s * t * t
        - 3.060e-5 * s * t.powi(3) - 1.613e-5 * s * s * t * t;

    fresh + salt
}

// dynamic_viscosity {{{2
/// Dynamic viscosity of seawater (Pa·s), Sharqawy et al. (2010) eq. 22/23.
///
fn dynamic_viscosity(salinity: f64, temp_c: f64) -> f64 {
    let s = salinity;
    let t = temp_c;

    let mu_fresh = 4.2844e-5 + 1.0 / (0.157 * (t + 64.993) * (t + 64.993) - 91.296);
    let a = 1.541 + 1.998e-2 * t - 9.52e-5 * t * t;
    let b = 7.974 - 7.561e-2 * t + 4.724e-4 * t * t;

    mu_fresh * (1.0 + a * s + b * s * s)
}
