//! A fixed-pitch propeller at the end of the propulsion chain.
//!
//! Thrust and torque come from the power delivered by the gearbox, degraded
//! through the open-water, relative-rotative, hull and shaft efficiencies.
//! The dimensionless groups of propeller theory (`J`, `K_T`, `K_Q`) are
//! exposed for reporting and for inverse RPM lookup.

use crate::ConfigError;
use crate::gearbox::Gearbox;
use crate::hull::Hull;
use crate::hydro;
use crate::resistance::{Environment, ResistanceMethod};
use crate::table::Table;
use crate::units;

use log::error;
use serde::{Serialize, Deserialize};

// Propeller {{{1
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Propeller {
    /// Propeller diameter (m).
    pub diameter: f64,
    /// Open-water efficiency indexed by advance ratio `J`.
    pub open_water: Table,
    /// Shaft line transmission efficiency fraction.
    pub shaft_efficiency: f64,
    pub gearbox: Gearbox,
}

impl Propeller {
    /// Throttle input for the engines: current over maximum speed.
    ///
    fn speed_ratio(hull: &Hull) -> f64 {
        if hull.max_speed <= 0.0 { return 0.0; } // catch divide by zero

        hull.speed() / hull.max_speed
    }

    // rpm {{{2
    /// Shaft RPM at the current throttle setting.
    pub fn rpm(&self, hull: &Hull) -> Result<f64, ConfigError> {
        self.gearbox.output_rpm(Self::speed_ratio(hull))
    }

    /// Shaft revolutions per second.
    fn revs(&self, hull: &Hull) -> Result<f64, ConfigError> {
        Ok(self.rpm(hull)? / 60.0)
    }

    // advance_ratio {{{2
    /// Advance ratio `J = v_a / (n D)` at the current operating point.
    ///
    pub fn advance_ratio(
        &self,
        method: &dyn ResistanceMethod,
        hull: &Hull,
        env: &Environment,
    ) -> Result<f64, ConfigError> {
        let n = self.revs(hull)?;
        if n == 0.0 { return Ok(0.0); } // catch divide by zero

        Ok(method.speed_of_advance(hull, env, None)? / (n * self.diameter))
    }

    /// Shaft RPM that holds a prescribed advance ratio at a given speed of
    /// advance. The inverse of [`advance_ratio`](Self::advance_ratio).
    ///
    pub fn rpm_for_advance_ratio(&self, advance_ratio: f64, speed_of_advance: f64)
        -> Result<f64, ConfigError>
    {
        if advance_ratio <= 0.0 || self.diameter <= 0.0 {
            return Err(ConfigError::Unphysical(
                "advance ratio and diameter must be positive for RPM lookup"));
        }

        Ok(60.0 * speed_of_advance / (advance_ratio * self.diameter))
    }

    // effective_power {{{2
    /// Power turned into useful thrust work (W): gearbox output through the
    /// open-water, relative-rotative, hull and shaft efficiencies.
    ///
    pub fn effective_power(
        &self,
        method: &dyn ResistanceMethod,
        hull: &Hull,
        env: &Environment,
    ) -> Result<f64, ConfigError> {
        let shaft_kw = self.gearbox.output_power(Self::speed_ratio(hull))?;
        let open_water = self.open_water
            .interpolate(self.advance_ratio(method, hull, env)?)?;

        Ok(shaft_kw * units::KW2W
            * open_water
            * method.rotation_efficiency(hull, env)?
            * method.hull_efficiency(hull, env)?
            * self.shaft_efficiency)
    }

    // thrust {{{2
    /// Thrust (N): effective power over speed of advance. A ship dead in the
    /// water has no meaningful advance speed; degrade to zero thrust rather
    /// than divide by it.
    ///
    pub fn thrust(
        &self,
        method: &dyn ResistanceMethod,
        hull: &Hull,
        env: &Environment,
    ) -> Result<f64, ConfigError> {
        let advance = method.speed_of_advance(hull, env, None)?;
        if advance < 1e-6 {
            error!("propeller: speed of advance {advance} too small for thrust");
            return Ok(0.0);
        }

        Ok(self.effective_power(method, hull, env)? / advance)
    }

    // torque {{{2
    /// Shaft torque (N·m): effective power over shaft angular speed.
    ///
    pub fn torque(
        &self,
        method: &dyn ResistanceMethod,
        hull: &Hull,
        env: &Environment,
    ) -> Result<f64, ConfigError> {
        let omega = units::rpm_to_rad_per_sec(self.rpm(hull)?);
        if omega == 0.0 { return Ok(0.0); } // catch divide by zero

        Ok(self.effective_power(method, hull, env)? / omega)
    }

    // Dimensionless coefficients {{{2
    /// Thrust coefficient `K_T = T / (ρ n² D⁴)`.
    ///
    pub fn thrust_coefficient(
        &self,
        method: &dyn ResistanceMethod,
        hull: &Hull,
        env: &Environment,
    ) -> Result<f64, ConfigError> {
        let n = self.revs(hull)?;
        if n == 0.0 { return Ok(0.0); } // catch divide by zero

        Ok(self.thrust(method, hull, env)?
            / (hydro::WATER_RHO * n * n * self.diameter.powi(4)))
    }

    /// Torque coefficient `K_Q = Q / (ρ n² D⁵)`.
    ///
    pub fn torque_coefficient(
        &self,
        method: &dyn ResistanceMethod,
        hull: &Hull,
        env: &Environment,
    ) -> Result<f64, ConfigError> {
        let n = self.revs(hull)?;
        if n == 0.0 { return Ok(0.0); } // catch divide by zero

        Ok(self.torque(method, hull, env)?
            / (hydro::WATER_RHO * n * n * self.diameter.powi(5)))
    }
}
