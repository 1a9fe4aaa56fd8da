//! A marine diesel engine driven by manufacturer lookup tables.
//!
//! The engine owns two power-indexed tables per NOx tier (power to RPM and
//! power to efficiency, loaded from two-column text files) and a layout
//! curve of four brake-power break points, one per operational load tier.
//! Throttle demand maps the current speed ratio through a hyperbolic
//! tangent onto the table's power range, so demand saturates smoothly at
//! both ends instead of slamming between idle and MCR.

use crate::ConfigError;
use crate::table::Table;

use serde::{Serialize, Deserialize};

use std::fmt;
use std::io::BufRead;

/// Throttle steepness; demand covers most of the power range between 20%
/// and 80% of maximum speed.
const THROTTLE_SLOPE: f64 = 6.0;
/// Speed ratio at which throttle demand crosses half of the power range.
const THROTTLE_MIDPOINT: f64 = 0.5;

// EngineLoad {{{1
/// Discrete operational load tiers, ordered from lightest to heaviest.
#[derive(PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum EngineLoad {
    Low,
    #[default]
    Economic,
    ReducedMcr,
    Mcr,
}

impl EngineLoad {
    fn index(&self) -> usize {
        match self {
            Self::Low        => 0,
            Self::Economic   => 1,
            Self::ReducedMcr => 2,
            Self::Mcr        => 3,
        }
    }

    fn higher(&self) -> Option<EngineLoad> {
        match self {
            Self::Low        => Some(Self::Economic),
            Self::Economic   => Some(Self::ReducedMcr),
            Self::ReducedMcr => Some(Self::Mcr),
            Self::Mcr        => None,
        }
    }

    fn lower(&self) -> Option<EngineLoad> {
        match self {
            Self::Low        => None,
            Self::Economic   => Some(Self::Low),
            Self::ReducedMcr => Some(Self::Economic),
            Self::Mcr        => Some(Self::ReducedMcr),
        }
    }
}

impl fmt::Display for EngineLoad { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Low        => "low load",
            Self::Economic   => "economic",
            Self::ReducedMcr => "reduced MCR",
            Self::Mcr        => "MCR",
        })
    }
}

// NoxTier {{{1
/// IMO NOx emission tier; Tier III runs the after-treatment table set.
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum NoxTier {
    #[default]
    TierII,
    TierIII,
}

// TableSet {{{1
/// The power-indexed lookup pair for one NOx tier.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct TableSet {
    /// Brake power (kW) to crankshaft RPM.
    pub rpm: Table,
    /// Brake power (kW) to mechanical efficiency fraction.
    pub efficiency: Table,
}

impl TableSet {
    /// Load both tables from two-column text.
    ///
    pub fn parse<R: BufRead, Q: BufRead>(rpm: R, efficiency: Q)
        -> Result<TableSet, std::io::Error>
    {
        Ok(TableSet {
            rpm: Table::parse(rpm)?,
            efficiency: Table::parse(efficiency)?,
        })
    }
}

// Engine {{{1
/// One engine: layout curve, lookup tables, current load tier and NOx tier.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Engine {
    /// Layout-curve brake power (kW) at each load tier, lightest first.
    layout: [f64; 4],
    tier2: TableSet,
    tier3: TableSet,
    load: EngineLoad,
    nox: NoxTier,
}

impl Engine {
    pub fn new(layout: [f64; 4], tier2: TableSet, tier3: TableSet) -> Engine {
        Engine {
            layout,
            tier2,
            tier3,
            load: EngineLoad::default(),
            nox: NoxTier::default(),
        }
    }

    fn active(&self) -> &TableSet {
        match self.nox {
            NoxTier::TierII  => &self.tier2,
            NoxTier::TierIII => &self.tier3,
        }
    }

    // Load tier {{{2
    pub fn load(&self) -> EngineLoad {
        self.load
    }

    /// Layout-curve brake power (kW) at the current load tier.
    pub fn tier_power(&self) -> f64 {
        self.layout[self.load.index()]
    }

    /// Step one tier heavier. Returns false when already at MCR.
    ///
    pub fn request_higher_power(&mut self) -> bool {
        match self.load.higher() {
            Some(next) => { self.load = next; true }
            None       => false,
        }
    }

    /// Step one tier lighter. Returns false when already at low load.
    ///
    pub fn request_lower_power(&mut self) -> bool {
        match self.load.lower() {
            Some(next) => { self.load = next; true }
            None       => false,
        }
    }

    // NOx tier {{{2
    pub fn nox_tier(&self) -> NoxTier {
        self.nox
    }

    /// Switch emission tier; swaps the active lookup tables.
    pub fn set_nox_tier(&mut self, tier: NoxTier) {
        self.nox = tier;
    }

    // Power {{{2
    /// Throttle demand for a speed ratio, in [0, 1].
    ///
    fn throttle(speed_ratio: f64) -> f64 {
        0.5 * (1.0 + (THROTTLE_SLOPE * (speed_ratio - THROTTLE_MIDPOINT)).tanh())
    }

    /// Raw brake-power demand (kW) for a current/maximum speed ratio,
    /// clamped to the active table's power range and to the layout-curve
    /// ceiling of the current load tier.
    ///
    pub fn raw_power(&self, speed_ratio: f64) -> Result<f64, ConfigError> {
        let floor = self.active().rpm.min_x()?;
        let ceiling = self.active().rpm.max_x()?
            .min(self.tier_power())
            .max(floor);

        Ok(floor + Self::throttle(speed_ratio) * (ceiling - floor))
    }

    /// Mechanical efficiency at a raw power (kW).
    pub fn efficiency(&self, raw_power: f64) -> Result<f64, ConfigError> {
        self.active().efficiency.interpolate(raw_power)
    }

    /// Crankshaft RPM at a raw power (kW).
    pub fn rpm_at(&self, raw_power: f64) -> Result<f64, ConfigError> {
        self.active().rpm.interpolate(raw_power)
    }

    /// Delivered brake power (kW) for a speed ratio: raw demand times the
    /// efficiency interpolated at that raw demand.
    ///
    pub fn output_power(&self, speed_ratio: f64) -> Result<f64, ConfigError> {
        let raw = self.raw_power(speed_ratio)?;
        Ok(raw * self.efficiency(raw)?)
    }

    /// Crankshaft RPM for a speed ratio.
    ///
    pub fn rpm(&self, speed_ratio: f64) -> Result<f64, ConfigError> {
        self.rpm_at(self.raw_power(speed_ratio)?)
    }
}
