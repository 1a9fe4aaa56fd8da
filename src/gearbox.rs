//! A reduction gearbox aggregating one or more engines onto a shaft.

use crate::ConfigError;
use crate::engine::Engine;

use serde::{Serialize, Deserialize};

// Gearbox {{{1
/// N engines geared to one output shaft.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Gearbox {
    pub engines: Vec<Engine>,
    /// Input to output RPM ratio; a 5:1 reduction is 5.0.
    ratio: f64,
    /// Mechanical transmission efficiency fraction.
    efficiency: f64,
}

impl Gearbox {
    pub fn new(engines: Vec<Engine>, ratio: f64, efficiency: f64)
        -> Result<Gearbox, ConfigError>
    {
        if ratio <= 0.0 {
            return Err(ConfigError::GearRatio(ratio));
        }
        if efficiency <= 0.0 || efficiency > 1.0 {
            return Err(ConfigError::Unphysical(
                "gearbox efficiency must be within (0, 1]"));
        }
        Ok(Gearbox { engines, ratio, efficiency })
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    // output_power {{{2
    /// Delivered shaft power (kW): transmission efficiency times the summed
    /// engine brake powers.
    ///
    pub fn output_power(&self, speed_ratio: f64) -> Result<f64, ConfigError> {
        let mut sum = 0.0;
        for engine in &self.engines {
            sum += engine.output_power(speed_ratio)?;
        }
        Ok(self.efficiency * sum)
    }

    // output_rpm {{{2
    /// Shaft RPM after reduction.
    ///
    /// With several engines clutched in, the input RPM is the power-weighted
    /// average of the engine RPMs. No engines means a stopped shaft, not a
    /// division by zero.
    ///
    pub fn output_rpm(&self, speed_ratio: f64) -> Result<f64, ConfigError> {
        match self.engines.len() {
            0 => Ok(0.0),
            1 => Ok(self.engines[0].rpm(speed_ratio)? / self.ratio),
            _ => {
                let mut weighted = 0.0;
                let mut total_power = 0.0;
                for engine in &self.engines {
                    let power = engine.output_power(speed_ratio)?;
                    weighted += power * engine.rpm(speed_ratio)?;
                    total_power += power;
                }
                if total_power == 0.0 { return Ok(0.0); } // catch divide by zero

                Ok(weighted / total_power / self.ratio)
            }
        }
    }
}

#[cfg(test)] // Testing Gearbox {{{1
mod gearbox {
    use super::*;
    use crate::engine::TableSet;
    use crate::table::Table;
    use crate::test_support::*;

    fn engine(max_rpm: f64) -> Engine {
        let tables = TableSet {
            rpm: Table::from_points(vec![(1000.0, max_rpm / 2.0), (9930.0, max_rpm)]),
            efficiency: Table::from_points(vec![(1000.0, 0.40), (9930.0, 0.45)]),
        };
        let mut engine = Engine::new([3000.0, 7500.0, 8900.0, 9930.0],
                                     tables.clone(), tables);
        while engine.request_higher_power() {}
        engine
    }

    #[test]
    fn zero_or_negative_ratio_is_config_error() {
        assert!(matches!(Gearbox::new(vec![], 0.0, 0.98),
                         Err(ConfigError::GearRatio(_))));
        assert!(matches!(Gearbox::new(vec![], -2.0, 0.98),
                         Err(ConfigError::GearRatio(_))));
    }

    #[test]
    fn efficiency_outside_the_unit_interval_is_config_error() {
        assert!(matches!(Gearbox::new(vec![], 5.0, 0.0),
                         Err(ConfigError::Unphysical(_))));
        assert!(matches!(Gearbox::new(vec![], 5.0, -0.5),
                         Err(ConfigError::Unphysical(_))));
        assert!(matches!(Gearbox::new(vec![], 5.0, 1.2),
                         Err(ConfigError::Unphysical(_))));
    }

    #[test]
    fn no_engines_is_a_stopped_shaft() {
        let gearbox = Gearbox::new(vec![], 5.0, 0.98).unwrap();
        assert_eq!(0.0, gearbox.output_rpm(0.8).unwrap());
        assert_eq!(0.0, gearbox.output_power(0.8).unwrap());
    }

    #[test]
    fn single_engine_rpm_is_the_exact_ratio_division() {
        let gearbox = Gearbox::new(vec![engine(90.0)], 5.0, 0.98).unwrap();
        let engine_rpm = engine(90.0).rpm(0.8).unwrap();
        assert_eq!(engine_rpm / 5.0, gearbox.output_rpm(0.8).unwrap());
    }

    #[test]
    fn twin_engine_rpm_is_power_weighted() {
        let gearbox = Gearbox::new(vec![engine(90.0), engine(120.0)], 5.0, 0.98).unwrap();
        let rpm = gearbox.output_rpm(0.8).unwrap();

        // Identical powers: plain average of the two input RPMs.
        let a = engine(90.0).rpm(0.8).unwrap();
        let b = engine(120.0).rpm(0.8).unwrap();
        assert_eq!(to_place((a + b) / 2.0 / 5.0, 9), to_place(rpm, 9));
    }

    #[test]
    fn output_power_sums_engines_through_efficiency() {
        let one = Gearbox::new(vec![engine(90.0)], 5.0, 0.98).unwrap();
        let two = Gearbox::new(vec![engine(90.0), engine(90.0)], 5.0, 0.98).unwrap();
        assert_eq!(
            to_place(2.0 * one.output_power(0.8).unwrap(), 6),
            to_place(two.output_power(0.8).unwrap(), 6),
        );
        assert_eq!(
            to_place(one.efficiency() * engine(90.0).output_power(0.8).unwrap(), 6),
            to_place(one.output_power(0.8).unwrap(), 6),
        );
    }
}
