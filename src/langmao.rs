//! The Lang and Mao added-resistance method.
//!
//! A semi-empirical model for speed loss in a seaway: wind resistance from
//! the relative wind projected on the heading, and wave resistance split
//! into a reflection term (bow geometry and wave amplitude) and a motion
//! term (pitch and heave, coupled through the longitudinal radius of
//! gyration). Unlike Holtrop, every wave formula here reads the
//! [`Environment`] sea state; a flat calm yields zero wave resistance.
//!
//! The model has no counterpart to the bulbous-bow, transom or correlation
//! terms; those components report zero. Propulsion factors are outside the
//! model's scope and delegate to the Holtrop regressions.

use crate::ConfigError;
use crate::holtrop::HoltropMethod;
use crate::hull::Hull;
use crate::hydro;
use crate::resistance::{Environment, ResistanceMethod, ittc_friction_line, resolve_speed};

use log::error;
use serde::{Serialize, Deserialize};

use std::f64::consts::PI;

/// Longitudinal radius of gyration as a fraction of length; class-society
/// guidance value.
const KYY: f64 = 0.25;

/// Upper Froude number of the model's published validation range.
const MAX_FROUDE: f64 = 0.3;

/// Wind drag coefficient of the above-water body.
const WIND_DRAG_COEF: f64 = 0.8;

// LangMaoMethod {{{1
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub struct LangMaoMethod;

impl LangMaoMethod {
    pub fn new() -> LangMaoMethod {
        LangMaoMethod
    }

    fn check_domain(&self, hull: &Hull, v: f64) -> Result<f64, ConfigError> {
        let froude = hydro::froude_number(v, hull.lwl);
        if froude > MAX_FROUDE {
            return Err(ConfigError::FroudeDomain {
                method: "Lang and Mao",
                froude,
                max: MAX_FROUDE,
            });
        }
        Ok(froude)
    }

    // reflection {{{2
    /// Wave reflection resistance off the bow, after the NMRI short-wave
    /// formula: driven by wave amplitude, the entrance angle, and draft
    /// relative to the wave length.
    fn reflection(&self, hull: &Hull, env: &Environment, froude: f64) -> f64 {
        let amplitude = env.wave_height / 2.0;
        if amplitude <= 0.0 { return 0.0; }

        if env.wave_length <= 0.0 {
            error!("lang-mao: waves of height {} but non-positive length {}",
                   env.wave_height, env.wave_length);
            return 0.0;
        }

        // Short waves reflect fully off a deep hull; long waves pass under.
        let wave_number = 2.0 * PI / env.wave_length;
        let draft_effect = 1.0 - (-2.0 * wave_number * hull.mean_draft).exp();

        let entrance = hull.half_entrance_angle().to_radians();
        let advance = 1.0 + 5.0 * (hull.lwl / env.wave_length).sqrt() * froude;

        // Fine hulls reflect more per unit beam than full ones.
        let fullness = if hull.cb < 0.75 {
            (0.87 / hull.cb).powf(1.0 + 4.0 * froude.sqrt())
        } else {
            1.0
        };

        1.125 * hydro::WATER_RHO * hydro::GRAVITY
            * amplitude * amplitude * hull.beam
            * entrance.sin().powi(2)
            * draft_effect * advance * fullness
    }

    // motion {{{2
    /// Added resistance from wave-induced pitch and heave near resonance.
    fn motion(&self, hull: &Hull, env: &Environment, v: f64, froude: f64) -> f64 {
        let amplitude = env.wave_height / 2.0;
        if amplitude <= 0.0 || v <= 0.0 { return 0.0; }

        if env.wave_frequency <= 0.0 {
            error!("lang-mao: waves of height {} but non-positive frequency {}",
                   env.wave_height, env.wave_frequency);
            return 0.0;
        }

        // Non-dimensional encounter frequency tuned by the pitch gyradius.
        let omega_bar = (hull.lwl / hydro::GRAVITY).sqrt()
            * KYY.powf(1.0 / 3.0)
            * env.wave_frequency
            / (1.17 * froude.powf(-0.143));

        let (b1, d1) = if omega_bar < 1.0 {
            (11.0, 14.0)
        } else {
            (-8.5, -566.0 * (hull.lwl / hull.beam).powf(-2.66))
        };

        let fullness = if hull.cb < 0.75 {
            (0.87 / hull.cb).powf(1.0 + froude)
        } else {
            1.0
        };
        let a1 = 60.3 * hull.cb.powf(1.34) * fullness;

        let response = omega_bar.powf(b1)
            * ((b1 / d1) * (1.0 - omega_bar.powf(d1))).exp()
            * a1
            * froude.powf(1.5)
            * (-3.5 * froude).exp();

        4.0 * hydro::WATER_RHO * hydro::GRAVITY
            * amplitude * amplitude
            * hull.beam * hull.beam / hull.lwl
            * response
    }
}

// ResistanceMethod for LangMaoMethod {{{1
impl ResistanceMethod for LangMaoMethod {
    fn method_name(&self) -> &'static str {
        "Lang and Mao Added Resistance Method"
    }

    /// Flat-plate ITTC friction; this model carries no form factor.
    fn frictional_resistance(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>
    {
        let v = resolve_speed(hull, speed);
        if v <= 0.0 { return Ok(0.0); }
        self.check_domain(hull, v)?;

        let rn = hydro::reynolds_number(v, hull.lwl, env.salinity, env.water_temp);
        Ok(0.5 * hydro::WATER_RHO * v * v * hull.wet_surface()? * ittc_friction_line(rn))
    }

    fn appendage_resistance(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>
    {
        let v = resolve_speed(hull, speed);
        if v <= 0.0 { return Ok(0.0); }
        self.check_domain(hull, v)?;

        let area = hull.appendage_area();
        if area == 0.0 { return Ok(0.0); }

        let rn = hydro::reynolds_number(v, hull.lwl, env.salinity, env.water_temp);
        Ok(0.5 * hydro::WATER_RHO * v * v
            * area * hull.appendage_form_factor()
            * ittc_friction_line(rn))
    }

    fn wave_resistance(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>
    {
        let v = resolve_speed(hull, speed);
        if v < 0.0 { return Ok(0.0); }
        let froude = self.check_domain(hull, v)?;

        Ok(self.reflection(hull, env, froude) + self.motion(hull, env, v, froude))
    }

    fn bulbous_bow_resistance(&self, _: &Hull, _: &Environment, _: Option<f64>)
        -> Result<f64, ConfigError>
    {
        Ok(0.0)
    }

    fn transom_pressure_resistance(&self, _: &Hull, _: &Environment, _: Option<f64>)
        -> Result<f64, ConfigError>
    {
        Ok(0.0)
    }

    fn correlation_resistance(&self, _: &Hull, _: &Environment, _: Option<f64>)
        -> Result<f64, ConfigError>
    {
        Ok(0.0)
    }

    /// Drag of the relative wind, signed: a following wind stronger than the
    /// ship's own speed produces a negative (propulsive) value.
    fn air_resistance(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>
    {
        let v = resolve_speed(hull, speed);
        let relative = v + env.head_wind();

        Ok(0.5 * hydro::AIR_RHO * WIND_DRAG_COEF
            * hull.above_water_area * relative * relative.abs())
    }

    fn total_resistance(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>
    {
        Ok(self.frictional_resistance(hull, env, speed)?
            + self.appendage_resistance(hull, env, speed)?
            + self.wave_resistance(hull, env, speed)?
            + self.bulbous_bow_resistance(hull, env, speed)?
            + self.transom_pressure_resistance(hull, env, speed)?
            + self.correlation_resistance(hull, env, speed)?
            + self.air_resistance(hull, env, speed)?)
    }

    fn resistance_coefficient(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>
    {
        let v = resolve_speed(hull, speed);
        if v <= 0.0 { return Ok(0.0); }

        let stagnation = 0.5 * hydro::WATER_RHO * v * v * hull.wet_surface()?;
        Ok(self.total_resistance(hull, env, speed)? / stagnation)
    }

    // Propulsion factors delegate to the Holtrop regressions {{{2
    fn wake_fraction(&self, hull: &Hull, env: &Environment, speed: Option<f64>)
        -> Result<f64, ConfigError>
    {
        HoltropMethod::new().wake_fraction(hull, env, speed)
    }

    fn thrust_deduction(&self, hull: &Hull, env: &Environment)
        -> Result<f64, ConfigError>
    {
        HoltropMethod::new().thrust_deduction(hull, env)
    }

    fn rotation_efficiency(&self, hull: &Hull, env: &Environment)
        -> Result<f64, ConfigError>
    {
        HoltropMethod::new().rotation_efficiency(hull, env)
    }
}

#[cfg(test)] // Testing LangMaoMethod {{{1
mod langmao {
    use super::*;
    use crate::test_support::*;

    fn fixture() -> (Hull, Environment) {
        let mut hull = reference_hull();
        hull.set_speed_knots(15.0);
        let env = Environment {
            wave_height: 2.0,
            wave_length: 100.0,
            wave_frequency: 0.785,
            ..Environment::default()
        };
        (hull, env)
    }

    #[test]
    fn flat_calm_has_no_wave_resistance() {
        let (hull, _) = fixture();
        let calm = Environment::default();
        let r = LangMaoMethod::new().wave_resistance(&hull, &calm, None).unwrap();
        assert_eq!(0.0, r);
    }

    #[test]
    fn seaway_adds_wave_resistance() {
        let (hull, env) = fixture();
        let r = LangMaoMethod::new().wave_resistance(&hull, &env, None).unwrap();
        assert!(r > 0.0);
    }

    #[test]
    fn froude_above_domain_is_config_error() {
        let (mut hull, env) = fixture();
        hull.set_speed_knots(25.0); // Fn 0.338
        assert!(matches!(
            LangMaoMethod::new().wave_resistance(&hull, &env, None),
            Err(ConfigError::FroudeDomain { method: "Lang and Mao", .. }),
        ));
    }

    #[test]
    fn waves_without_length_degrade_to_zero() {
        let (hull, mut env) = fixture();
        env.wave_length = 0.0;
        env.wave_frequency = 0.0;
        let r = LangMaoMethod::new().wave_resistance(&hull, &env, None).unwrap();
        assert_eq!(0.0, r);
    }

    #[test]
    fn head_wind_raises_air_resistance() {
        let (hull, mut env) = fixture();
        let m = LangMaoMethod::new();
        let still = m.air_resistance(&hull, &env, None).unwrap();

        env.wind_speed = 10.0;
        env.wind_direction = 180.0; // blowing toward the bow
        let windy = m.air_resistance(&hull, &env, None).unwrap();
        assert!(windy > still);
    }

    #[test]
    fn strong_following_wind_is_propulsive() {
        let (hull, mut env) = fixture();
        env.wind_speed = 20.0;
        env.wind_direction = 0.0; // dead astern, faster than the ship
        let r = LangMaoMethod::new().air_resistance(&hull, &env, None).unwrap();
        assert!(r < 0.0);
    }

    #[test]
    fn total_is_exactly_the_component_sum() {
        let (hull, env) = fixture();
        let m = LangMaoMethod::new();

        let sum = m.frictional_resistance(&hull, &env, None).unwrap()
            + m.appendage_resistance(&hull, &env, None).unwrap()
            + m.wave_resistance(&hull, &env, None).unwrap()
            + m.bulbous_bow_resistance(&hull, &env, None).unwrap()
            + m.transom_pressure_resistance(&hull, &env, None).unwrap()
            + m.correlation_resistance(&hull, &env, None).unwrap()
            + m.air_resistance(&hull, &env, None).unwrap();

        assert_eq!(sum, m.total_resistance(&hull, &env, None).unwrap());
    }

    #[test]
    fn frictional_carries_no_form_factor() {
        let (hull, env) = fixture();
        let lang = LangMaoMethod::new()
            .frictional_resistance(&hull, &env, None).unwrap();
        let holtrop = HoltropMethod::new()
            .frictional_resistance(&hull, &env, None).unwrap();
        assert!(lang < holtrop);
    }

    #[test]
    fn propulsion_factors_match_holtrop() {
        let (hull, env) = fixture();
        let lang = LangMaoMethod::new();
        let holtrop = HoltropMethod::new();
        assert_eq!(
            holtrop.wake_fraction(&hull, &env, None).unwrap(),
            lang.wake_fraction(&hull, &env, None).unwrap(),
        );
        assert_eq!(
            holtrop.thrust_deduction(&hull, &env).unwrap(),
            lang.thrust_deduction(&hull, &env).unwrap(),
        );
    }

    #[test]
    fn reflection_and_motion_reference_values() {
        let (hull, env) = fixture();
        let m = LangMaoMethod::new();
        let v = hull.speed();
        let froude = hydro::froude_number(v, hull.lwl);

        assert_eq!(79.764, to_place(m.reflection(&hull, &env, froude) / 1000.0, 3));
        assert_eq!(131.205, to_place(m.motion(&hull, &env, v, froude) / 1000.0, 3));
    }

    #[test]
    fn method_name() {
        assert_eq!("Lang and Mao Added Resistance Method",
                   LangMaoMethod::new().method_name());
    }
}
