pub const SHIP_FILE_EXT: &str = "ship";

pub mod engine;
pub mod gearbox;
pub mod holtrop;
pub mod hull;
pub mod hydro;
pub mod langmao;
pub mod propeller;
pub mod resistance;
pub mod simulator;
pub mod table;
pub mod units;

use holtrop::HoltropMethod;
use hull::Hull;
use langmao::LangMaoMethod;
use propeller::Propeller;
use resistance::{Environment, ResistanceMethod};

use serde::{Serialize, Deserialize};
use thiserror::Error;

use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve a user-supplied ship file path, supplying the standard extension
/// when none is given.
fn ship_path(p: &str) -> PathBuf {
    let path = Path::new(p);
    match path.extension() {
        Some(_) => path.to_path_buf(),
        None    => path.with_extension(SHIP_FILE_EXT),
    }
}


// ConfigError {{{1
/// Configuration and logic errors: a setup bug, not a runtime condition to
/// recover from. Malformed physical inputs are the other policy entirely;
/// those degrade to zero with a logged diagnostic inside [`hydro`].
///
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("lookup table has no samples")]
    EmptyTable,

    #[error("unphysical configuration: {0}")]
    Unphysical(&'static str),

    #[error("Froude number {froude:.3} outside the {method} method's domain (max {max})")]
    FroudeDomain {
        method: &'static str,
        froude: f64,
        max: f64,
    },

    #[error("gear ratio must be positive, got {0}")]
    GearRatio(f64),
}

// MethodSelector {{{1
/// The resistance prediction method a ship runs with.
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum MethodSelector {
    #[default]
    Holtrop,
    LangMao,
}

impl From<&str> for MethodSelector {
    fn from(index: &str) -> Self {
        match index {
            "langmao" | "lang-mao" => Self::LangMao,
            _                      => Self::Holtrop,
        }
    }
}

impl fmt::Display for MethodSelector { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Holtrop => "holtrop",
            Self::LangMao => "lang-mao",
        })
    }
}

impl MethodSelector {
    fn instantiate(&self) -> Box<dyn ResistanceMethod> {
        match self {
            Self::Holtrop => Box::new(HoltropMethod::new()),
            Self::LangMao => Box::new(LangMaoMethod::new()),
        }
    }

    fn default_method() -> Box<dyn ResistanceMethod> {
        MethodSelector::default().instantiate()
    }
}

// Ship {{{1
/// One ship: hull, environment, propulsion chain and the active resistance
/// method. The method is owned exclusively and replaced as a unit; each ship
/// gets its own instance, never a shared one.
///
#[derive(Serialize, Deserialize, Debug)]
pub struct Ship {
    /// Name of ship.
    pub name: String,

    /// Hull configuration.
    pub hull: Hull,
    /// Ambient water, wind and sea state.
    pub environment: Environment,
    /// Propulsion chain: propeller, gearbox, engines.
    pub propeller: Propeller,

    selector: MethodSelector,
    #[serde(skip, default = "MethodSelector::default_method")]
    method: Box<dyn ResistanceMethod>,
}

// Ship API {{{1
impl Ship {
    pub fn new(name: String, hull: Hull, propeller: Propeller) -> Ship {
        Ship {
            name,
            hull,
            environment: Environment::default(),
            propeller,
            selector: MethodSelector::default(),
            method: MethodSelector::default_method(),
        }
    }

    // Resistance method {{{2
    pub fn method(&self) -> &dyn ResistanceMethod {
        self.method.as_ref()
    }

    pub fn method_selector(&self) -> MethodSelector {
        self.selector
    }

    /// Swap the active resistance method; the old instance is discarded.
    ///
    pub fn set_method(&mut self, selector: MethodSelector) {
        self.selector = selector;
        self.method = selector.instantiate();
    }

    // Speed {{{2
    pub fn set_speed(&mut self, speed: f64) {
        self.hull.set_speed(speed);
    }

    pub fn set_speed_knots(&mut self, knots: f64) {
        self.hull.set_speed_knots(knots);
    }

    // Resistance and propulsion {{{2
    /// Total resistance (N) at the current speed.
    ///
    pub fn calculate_total_resistance(&self) -> Result<f64, ConfigError> {
        self.method.total_resistance(&self.hull, &self.environment, None)
    }

    /// Propeller thrust (N) at the current operating point.
    pub fn thrust(&self) -> Result<f64, ConfigError> {
        self.propeller.thrust(self.method.as_ref(), &self.hull, &self.environment)
    }

    /// Shaft torque (N·m) at the current operating point.
    pub fn torque(&self) -> Result<f64, ConfigError> {
        self.propeller.torque(self.method.as_ref(), &self.hull, &self.environment)
    }

    /// Shaft RPM at the current operating point.
    pub fn rpm(&self) -> Result<f64, ConfigError> {
        self.propeller.rpm(&self.hull)
    }

    /// Advance ratio `J` at the current operating point.
    pub fn advance_ratio(&self) -> Result<f64, ConfigError> {
        self.propeller.advance_ratio(self.method.as_ref(), &self.hull, &self.environment)
    }

    /// Effective thrust power (W) at the current operating point.
    pub fn effective_power(&self) -> Result<f64, ConfigError> {
        self.propeller.effective_power(self.method.as_ref(), &self.hull, &self.environment)
    }

    // load {{{2
    /// Load ship from a file.
    ///
    pub fn load(p: String) -> Result<Ship, Box<dyn StdError>> {
        let s = fs::read_to_string(ship_path(&p))?;
        let mut ship: Ship = serde_json::from_str(&s)?;
        ship.method = ship.selector.instantiate();

        Ok(ship)
    }

    // save {{{2
    /// Save ship to a file.
    ///
    pub fn save(&self, p: String) -> Result<(), Box<dyn StdError>> {
        let s = serde_json::to_string(&self)?;
        fs::write(ship_path(&p), s)?;

        Ok(())
    }

    // report {{{2
    /// Print report.
    ///
    pub fn report(&self) -> Result<String, ConfigError> {
        use format_num::format_num;

        let mut report: Vec<String> = Vec::new();
        let hull = &self.hull;
        let env = &self.environment;
        let method = self.method.as_ref();

        report.push(format!("{}, {} at {:.1} kn",
            self.name, method.method_name(), hull.speed_knots()));
        report.push("".to_string());

        report.push("Dimensions: waterline x beam x mean draught".to_string()); // {{{3
        report.push(format!("    {:.2} m x {:.2} m x {:.2} m, {} t displacement, {}",
            hull.lwl, hull.beam, hull.mean_draft,
            format_num!(",.0", hull.displacement * hydro::WATER_RHO / 1000.0),
            hull.screws,
        ));
        report.push("".to_string());

        report.push("Resistance:".to_string()); // {{{3
        for (label, force) in [
            ("frictional", method.frictional_resistance(hull, env, None)?),
            ("appendage", method.appendage_resistance(hull, env, None)?),
            ("wave", method.wave_resistance(hull, env, None)?),
            ("bulbous bow", method.bulbous_bow_resistance(hull, env, None)?),
            ("transom", method.transom_pressure_resistance(hull, env, None)?),
            ("correlation", method.correlation_resistance(hull, env, None)?),
            ("air", method.air_resistance(hull, env, None)?),
        ] {
            report.push(format!("    {:<12} {:>10} kN",
                label, format_num!(",.2", force / 1000.0)));
        }
        report.push(format!("    {:<12} {:>10} kN",
            "total", format_num!(",.2", self.calculate_total_resistance()? / 1000.0)));
        report.push("".to_string());

        report.push("Propulsion:".to_string()); // {{{3
        report.push(format!("    thrust {} kN, torque {} kN-m, {:.1} RPM, J = {:.3}",
            format_num!(",.2", self.thrust()? / 1000.0),
            format_num!(",.2", self.torque()? / 1000.0),
            self.rpm()?,
            self.advance_ratio()?,
        ));
        report.push(format!("    wake fraction {:.4}, thrust deduction {:.4}, hull efficiency {:.4}",
            method.wake_fraction(hull, env, None)?,
            method.thrust_deduction(hull, env)?,
            method.hull_efficiency(hull, env)?,
        ));
        report.push("".to_string());

        let warnings = hull.validity_warnings(hull.speed()); // {{{3
        if !warnings.is_empty() {
            report.push("Outside method validity range:".to_string());
            for w in warnings {
                report.push(format!("    {w}"));
            }
            report.push("".to_string());
        }

        Ok(report.join("\n"))
    }
}

#[cfg(test)] // Testing Ship {{{1
mod ship {
    use super::*;
    use crate::engine::{Engine, TableSet};
    use crate::gearbox::Gearbox;
    use crate::table::Table;
    use crate::test_support::*;

    fn reference_ship() -> Ship {
        let tables = TableSet {
            rpm: Table::from_points(vec![
                (1000.0, 45.0), (4000.0, 70.0), (7000.0, 85.0), (9930.0, 91.0),
            ]),
            efficiency: Table::from_points(vec![
                (1000.0, 0.32), (4000.0, 0.43), (7000.0, 0.47), (9930.0, 0.45),
            ]),
        };
        let mut engine = Engine::new([3000.0, 7500.0, 8900.0, 9930.0],
                                     tables.clone(), tables);
        while engine.request_higher_power() {}

        let propeller = Propeller {
            diameter: 5.0,
            open_water: Table::from_points(vec![
                (0.0, 0.0), (0.2, 0.28), (0.4, 0.48), (0.6, 0.58),
                (0.8, 0.55), (1.0, 0.35),
            ]),
            shaft_efficiency: 0.99,
            gearbox: Gearbox::new(vec![engine], 1.0, 0.98).unwrap(),
        };

        let mut hull = reference_hull();
        hull.max_speed = units::knots_to_mps(18.0);
        hull.set_speed_knots(15.0);

        Ship::new("Test Ship".into(), hull, propeller)
    }

    #[test]
    fn default_method_is_holtrop() {
        let ship = reference_ship();
        assert_eq!(MethodSelector::Holtrop, ship.method_selector());
        assert_eq!("Holtrop and Mennen Resistance Prediction Method",
                   ship.method().method_name());
    }

    #[test]
    fn method_swaps_as_a_unit() {
        let mut ship = reference_ship();
        let holtrop = ship.calculate_total_resistance().unwrap();

        ship.set_method(MethodSelector::LangMao);
        assert_eq!("Lang and Mao Added Resistance Method",
                   ship.method().method_name());
        let langmao = ship.calculate_total_resistance().unwrap();
        assert!(holtrop != langmao);
    }

    #[test]
    fn total_resistance_delegates_to_the_active_method() {
        let ship = reference_ship();
        let direct = ship.method()
            .total_resistance(&ship.hull, &ship.environment, None)
            .unwrap();
        assert_eq!(direct, ship.calculate_total_resistance().unwrap());
    }

    #[test]
    fn report_names_the_ship_and_method() {
        let ship = reference_ship();
        let report = ship.report().unwrap();
        assert!(report.contains("Test Ship"));
        assert!(report.contains("Holtrop and Mennen"));
        assert!(report.contains("Resistance:"));
        assert!(report.contains("Propulsion:"));
    }

    #[test]
    fn load_and_save_default_to_the_ship_extension() {
        let ship = reference_ship();
        let base = std::env::temp_dir().join("hullspeed_extension_test");
        let base = base.to_string_lossy().into_owned();

        ship.save(base.clone()).unwrap();
        let full = format!("{base}.{SHIP_FILE_EXT}");
        assert!(Path::new(&full).exists());

        let back = Ship::load(base).unwrap();
        assert_eq!(ship.hull.lwl, back.hull.lwl);
        fs::remove_file(full).unwrap();
    }

    #[test]
    fn json_round_trip_restores_the_selected_method() {
        let mut ship = reference_ship();
        ship.set_method(MethodSelector::LangMao);

        let text = serde_json::to_string(&ship).unwrap();
        let mut back: Ship = serde_json::from_str(&text).unwrap();
        back.method = back.selector.instantiate();

        assert_eq!(MethodSelector::LangMao, back.method_selector());
        assert_eq!(ship.hull.lwl, back.hull.lwl);
        assert_eq!(to_place(ship.hull.speed(), 9), to_place(back.hull.speed(), 9));
    }
}
