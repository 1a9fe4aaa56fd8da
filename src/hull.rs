use crate::ConfigError;
use crate::hydro;
use crate::units;

use derive_builder::Builder;
use log::warn;
use serde::{Serialize, Deserialize};

use std::collections::BTreeMap;
use std::fmt;

/// Hydraulically smooth hull surface roughness (µm). The reference value of
/// the ITTC correlation allowance; a hull at this roughness carries no
/// roughness delta term.
pub const DEFAULT_ROUGHNESS: f64 = 150.0;

// Hull {{{1
/// Hull geometry and current operating state of one ship.
///
/// Static geometry is set once through [`HullBuilder`]; only `speed` and the
/// appendage set are mutated afterwards.
///
#[derive(Serialize, Deserialize, Builder, Clone, Debug)]
#[builder(build_fn(validate = "HullBuilder::validate"))]
pub struct Hull {
    /// Length at the waterline (m).
    pub lwl: f64,
    /// Moulded beam (m).
    pub beam: f64,
    /// Mean draft (m).
    pub mean_draft: f64,
    /// Draft at the forward perpendicular (m). Even keel when unset.
    #[builder(default)]
    #[serde(default)]
        fwd_draft: Option<f64>,
    /// Draft at the aft perpendicular (m). Even keel when unset.
    #[builder(default)]
    #[serde(default)]
        aft_draft: Option<f64>,
    /// Volumetric displacement (m³).
    pub displacement: f64,

    /// Block coefficient.
    pub cb: f64,
    /// Prismatic coefficient.
    pub cp: f64,
    /// Midship section coefficient.
    pub cm: f64,
    /// Waterplane area coefficient.
    pub cwp: f64,
    /// Longitudinal center of buoyancy, % of lwl forward of midships
    /// (negative = aft).
    #[builder(default)]
    #[serde(default)]
    pub lcb: f64,

    /// Wetted hull surface (m²). Derived by `wet_surface_method` when unset.
    #[builder(default)]
    #[serde(default)]
        wet_surface: Option<f64>,
    /// Formula used when `wet_surface` is not supplied.
    #[builder(default)]
    #[serde(default)]
    pub wet_surface_method: WetSurfaceMethod,

    /// Transverse area of the bulbous bow at the forward perpendicular (m²).
    #[builder(default)]
    #[serde(default)]
    pub bulb_area: f64,
    /// Height of the bulb section center above the keel line (m).
    #[builder(default)]
    #[serde(default)]
    pub bulb_center_height: f64,
    /// Immersed transom area at rest (m²).
    #[builder(default)]
    #[serde(default)]
    pub transom_area: f64,
    /// Transverse above-water hull and superstructure area (m²), for air
    /// resistance.
    #[builder(default)]
    #[serde(default)]
    pub above_water_area: f64,

    /// Half angle of the waterline entrance (degrees). Derived from the
    /// Holtrop regression when unset.
    #[builder(default)]
    #[serde(default)]
        half_entrance_angle: Option<f64>,

    /// Hull surface roughness (µm). Unset means the hydraulically smooth
    /// reference.
    #[builder(default)]
    #[serde(default)]
        surface_roughness: Option<f64>,

    /// Afterbody shape.
    #[builder(default)]
    #[serde(default)]
    pub stern: SternShape,
    /// Screw arrangement; selects the wake fraction and thrust deduction
    /// formula family.
    #[builder(default)]
    #[serde(default)]
    pub screws: ScrewArrangement,

    /// Appendages and their wetted areas (m²).
    #[builder(default)]
    #[serde(default)]
    pub appendages: BTreeMap<Appendage, f64>,

    /// Design propeller diameter (m), consumed by the wake fraction and
    /// thrust deduction regressions.
    #[builder(default = "0.0")]
    #[serde(default)]
    pub propeller_diameter: f64,
    /// Propeller expanded area ratio.
    #[builder(default = "0.4")]
    #[serde(default = "default_expanded_area_ratio")]
    pub expanded_area_ratio: f64,
    /// Propeller pitch to diameter ratio.
    #[builder(default = "0.8")]
    #[serde(default = "default_pitch_ratio")]
    pub pitch_ratio: f64,

    /// Design maximum speed (m/s).
    #[builder(default)]
    #[serde(default)]
    pub max_speed: f64,

    /// Current speed through the water (m/s).
    #[builder(default)]
    #[serde(default)]
        speed: f64,
}

fn default_expanded_area_ratio() -> f64 { 0.4 }
fn default_pitch_ratio() -> f64 { 0.8 }

impl HullBuilder { // {{{2
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("lwl", self.lwl),
            ("beam", self.beam),
            ("mean_draft", self.mean_draft),
            ("displacement", self.displacement),
        ] {
            match value {
                None    => return Err(format!("hull {name} is required")),
                Some(v) if v <= 0.0 =>
                    return Err(format!("hull {name} must be positive, got {v}")),
                _       => (),
            }
        }

        if self.fwd_draft.flatten().is_some_and(|t| t < 0.0)
            || self.aft_draft.flatten().is_some_and(|t| t < 0.0)
        {
            return Err("hull drafts must be non-negative".into());
        }

        // Fullness coefficients outside (0, 1) are suspicious but the
        // regressions still evaluate; only warn.
        for (name, value) in [("cb", self.cb), ("cp", self.cp),
                              ("cm", self.cm), ("cwp", self.cwp)] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    warn!("hull {name} = {v} outside (0, 1)");
                }
            }
        }

        Ok(())
    }
}

// Hull API {{{1
impl Hull {
    // Drafts {{{2
    /// Draft at the forward perpendicular; mean draft on an even keel.
    ///
    pub fn fwd_draft(&self) -> f64 {
        self.fwd_draft.unwrap_or(self.mean_draft)
    }

    /// Draft at the aft perpendicular; mean draft on an even keel.
    ///
    pub fn aft_draft(&self) -> f64 {
        self.aft_draft.unwrap_or(self.mean_draft)
    }

    // Speed {{{2
    /// Current speed through the water (m/s).
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Current speed through the water (knots).
    pub fn speed_knots(&self) -> f64 {
        units::mps_to_knots(self.speed)
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub fn set_speed_knots(&mut self, knots: f64) {
        self.speed = units::knots_to_mps(knots);
    }

    // Roughness {{{2
    /// Hull surface roughness (µm).
    ///
    pub fn surface_roughness(&self) -> f64 {
        self.surface_roughness.unwrap_or(DEFAULT_ROUGHNESS)
    }

    pub fn set_surface_roughness(&mut self, microns: f64) {
        self.surface_roughness = Some(microns);
    }

    /// True when the hull is at the hydraulically smooth reference roughness,
    /// decided once at configuration time rather than by comparing floats at
    /// evaluation time.
    ///
    pub fn is_default_roughness(&self) -> bool {
        match self.surface_roughness {
            None    => true,
            Some(r) => r == DEFAULT_ROUGHNESS,
        }
    }

    // wet_surface {{{2
    /// Wetted hull surface (m²): the supplied value, or the selected
    /// estimation formula.
    ///
    pub fn wet_surface(&self) -> Result<f64, ConfigError> {
        match self.wet_surface {
            Some(s) => Ok(s),
            None    => self.wet_surface_method.estimate(self),
        }
    }

    // run_length {{{2
    /// Length of the run (m): `L (1 - Cp + 0.06 Cp lcb / (4 Cp - 1))`.
    ///
    pub fn run_length(&self) -> f64 {
        self.lwl * (1.0 - self.cp + 0.06 * self.cp * self.lcb / (4.0 * self.cp - 1.0))
    }

    // half_entrance_angle {{{2
    /// Half angle of the waterline entrance (degrees): the supplied value, or
    /// the Holtrop regression on hull form.
    ///
    pub fn half_entrance_angle(&self) -> f64 {
        if let Some(ie) = self.half_entrance_angle { return ie; }

        let lb = self.lwl / self.beam;
        1.0 + 89.0
            * (-(lb.powf(0.80856))
                * (1.0 - self.cwp).powf(0.30484)
                * (1.0 - self.cp - 0.0225 * self.lcb).powf(0.6367)
                * (self.run_length() / self.beam).powf(0.34574)
                * (100.0 * self.displacement / self.lwl.powi(3)).powf(0.16302))
            .exp()
    }

    pub fn set_half_entrance_angle(&mut self, degrees: f64) {
        self.half_entrance_angle = Some(degrees);
    }

    // Appendages {{{2
    /// Total wetted area of all appendages (m²).
    ///
    pub fn appendage_area(&self) -> f64 {
        self.appendages.values().sum()
    }

    /// Area-weighted equivalent appendage form factor `(1 + k2)`. A hull with
    /// no appendages gets the neutral factor 1.
    ///
    pub fn appendage_form_factor(&self) -> f64 {
        let area = self.appendage_area();
        if area == 0.0 { return 1.0; } // catch divide by zero

        let weighted: f64 = self.appendages.iter()
            .map(|(kind, s)| kind.form_factor() * s)
            .sum();

        1.0 + weighted / area
    }

    pub fn set_appendage(&mut self, kind: Appendage, area: f64) {
        self.appendages.insert(kind, area);
    }

    // mass {{{2
    /// Displaced mass (kg) at the reference seawater density.
    ///
    pub fn mass(&self) -> f64 {
        self.displacement * hydro::WATER_RHO
    }

    // validity_warnings {{{2
    /// Holtrop applicability bounds. Violations annotate result confidence;
    /// they never block computation.
    ///
    pub fn validity_warnings(&self, speed: f64) -> Vec<String> {
        let mut out = Vec::new();

        let froude = hydro::froude_number(speed, self.lwl);
        if froude > 0.45 {
            out.push(format!("Froude number {froude:.3} above 0.45"));
        }
        if !(0.55..=0.85).contains(&self.cp) {
            out.push(format!("prismatic coefficient {} outside [0.55, 0.85]", self.cp));
        }
        let lb = self.lwl / self.beam;
        if !(3.9..=9.5).contains(&lb) {
            out.push(format!("length/beam ratio {lb:.2} outside [3.9, 9.5]"));
        }

        for w in &out {
            warn!("hull outside Holtrop validity range: {w}");
        }
        out
    }
}

// WetSurfaceMethod {{{1
#[derive(PartialEq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum WetSurfaceMethod {
    /// Holtrop's regression on the full coefficient set.
    #[default]
    Holtrop,
    /// Denny-Mumford estimate from length, draft and displacement.
    DennyMumford,
}

impl WetSurfaceMethod {
    fn estimate(&self, hull: &Hull) -> Result<f64, ConfigError> {
        match self {
            Self::Holtrop => {
                if hull.cb <= 0.0 {
                    return Err(ConfigError::MissingParameter("block coefficient"));
                }
                let t = hull.mean_draft;
                let b = hull.beam;
                Ok(hull.lwl * (2.0 * t + b) * hull.cm.sqrt()
                    * (0.453 + 0.4425 * hull.cb
                        - 0.2862 * hull.cm
                        - 0.003467 * b / t
                        + 0.3696 * hull.cwp)
                    + 2.38 * hull.bulb_area / hull.cb)
            }
            Self::DennyMumford => {
                if hull.mean_draft == 0.0 {
                    return Err(ConfigError::MissingParameter("mean draft"));
                }
                Ok(1.7 * hull.lwl * hull.mean_draft + hull.displacement / hull.mean_draft)
            }
        }
    }
}

// SternShape {{{1
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum SternShape {
    PramWithGondola,
    VShaped,
    #[default]
    Normal,
    UShaped,
}

impl From<&str> for SternShape {
    fn from(index: &str) -> Self {
        match index {
            "pram"   => Self::PramWithGondola,
            "v"      => Self::VShaped,
            "u"      => Self::UShaped,
            _        => Self::Normal,
        }
    }
}

impl fmt::Display for SternShape { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::PramWithGondola => "pram with gondola",
            Self::VShaped         => "V-shaped sections",
            Self::Normal          => "normal sections",
            Self::UShaped         => "U-shaped sections with Hogner stern",
        })
    }
}

impl SternShape {
    /// Holtrop's afterbody form parameter `C_stern`.
    ///
    pub fn parameter(&self) -> f64 {
        match self {
            Self::PramWithGondola => -25.0,
            Self::VShaped         => -10.0,
            Self::Normal          => 0.0,
            Self::UShaped         => 10.0,
        }
    }
}

// ScrewArrangement {{{1
#[derive(PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Debug, Default)]
pub enum ScrewArrangement {
    #[default]
    Single,
    Twin,
}

impl fmt::Display for ScrewArrangement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::Single => "single screw",
            Self::Twin   => "twin screw",
        })
    }
}

// Appendage {{{1
#[derive(PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Clone, Copy, Debug)]
pub enum Appendage {
    RudderBehindSkeg,
    RudderBehindStern,
    TwinScrewBalancedRudder,
    ShaftBrackets,
    Skeg,
    StrutBossings,
    HullBossings,
    ExposedShafts,
    StabilizerFins,
    Dome,
    BilgeKeels,
}

impl fmt::Display for Appendage { // {{{2
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Self::RudderBehindSkeg        => "rudder behind skeg",
            Self::RudderBehindStern       => "rudder behind stern",
            Self::TwinScrewBalancedRudder => "twin-screw balanced rudder",
            Self::ShaftBrackets           => "shaft brackets",
            Self::Skeg                    => "skeg",
            Self::StrutBossings           => "strut bossings",
            Self::HullBossings            => "hull bossings",
            Self::ExposedShafts           => "exposed shafts",
            Self::StabilizerFins          => "stabilizer fins",
            Self::Dome                    => "dome",
            Self::BilgeKeels              => "bilge keels",
        })
    }
}

impl Appendage { // {{{2
    /// Tabulated appendage form factor `k2` (Holtrop 1988).
    ///
    pub fn form_factor(&self) -> f64 {
        match self {
            Self::RudderBehindSkeg        => 0.5,
            Self::RudderBehindStern       => 0.4,
            Self::TwinScrewBalancedRudder => 1.8,
            Self::ShaftBrackets           => 4.0,
            Self::Skeg                    => 0.75,
            Self::StrutBossings           => 2.0,
            Self::HullBossings            => 1.0,
            Self::ExposedShafts           => 3.0,
            Self::StabilizerFins          => 1.8,
            Self::Dome                    => 1.7,
            Self::BilgeKeels              => 0.4,
        }
    }
}
