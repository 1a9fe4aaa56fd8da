//! A single-threaded longitudinal motion simulator.
//!
//! Each tick resolves every ship's thrust against its total resistance, and
//! integrates the net force into a new speed. Ships own their resistance
//! method instances, so there is nothing shared to go stale between them.

use crate::ConfigError;
use crate::Ship;

// Stats {{{1
/// Per-ship accumulators over the simulated run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stats {
    /// Simulated time (s).
    pub elapsed: f64,
    /// Distance made good (m).
    pub distance: f64,
    /// Effective propulsion energy spent (J).
    pub energy: f64,
}

// Simulator {{{1
pub struct Simulator {
    /// Integration step (s).
    pub time_step: f64,
    ships: Vec<Ship>,
    stats: Vec<Stats>,
}

impl Simulator {
    pub fn new(time_step: f64) -> Simulator {
        Simulator {
            time_step,
            ships: Vec::new(),
            stats: Vec::new(),
        }
    }

    pub fn add_ship(&mut self, ship: Ship) {
        self.ships.push(ship);
        self.stats.push(Stats::default());
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn stats(&self) -> &[Stats] {
        &self.stats
    }

    // tick {{{2
    /// Advance every ship one time step.
    ///
    /// Net force is thrust minus total resistance; mass is the displaced
    /// water mass. Speed never integrates below zero (the chain models no
    /// astern running) and never above the hull's declared maximum.
    ///
    pub fn tick(&mut self) -> Result<(), ConfigError> {
        let dt = self.time_step;

        for (ship, stats) in self.ships.iter_mut().zip(self.stats.iter_mut()) {
            let resistance = ship.calculate_total_resistance()?;
            let thrust = ship.thrust()?;
            let power = ship.effective_power()?;

            let acceleration = (thrust - resistance) / ship.hull.mass();

            let ceiling = if ship.hull.max_speed > 0.0 {
                ship.hull.max_speed
            } else {
                f64::INFINITY
            };
            let speed = (ship.hull.speed() + acceleration * dt).clamp(0.0, ceiling);
            ship.hull.set_speed(speed);

            stats.elapsed += dt;
            stats.distance += speed * dt;
            stats.energy += power * dt;
        }

        Ok(())
    }

    // run {{{2
    /// Tick until at least `duration` seconds have been simulated.
    ///
    pub fn run(&mut self, duration: f64) -> Result<(), ConfigError> {
        let steps = (duration / self.time_step).ceil() as u64;
        for _ in 0..steps {
            self.tick()?;
        }

        Ok(())
    }
}
