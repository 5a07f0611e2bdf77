//! Shared domain types.
//!
//! This module defines:
//!
//! - the independent variables of one collision (`ImpactScenario`)
//! - the derived quantities of the forward model (`Outcome`)
//! - grid bookkeeping for the reachable-region scan (`Edge`, `EdgeSet`, `GridSample`)
//! - the emitted boundary curves (`EnvelopePoint`, `EnvelopeCurve`)
//! - run configuration (`RegionConfig`, `SweepConfig`)

use std::path::PathBuf;

use crate::error::{ScalingError, ScalingResult, require_positive};

/// One collision: target mass [M_E], impactor/target mass ratio, impact velocity [km/s].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactScenario {
    target_mass: f64,
    mass_ratio: f64,
    impact_velocity: f64,
}

impl ImpactScenario {
    pub fn new(target_mass: f64, mass_ratio: f64, impact_velocity: f64) -> ScalingResult<Self> {
        Ok(Self {
            target_mass: require_positive("target_mass", target_mass)?,
            mass_ratio: require_positive("mass_ratio", mass_ratio)?,
            impact_velocity: require_positive("impact_velocity", impact_velocity)?,
        })
    }

    pub fn target_mass(&self) -> f64 {
        self.target_mass
    }

    pub fn mass_ratio(&self) -> f64 {
        self.mass_ratio
    }

    pub fn impact_velocity(&self) -> f64 {
        self.impact_velocity
    }

    /// Combined mass of target and impactor.
    pub fn total_mass(&self) -> f64 {
        (1.0 + self.mass_ratio) * self.target_mass
    }
}

/// Forward-model quantities for one scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Catastrophic disruption energy `Q_RD*`.
    pub disruption_energy: f64,
    /// Specific impact energy `Q_R`.
    pub impact_energy: f64,
    /// `Q_R / Q_RD*`.
    pub energy_ratio: f64,
    /// Fraction of the combined mass retained in the largest remnant.
    pub retention: f64,
    /// Iron mass fraction of the largest remnant.
    pub iron_fraction: f64,
    /// Mass of the largest remnant [M_E].
    pub fragment_mass: f64,
}

/// One edge of the (target mass × velocity) grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    MinTarget,
    MinVelocity,
    MaxTarget,
    MaxVelocity,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::MinTarget, Edge::MinVelocity, Edge::MaxTarget, Edge::MaxVelocity];

    fn bit(self) -> u8 {
        match self {
            Edge::MinTarget => 0b0001,
            Edge::MinVelocity => 0b0010,
            Edge::MaxTarget => 0b0100,
            Edge::MaxVelocity => 0b1000,
        }
    }

    /// Edges that trace the upper (iron-rich) boundary of the region.
    pub fn is_upper(self) -> bool {
        matches!(self, Edge::MinTarget | Edge::MinVelocity)
    }
}

/// Position class of a grid point: empty for interior points, up to two edges at corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeSet(u8);

impl EdgeSet {
    pub const INTERIOR: EdgeSet = EdgeSet(0);

    /// Classify grid point `(i, j)` of an `n_target × n_velocity` grid.
    pub fn classify(i: usize, j: usize, n_target: usize, n_velocity: usize) -> Self {
        let mut set = EdgeSet::INTERIOR;
        if i == 0 {
            set = set.with(Edge::MinTarget);
        }
        if j == 0 {
            set = set.with(Edge::MinVelocity);
        }
        if i + 1 == n_target {
            set = set.with(Edge::MaxTarget);
        }
        if j + 1 == n_velocity {
            set = set.with(Edge::MaxVelocity);
        }
        set
    }

    pub fn with(self, edge: Edge) -> Self {
        EdgeSet(self.0 | edge.bit())
    }

    pub fn contains(self, edge: Edge) -> bool {
        self.0 & edge.bit() != 0
    }

    pub fn is_interior(self) -> bool {
        self.0 == 0
    }

    pub fn is_upper(self) -> bool {
        Edge::ALL.iter().any(|&e| e.is_upper() && self.contains(e))
    }

    pub fn is_lower(self) -> bool {
        Edge::ALL.iter().any(|&e| !e.is_upper() && self.contains(e))
    }

    pub fn edges(self) -> impl Iterator<Item = Edge> {
        Edge::ALL.into_iter().filter(move |&e| self.contains(e))
    }
}

/// An evaluated grid point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSample {
    /// Row index (target-mass axis).
    pub i: usize,
    /// Column index (velocity axis).
    pub j: usize,
    pub scenario: ImpactScenario,
    pub edges: EdgeSet,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopePoint {
    pub fragment_mass: f64,
    pub iron_fraction: f64,
}

/// Boundary of the reachable (fragment mass, iron fraction) region, ascending in fragment mass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvelopeCurve {
    points: Vec<EnvelopePoint>,
}

impl EnvelopeCurve {
    /// Build a curve from unordered points.
    ///
    /// The sort is stable, so points with equal fragment mass keep their input order.
    pub fn from_unsorted(mut points: Vec<EnvelopePoint>) -> Self {
        points.sort_by(|a, b| a.fragment_mass.total_cmp(&b.fragment_mass));
        Self { points }
    }

    pub fn points(&self) -> &[EnvelopePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_fragment_mass(&self) -> Option<f64> {
        self.points.last().map(|p| p.fragment_mass)
    }
}

/// A region scan as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RegionConfig {
    pub mass_ratio: f64,
    pub velocity_min: f64,
    pub velocity_max: f64,
    pub velocity_steps: usize,
    pub target_mass_min: f64,
    pub target_mass_max: f64,
    pub target_mass_steps: usize,
    /// Evaluate interior grid points too (needed only for a full scatter cloud).
    pub full_grid: bool,
    pub out_dir: PathBuf,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            mass_ratio: 1.0,
            velocity_min: 20.0,
            velocity_max: 100.0,
            velocity_steps: 201,
            target_mass_min: 0.1,
            target_mass_max: 10.0,
            target_mass_steps: 201,
            full_grid: false,
            out_dir: PathBuf::from("."),
        }
    }
}

impl RegionConfig {
    pub fn validate(&self) -> ScalingResult<()> {
        require_positive("gamma", self.mass_ratio)?;
        validate_range("Vimin", self.velocity_min, "Vimax", self.velocity_max)?;
        validate_range("Mtargmin", self.target_mass_min, "Mtargmax", self.target_mass_max)?;
        validate_steps("NVi", self.velocity_steps)?;
        validate_steps("NMtarg", self.target_mass_steps)?;
        Ok(())
    }
}

/// Fragment-mass axis shared by the inverse sweeps.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub fragment_mass_min: f64,
    pub fragment_mass_max: f64,
    pub fragment_mass_steps: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            fragment_mass_min: 1e-4,
            fragment_mass_max: 3e2,
            fragment_mass_steps: 101,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> ScalingResult<()> {
        validate_range("Mlrgmin", self.fragment_mass_min, "Mlrgmax", self.fragment_mass_max)?;
        validate_steps("NMlrg", self.fragment_mass_steps)
    }
}

fn validate_range(min_name: &'static str, min: f64, max_name: &'static str, max: f64) -> ScalingResult<()> {
    require_positive(min_name, min)?;
    require_positive(max_name, max)?;
    if max < min {
        return Err(ScalingError::invalid(max_name, max, "range is inverted (max < min)"));
    }
    Ok(())
}

pub(crate) fn validate_steps(name: &'static str, steps: usize) -> ScalingResult<()> {
    if steps < 2 {
        return Err(ScalingError::invalid(name, steps as f64, "need at least 2 samples"));
    }
    Ok(())
}
