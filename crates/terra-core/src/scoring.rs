//! End-of-game scoring.

use crate::resource::{Resource, ResourceHand};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Victory points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Points(pub i32);

impl Add for Points {
    type Output = Points;

    fn add(self, other: Points) -> Points {
        Points(self.0 + other.0)
    }
}

impl Sub for Points {
    type Output = Points;

    fn sub(self, other: Points) -> Points {
        Points(self.0 - other.0)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} VP", self.0)
    }
}

/// Points every unit of a resource is worth on its own
pub fn base_value(resource: Resource) -> i32 {
    match resource {
        Resource::Green | Resource::Red | Resource::Yellow => 1,
        Resource::Bulb | Resource::Gear => 5,
        Resource::Car => 6,
        Resource::Money => 0,
        Resource::Pollution => -1,
    }
}

/// A scoring card: bonus points for every complete set of `resources`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringMethod {
    resources: ResourceHand,
    points_per_combination: Points,
    calculated_total: Option<Points>,
}

impl ScoringMethod {
    pub fn new(resources: &[Resource], points_per_combination: Points) -> Self {
        Self {
            resources: ResourceHand::from_resources(resources),
            points_per_combination,
            calculated_total: None,
        }
    }

    /// How many complete combinations `totals` contains
    pub fn combinations(&self, totals: &ResourceHand) -> u32 {
        self.resources
            .iter()
            .map(|(resource, needed)| totals.get(resource) / needed)
            .min()
            .unwrap_or(0)
    }

    /// Score `totals` with this method and remember the result.
    ///
    /// `totals` holds everything on the player's grid, with pollution counted
    /// under [`Resource::Pollution`].
    pub fn select_this_method_and_calculate(&mut self, totals: &ResourceHand) -> Points {
        let base: i32 = totals
            .iter()
            .map(|(resource, count)| base_value(resource) * count as i32)
            .sum();
        let bonus = self.points_per_combination.0 * self.combinations(totals) as i32;
        let total = Points(base + bonus);
        self.calculated_total = Some(total);
        total
    }

    pub fn calculated_total(&self) -> Option<Points> {
        self.calculated_total
    }

    pub fn state(&self) -> String {
        match self.calculated_total {
            Some(points) => points.to_string(),
            None => "not scored".to_string(),
        }
    }
}
