//! Resource types and counted resource collections.
//!
//! This module contains:
//! - The closed set of resource kinds a card can hold
//! - `ResourceHand`, a multiset of resources used for card holdings,
//!   effect recipes and per-position groupings during action resolution

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Resource kinds tracked on cards.
///
/// Raw materials are produced by most cards, products are manufactured from
/// them, and `Money` is the universal currency. `Pollution` is kept in the
/// enumeration so that scoring and effect recipes can name it, but pollution
/// placed on a card is tracked by the card's pollution counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Resource {
    /// Raw material - plants and forests
    Green,
    /// Raw material - minerals
    Red,
    /// Raw material - animals and crops
    Yellow,
    /// Product - energy
    Bulb,
    /// Product - machinery
    Gear,
    /// Product - vehicles
    Car,
    /// Currency
    Money,
    /// Pollution marker
    Pollution,
}

impl Resource {
    /// All resource kinds, in canonical order
    pub const ALL: [Resource; 8] = [
        Resource::Green,
        Resource::Red,
        Resource::Yellow,
        Resource::Bulb,
        Resource::Gear,
        Resource::Car,
        Resource::Money,
        Resource::Pollution,
    ];

    /// Position of this kind in [`Resource::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Resource::Green => 0,
            Resource::Red => 1,
            Resource::Yellow => 2,
            Resource::Bulb => 3,
            Resource::Gear => 4,
            Resource::Car => 5,
            Resource::Money => 6,
            Resource::Pollution => 7,
        }
    }

    /// Whether this is a raw material
    pub fn is_raw(&self) -> bool {
        matches!(self, Resource::Green | Resource::Red | Resource::Yellow)
    }

    /// Whether this is a manufactured product
    pub fn is_product(&self) -> bool {
        matches!(self, Resource::Bulb | Resource::Gear | Resource::Car)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Green => "Green",
            Resource::Red => "Red",
            Resource::Yellow => "Yellow",
            Resource::Bulb => "Bulb",
            Resource::Gear => "Gear",
            Resource::Car => "Car",
            Resource::Money => "Money",
            Resource::Pollution => "Pollution",
        };
        f.write_str(name)
    }
}

/// Returned when removing resources that are not all present
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing {missing} x {resource}")]
pub struct InsufficientResources {
    pub resource: Resource,
    pub missing: u32,
}

/// A multiset of resources.
///
/// Order is irrelevant and duplicates are significant, so two hands compare
/// equal exactly when they hold the same count of every kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceHand {
    counts: [u32; 8],
}

impl ResourceHand {
    /// Create an empty hand
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hand from a list of resources, counting duplicates
    pub fn from_resources(resources: &[Resource]) -> Self {
        let mut hand = Self::new();
        for &resource in resources {
            hand.add(resource, 1);
        }
        hand
    }

    /// Create a hand with a single resource kind
    pub fn single(resource: Resource, amount: u32) -> Self {
        let mut hand = Self::new();
        hand.add(resource, amount);
        hand
    }

    /// Total number of resource units
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Check if hand is empty
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Get count of a specific resource
    pub fn get(&self, resource: Resource) -> u32 {
        self.counts[resource.index()]
    }

    /// Add resources to hand
    pub fn add(&mut self, resource: Resource, amount: u32) {
        self.counts[resource.index()] += amount;
    }

    /// Add another hand to this one
    pub fn add_hand(&mut self, other: &ResourceHand) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
    }

    /// Sub-multiset test: every unit of `other` is present here
    pub fn contains(&self, other: &ResourceHand) -> bool {
        self.counts
            .iter()
            .zip(other.counts.iter())
            .all(|(mine, theirs)| mine >= theirs)
    }

    /// Remove `other` exactly. Nothing is removed unless all of it is present.
    pub fn subtract(&mut self, other: &ResourceHand) -> Result<(), InsufficientResources> {
        for resource in Resource::ALL {
            let have = self.get(resource);
            let need = other.get(resource);
            if need > have {
                return Err(InsufficientResources {
                    resource,
                    missing: need - have,
                });
            }
        }
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine -= theirs;
        }
        Ok(())
    }

    /// Iterate over `(resource, count)` pairs with a non-zero count
    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        Resource::ALL
            .into_iter()
            .map(move |r| (r, self.get(r)))
            .filter(|&(_, count)| count > 0)
    }

    /// Expand into a flat list in canonical order
    pub fn to_vec(&self) -> Vec<Resource> {
        self.iter()
            .flat_map(|(r, count)| std::iter::repeat(r).take(count as usize))
            .collect()
    }
}

impl FromIterator<Resource> for ResourceHand {
    fn from_iter<I: IntoIterator<Item = Resource>>(iter: I) -> Self {
        let mut hand = Self::new();
        for resource in iter {
            hand.add(resource, 1);
        }
        hand
    }
}

impl fmt::Display for ResourceHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.to_vec().iter().map(ToString::to_string).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
