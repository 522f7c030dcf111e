//! Rate and crew-role lookup seams
//!
//! The engine never owns rate data; callers hand it a consistent snapshot
//! per calculation. Lookups return an explicit [`RateResolution`] so a
//! missing code is distinguishable from a zero rate; `rate_or_zero` is the
//! compatibility shim for call sites that keep the legacy coalescing
//! behavior.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entities::crew::CrewRole;

/// Outcome of a unit-rate lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateResolution {
    /// The catalog holds a rate for the code
    Found(f64),
    /// The code is absent from the snapshot
    Missing,
}

impl RateResolution {
    /// Coalesce to zero, preserving the legacy missing-rate behavior
    pub fn or_zero(self) -> f64 {
        match self {
            RateResolution::Found(rate) => rate,
            RateResolution::Missing => 0.0,
        }
    }

    /// True when the lookup missed
    pub fn is_missing(&self) -> bool {
        matches!(self, RateResolution::Missing)
    }
}

/// Unit-rate catalog seam (materials, labor, equipment)
pub trait RateLookup {
    /// Resolve a rate code against the snapshot
    fn rate(&self, code: &str) -> RateResolution;

    /// Legacy shim: missing codes price at zero
    fn rate_or_zero(&self, code: &str) -> f64 {
        self.rate(code).or_zero()
    }
}

/// Crew-role catalog seam
pub trait CrewRateLookup {
    /// Resolve a crew role by its code
    fn role(&self, code: &str) -> Option<&CrewRole>;

    /// Daily rate for a role, zero when the role is unknown
    fn daily_rate_or_zero(&self, code: &str) -> f64 {
        self.role(code).map(|r| r.daily_rate).unwrap_or(0.0)
    }
}

/// Map-backed rate snapshot
///
/// One consistent snapshot must be supplied across all lines of a single
/// estimate to avoid mixed-rate-epoch results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateSnapshot {
    rates: HashMap<String, f64>,
}

impl RateSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a rate
    pub fn insert(&mut self, code: impl Into<String>, rate: f64) {
        self.rates.insert(code.into(), rate);
    }

    /// Number of rates in the snapshot
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for RateSnapshot {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().map(|(c, r)| (c.into(), r)).collect(),
        }
    }
}

impl RateLookup for RateSnapshot {
    fn rate(&self, code: &str) -> RateResolution {
        match self.rates.get(code) {
            Some(rate) => RateResolution::Found(*rate),
            None => RateResolution::Missing,
        }
    }
}

/// Map-backed crew-role snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrewSnapshot {
    roles: HashMap<String, CrewRole>,
}

impl CrewSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from catalog roles, keyed by role code
    pub fn from_roles(roles: impl IntoIterator<Item = CrewRole>) -> Self {
        Self {
            roles: roles
                .into_iter()
                .map(|role| (role.code.clone(), role))
                .collect(),
        }
    }

    /// Add or replace a role
    pub fn insert(&mut self, role: CrewRole) {
        self.roles.insert(role.code.clone(), role);
    }

    /// Derive a unit-rate snapshot keyed by role code from the daily rates
    pub fn to_rate_snapshot(&self) -> RateSnapshot {
        self.roles
            .values()
            .map(|role| (role.code.clone(), role.daily_rate))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl CrewRateLookup for CrewSnapshot {
    fn role(&self, code: &str) -> Option<&CrewRole> {
        self.roles.get(code)
    }
}
