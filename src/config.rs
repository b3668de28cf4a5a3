//! The configuration surface (§6 of the specification).
//!
//! Mirrors the chained `with_*` builder style the reference workspace uses
//! for its own partitioning configuration (`PartitionCriteria::new(..).
//! with_max_depth(..).with_min_cardinality(..)`).

use serde::{Deserialize, Serialize};

/// Whether Restart is allowed to touch a cluster whose isolation status is
/// only `'u'` (count) or also `'i'` (isolate/approximate). See §4.5 step 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Goal {
    /// Only count the roots; isolation status `'i'` does not yet qualify a
    /// cluster for restart.
    Count,
    /// Isolate or approximate the roots; status `'u'` or `'i'` qualify.
    IsolateOrApproximate,
}

impl Goal {
    /// Parses the first-character convention described in §6.
    pub fn from_tag(tag: char) -> Result<Self, crate::error::CoreError> {
        match tag {
            'c' => Ok(Self::Count),
            _ if tag.is_ascii_alphabetic() => Ok(Self::IsolateOrApproximate),
            other => Err(crate::error::CoreError::UnknownGoal(other)),
        }
    }
}

/// Whether the polynomial's coefficients are available as moduli at all, or
/// whether the caller only knows it is "user-defined" (evaluable but not
/// introspectable), triggering the unit-circle placement bypass (§4.4 step 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    /// Coefficients are available as moduli at every tier.
    Known,
    /// Only a black-box evaluator is available.
    UserDefined,
}

impl DataType {
    pub fn from_tag(tag: char) -> Result<Self, crate::error::CoreError> {
        match tag {
            'u' => Ok(Self::UserDefined),
            _ if tag.is_ascii_alphabetic() => Ok(Self::Known),
            other => Err(crate::error::CoreError::UnknownDataType(other)),
        }
    }
}

/// Tunable inputs to the engine. Construct with [`EngineConfig::new`] and
/// chain `with_*` calls to override defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    random_seed: bool,
    circle_relative_distance: f64,
    max_newt_it: usize,
    eps_out: f64,
    eps: f64,
    mp_epsilon: f64,
    goal: Goal,
    data_type: DataType,
    mpwp: usize,
    prec_out: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            random_seed: false,
            circle_relative_distance: 1e-2,
            max_newt_it: 20,
            eps_out: 1e-10,
            eps: 1e-14,
            mp_epsilon: 1e-16,
            goal: Goal::IsolateOrApproximate,
            data_type: DataType::Known,
            mpwp: 128,
            prec_out: 53,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_random_seed(mut self, on: bool) -> Self {
        self.random_seed = on;
        self
    }

    pub fn with_circle_relative_distance(mut self, delta: f64) -> Self {
        self.circle_relative_distance = delta;
        self
    }

    pub fn with_max_newt_it(mut self, max_newt_it: usize) -> Self {
        self.max_newt_it = max_newt_it;
        self
    }

    pub fn with_eps_out(mut self, eps_out: f64) -> Self {
        self.eps_out = eps_out;
        self
    }

    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    pub fn with_mp_epsilon(mut self, mp_epsilon: f64) -> Self {
        self.mp_epsilon = mp_epsilon;
        self
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn with_mpwp(mut self, mpwp: usize) -> Self {
        self.mpwp = mpwp;
        self
    }

    pub fn with_prec_out(mut self, prec_out: usize) -> Self {
        self.prec_out = prec_out;
        self
    }

    pub fn random_seed(&self) -> bool {
        self.random_seed
    }

    pub fn circle_relative_distance(&self) -> f64 {
        self.circle_relative_distance
    }

    pub fn max_newt_it(&self) -> usize {
        self.max_newt_it
    }

    pub fn eps_out(&self) -> f64 {
        self.eps_out
    }

    pub fn eps(&self) -> f64 {
        self.eps
    }

    pub fn mp_epsilon(&self) -> f64 {
        self.mp_epsilon
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn mpwp(&self) -> usize {
        self.mpwp
    }

    pub fn prec_out(&self) -> usize {
        self.prec_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EngineConfig::new();
        assert!(!cfg.random_seed());
        assert_eq!(cfg.goal(), Goal::IsolateOrApproximate);
        assert_eq!(cfg.data_type(), DataType::Known);
    }

    #[test]
    fn test_builder_chain() {
        let cfg = EngineConfig::new()
            .with_random_seed(true)
            .with_max_newt_it(5)
            .with_goal(Goal::Count);
        assert!(cfg.random_seed());
        assert_eq!(cfg.max_newt_it(), 5);
        assert_eq!(cfg.goal(), Goal::Count);
    }

    #[test]
    fn test_goal_tag() {
        assert_eq!(Goal::from_tag('c').unwrap(), Goal::Count);
        assert_eq!(Goal::from_tag('i').unwrap(), Goal::IsolateOrApproximate);
        assert!(Goal::from_tag('3').is_err());
    }

    #[test]
    fn test_data_type_tag() {
        assert_eq!(DataType::from_tag('u').unwrap(), DataType::UserDefined);
        assert_eq!(DataType::from_tag('s').unwrap(), DataType::Known);
    }
}
