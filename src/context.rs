//! The solve context (§9's "model global state as an explicit value").
//!
//! `last_sigma` and the cluster registry are process-wide for the duration
//! of one solve (§3). Rather than hidden globals, they are fields here,
//! threaded through every engine call by the caller.

use crate::cluster_registry::ClusterRegistry;
use crate::collab::NewtonStep;
use crate::config::EngineConfig;
use crate::number::{Scalar, Tier};
use crate::placer::place_cluster;
use crate::polynomial::Polynomial;
use crate::restart::{restart_pass, ClusterOutcome};
use crate::root::RootVector;
use crate::scheduler::Scheduler;

/// Owns the root vector, cluster registry and scheduler state for one
/// solve at one arithmetic tier. The polynomial and configuration are
/// supplied by the caller at construction and considered immutable for
/// the context's lifetime (tier promotion builds a fresh context around
/// a re-tiered polynomial, §9).
pub struct SolveContext<S: Scalar> {
    poly: Polynomial<S>,
    config: EngineConfig,
    tier: Tier,
    registry: ClusterRegistry,
    roots: RootVector<S>,
    scheduler: Scheduler,
    /// Running peak multiprecision working precision reached by any Shift
    /// call so far this solve (§4.6's `wp_max_so_far` cap). A no-op at the
    /// double/DPE tiers.
    wp_max_so_far: usize,
}

impl<S: Scalar> SolveContext<S> {
    /// A fresh context ready for the first Placer call: one cluster
    /// covering every root, no cluster analysis having run yet.
    pub fn new(poly: Polynomial<S>, config: EngineConfig, tier: Tier) -> Self {
        let n = poly.degree();
        let wp_max_so_far = config.mpwp();
        SolveContext {
            registry: ClusterRegistry::whole(n),
            roots: RootVector::new(n),
            scheduler: Scheduler::new(),
            poly,
            config,
            tier,
            wp_max_so_far,
        }
    }

    pub fn poly(&self) -> &Polynomial<S> {
        &self.poly
    }

    pub fn roots(&self) -> &RootVector<S> {
        &self.roots
    }

    pub fn roots_mut(&mut self) -> &mut RootVector<S> {
        &mut self.roots
    }

    pub fn registry(&self) -> &ClusterRegistry {
        &self.registry
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Installs a new cluster partition, as produced by the outer
    /// cluster-analysis collaborator ahead of a Restart pass (§6).
    pub fn set_registry(&mut self, registry: ClusterRegistry) {
        self.registry = registry;
    }

    /// The initial global placement: every index placed exactly once
    /// (§8 invariant 1), with `last_sigma` reset first (§3: "reset to 0
    /// when the first cluster of a phase is placed").
    pub fn place_all(&mut self) {
        self.scheduler.reset();
        let zero = S::zero();
        place_cluster(
            &self.poly,
            &self.registry,
            0,
            &zero,
            &zero,
            &mut self.roots,
            &mut self.scheduler,
            &self.config,
            self.tier,
            false,
        );
    }

    /// One full Restart pass over the currently installed registry.
    pub fn restart<N: NewtonStep<S>>(&mut self, newton: &N) -> Vec<(usize, ClusterOutcome)> {
        restart_pass(
            &self.poly,
            &self.registry,
            &mut self.roots,
            &mut self.scheduler,
            &self.config,
            self.tier,
            newton,
            &mut self.wp_max_so_far,
        )
    }

    pub fn last_sigma(&self) -> f64 {
        self.scheduler.last_sigma()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::ReferenceNewton;
    use crate::config::DataType;
    use float_cmp::approx_eq;
    use num_complex::Complex64;

    fn monomial_minus_one(degree: usize) -> Polynomial<f64> {
        let mut c = vec![Complex64::new(0.0, 0.0); degree + 1];
        c[0] = Complex64::new(-1.0, 0.0);
        c[degree] = Complex64::new(1.0, 0.0);
        Polynomial::new(degree, c, DataType::Known).unwrap()
    }

    #[test]
    fn test_place_all_assigns_every_root() {
        let poly = monomial_minus_one(5);
        let mut ctx = SolveContext::new(poly, EngineConfig::new(), Tier::Double);
        ctx.place_all();
        for i in 0..5 {
            assert!(approx_eq!(f64, ctx.roots().get(i).approx.modulus(), 1.0, epsilon = 1e-12));
        }
    }

    #[test]
    fn test_restart_with_trivial_registry_does_nothing() {
        let poly = monomial_minus_one(5);
        let mut ctx = SolveContext::new(poly, EngineConfig::new(), Tier::Double);
        ctx.place_all();
        ctx.set_registry(ClusterRegistry::singletons(5));
        let newton = ReferenceNewton;
        let outcomes = ctx.restart(&newton);
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_single_root_boundary() {
        // x - 7 = 0.
        let c = vec![Complex64::new(-7.0, 0.0), Complex64::new(1.0, 0.0)];
        let poly = Polynomial::<f64>::new(1, c, DataType::Known).unwrap();
        let mut ctx = SolveContext::new(poly, EngineConfig::new(), Tier::Double);
        ctx.place_all();
        assert!(approx_eq!(f64, ctx.roots().get(0).approx.re, 7.0, epsilon = 1e-9));

        let newton = ReferenceNewton;
        let outcomes = ctx.restart(&newton);
        assert!(outcomes.is_empty());
    }
}
