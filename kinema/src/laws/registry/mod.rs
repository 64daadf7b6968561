use std::collections::HashMap;

use tracing::{debug, warn};

use crate::core::schema::{NormalizedParameters, Topic};
use crate::laws::{classical, continuum, fields};

/// A derivation routine for a single topic.
///
/// Rules append symbolic equations, record numeric results and backfill
/// structured fields that are still absent. Running a rule twice must leave
/// the record unchanged.
pub type Rule = fn(&mut NormalizedParameters);

/// The topic -> rule table behind [`attach_computed`].
pub struct FormulaEngine {
    rules: HashMap<Topic, Rule>,
}

impl Default for FormulaEngine {
    fn default() -> Self {
        let mut engine = Self::empty();
        engine.register(Topic::Projectile, classical::kinematics::projectile);
        engine.register(Topic::LinearMotion, classical::kinematics::linear_motion);
        engine.register(Topic::CircularMotion, classical::kinematics::circular_motion);
        engine.register(Topic::ProjectileIncline, classical::kinematics::projectile_incline);
        engine.register(Topic::Forces, classical::dynamics::forces);
        engine.register(Topic::Friction, classical::dynamics::friction);
        engine.register(Topic::InclinedPlane, classical::dynamics::inclined_plane);
        engine.register(Topic::Pulley, classical::dynamics::pulley);
        engine.register(Topic::MultiPulley, classical::dynamics::multi_pulley);
        engine.register(Topic::Elasticity, classical::dynamics::elasticity);
        engine.register(Topic::Spring, classical::oscillation::spring);
        engine.register(Topic::SpringFriction, classical::oscillation::spring_friction);
        engine.register(Topic::PulleySpring, classical::oscillation::pulley_spring);
        engine.register(Topic::Energy, classical::momentum::energy);
        engine.register(Topic::Collision, classical::momentum::collision);
        engine.register(Topic::Gravitation, classical::gravitation::gravitation);
        engine.register(Topic::FluidDynamics, continuum::fluid::fluid_dynamics);
        engine.register(Topic::Lift, continuum::fluid::lift);
        engine.register(Topic::Thermodynamics, continuum::thermal::thermodynamics);
        engine.register(Topic::Electricity, fields::electromagnetism::electricity);
        engine.register(Topic::Magnetism, fields::electromagnetism::magnetism);
        engine.register(Topic::MagnetismAdvanced, fields::electromagnetism::magnetism_advanced);
        engine.register(Topic::Optics, fields::optics::optics);
        engine.register(Topic::Waves, fields::waves::waves);
        engine
    }
}

impl FormulaEngine {
    /// An engine with no rules.
    pub fn empty() -> Self {
        Self { rules: HashMap::new() }
    }

    /// Binds `rule` to `topic`, replacing any previous rule.
    pub fn register(&mut self, topic: Topic, rule: Rule) -> &mut Self {
        self.rules.insert(topic, rule);
        self
    }

    pub fn rule(&self, topic: Topic) -> Option<Rule> {
        self.rules.get(&topic).copied()
    }

    pub fn covers(&self, topic: Topic) -> bool {
        self.rules.contains_key(&topic)
    }

    /// Runs the rule for `params.topic`. Topics without a rule are left untouched.
    pub fn attach<'p>(&self, params: &'p mut NormalizedParameters) -> &'p mut NormalizedParameters {
        match self.rule(params.topic) {
            Some(rule) => {
                rule(params);
                debug!(
                    target: "formula",
                    topic = %params.topic,
                    equations = params.formulas.equations.len(),
                    calculations = params.formulas.calculations.len(),
                    "computed values attached"
                );
            }
            None => warn!(target: "formula", topic = %params.topic, "no rules for topic"),
        }
        params
    }
}

/// Attaches computed values with the built-in rule table.
pub fn attach_computed(params: &mut NormalizedParameters) -> &mut NormalizedParameters {
    FormulaEngine::default().attach(params)
}
