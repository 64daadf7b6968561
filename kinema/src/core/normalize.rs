//! Turns a loosely shaped problem document into a complete record.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::schema::{Measure, NormalizedParameters};

pub const DEFAULT_GRAVITY: f64 = 9.8;
pub const DEFAULT_MASS: f64 = 1.0;

/// Normalizes an extracted problem document.
///
/// Never fails: a non-object document yields the default record, and every
/// malformed field degrades to its default. Running the result back through
/// `normalize` (after serializing it) reproduces it exactly.
pub fn normalize(raw: &Value) -> NormalizedParameters {
    if !raw.is_object() {
        warn!(target: "normalize", "input is not a record; returning schema defaults");
        return finish(NormalizedParameters::default());
    }

    let params = NormalizedParameters::deserialize(raw).unwrap_or_else(|err| {
        warn!(target: "normalize", %err, "unreadable record; returning schema defaults");
        NormalizedParameters::default()
    });
    debug!(target: "normalize", topic = %params.topic, "normalized");
    finish(params)
}

/// Parses JSON text and normalizes it. Unparsable text yields the default record.
pub fn normalize_str(text: &str) -> NormalizedParameters {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => normalize(&value),
        Err(err) => {
            warn!(target: "normalize", %err, "input is not valid JSON; returning schema defaults");
            finish(NormalizedParameters::default())
        }
    }
}

fn finish(mut params: NormalizedParameters) -> NormalizedParameters {
    apply_defaults(&mut params);
    params.formulas.dedup_equations();
    params
}

fn apply_defaults(params: &mut NormalizedParameters) {
    params.gravity.fill(Some(DEFAULT_GRAVITY));
    params.mass.fill(Some(DEFAULT_MASS));
    let position = &mut params.initial_position;
    if position.is_unset() {
        position.x0 = Measure::new(0.0);
        position.y0 = Measure::new(0.0);
        position.z0 = Measure::new(0.0);
    }
}
