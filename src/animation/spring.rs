use crate::foundation::{
    core::clamp_unit,
    error::{ZenithError, ZenithResult},
};

/// Integration step upper bound, in seconds.
const MAX_SUBSTEP_SECS: f64 = 0.001;
/// Longer ticks (tab switches, debugger pauses) are truncated to this.
const MAX_TICK_SECS: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringParams {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
    /// Displacement below which the spring may settle.
    pub rest_delta: f64,
    /// Speed below which the spring may settle.
    pub rest_speed: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 30.0,
            mass: 1.0,
            rest_delta: 0.001,
            rest_speed: 0.01,
        }
    }
}

impl SpringParams {
    pub fn validate(&self) -> ZenithResult<()> {
        let positive = [
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("mass", self.mass),
            ("rest_delta", self.rest_delta),
            ("rest_speed", self.rest_speed),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(ZenithError::validation(format!(
                    "spring {name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// `damping / (2 * sqrt(stiffness * mass))`; `>= 1` never overshoots a fixed target.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

#[derive(Clone, Debug)]
/// Damped spring chasing a target in `[0, 1]`.
pub struct Spring {
    params: SpringParams,
    value: f64,
    velocity: f64,
    target: f64,
    settled: bool,
}

impl Spring {
    pub fn new(params: SpringParams, initial: f64) -> ZenithResult<Self> {
        params.validate()?;
        let initial = clamp_unit(initial);
        Ok(Self {
            params,
            value: initial,
            velocity: 0.0,
            target: initial,
            settled: true,
        })
    }

    pub fn params(&self) -> &SpringParams {
        &self.params
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn set_target(&mut self, target: f64) {
        let target = clamp_unit(target);
        if target != self.target {
            self.target = target;
            self.settled = false;
        }
    }

    /// Place the spring at `value` at rest, bypassing smoothing.
    pub fn jump_to(&mut self, value: f64) {
        let value = clamp_unit(value);
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.settled = true;
    }

    /// Advance by `dt_secs` and return the new value.
    pub fn step(&mut self, dt_secs: f64) -> f64 {
        if self.settled || !dt_secs.is_finite() || dt_secs <= 0.0 {
            return self.value;
        }

        let dt = dt_secs.min(MAX_TICK_SECS);
        let steps = (dt / MAX_SUBSTEP_SECS).ceil().max(1.0) as u32;
        let h = dt / f64::from(steps);
        let SpringParams {
            stiffness,
            damping,
            mass,
            ..
        } = self.params;

        for _ in 0..steps {
            let displacement = self.value - self.target;
            let accel = (-stiffness * displacement - damping * self.velocity) / mass;
            self.velocity += accel * h;
            let next = self.value + self.velocity * h;
            self.value = clamp_unit(next);
            if self.value != next {
                // Pinned at a bound.
                self.velocity = 0.0;
            }

            if self.at_rest() {
                self.jump_to(self.target);
                break;
            }
        }
        self.value
    }

    fn at_rest(&self) -> bool {
        (self.value - self.target).abs() < self.params.rest_delta
            && self.velocity.abs() < self.params.rest_speed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
