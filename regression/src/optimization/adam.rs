use super::Optimizer;

/// Adaptive-moment gradient descent.
///
/// Keeps exponential moving averages of the gradient and its square per
/// parameter, with bias correction on both. Moment buffers are sized lazily
/// on the first update so an `Adam` can be built before the model.
#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,

    t: u32,
    m: Vec<f32>,
    v: Vec<f32>,
}

impl Adam {
    /// Returns a new `Adam` with the given learning rate and the usual
    /// moment decay rates (0.9, 0.999) and epsilon (1e-7).
    pub fn new(learning_rate: f32) -> Self {
        Self {
            learning_rate,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-7,
            t: 0,
            m: Vec::new(),
            v: Vec::new(),
        }
    }
}

impl Default for Adam {
    fn default() -> Self {
        Self::new(1e-3)
    }
}

impl Optimizer for Adam {
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]) {
        if self.m.len() != params.len() {
            self.m = vec![0.0; params.len()];
            self.v = vec![0.0; params.len()];
            self.t = 0;
        }

        self.t += 1;
        let correction1 = 1.0 - self.beta1.powi(self.t as i32);
        let correction2 = 1.0 - self.beta2.powi(self.t as i32);

        for i in 0..params.len() {
            let g = grad[i];
            self.m[i] = self.beta1 * self.m[i] + (1.0 - self.beta1) * g;
            self.v[i] = self.beta2 * self.v[i] + (1.0 - self.beta2) * g * g;

            let m_hat = self.m[i] / correction1;
            let v_hat = self.v[i] / correction2;

            params[i] -= self.learning_rate * m_hat / (v_hat.sqrt() + self.epsilon);
        }
    }
}
