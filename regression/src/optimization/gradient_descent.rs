use super::Optimizer;

/// Plain gradient descent.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The length of the steps taken on `update_params`.
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]) {
        let lr = self.learning_rate;

        for (w, g) in params.iter_mut().zip(grad) {
            *w -= lr * g;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_against_the_gradient() {
        let mut params = [1.0, -1.0];
        let grad = [0.5, -0.5];

        GradientDescent::new(0.1).update_params(&mut params, &grad);

        assert!((params[0] - 0.95).abs() < 1e-6);
        assert!((params[1] - (-0.95)).abs() < 1e-6);
    }
}
