use ndarray::{Array2, ArrayView2};

/// A differentiable loss between a batch of predictions and its labels.
pub trait LossFn {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32;

    /// The derivative of the loss with respect to each prediction.
    fn loss_prime(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> Array2<f32>;
}

/// Mean squared error.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mse;

impl LossFn for Mse {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32 {
        (&y_pred - &y)
            .mapv(|e| e * e)
            .mean()
            .unwrap_or_default()
    }

    fn loss_prime(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> Array2<f32> {
        (&y_pred - &y) * (2.0 / y_pred.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn mse_of_exact_predictions_is_zero() {
        let y = array![[1.0], [2.0]];
        assert_eq!(Mse.loss(y.view(), y.view()), 0.0);
    }

    #[test]
    fn mse_averages_squared_errors() {
        let y_pred = array![[1.0], [3.0]];
        let y = array![[0.0], [1.0]];
        // (1 + 4) / 2
        assert!((Mse.loss(y_pred.view(), y.view()) - 2.5).abs() < 1e-6);
    }

    #[test]
    fn loss_prime_points_from_label_to_prediction() {
        let y_pred = array![[2.0], [0.0]];
        let y = array![[1.0], [1.0]];
        let d = Mse.loss_prime(y_pred.view(), y.view());
        assert_eq!(d, array![[1.0], [-1.0]]);
    }
}
