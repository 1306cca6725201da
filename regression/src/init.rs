use rand::Rng;
use rand_distr::StandardNormal;

use crate::arch::Sequential;

/// Draws a fresh flat parameter buffer for `model`: Glorot-normal weights,
/// zero biases.
pub fn glorot_normal<R: Rng>(model: &Sequential, rng: &mut R) -> Vec<f32> {
    let mut params = Vec::with_capacity(model.size());

    for (fan_in, fan_out) in model.layer_dims() {
        let std = (2.0 / (fan_in + fan_out) as f32).sqrt();

        for _ in 0..fan_in * fan_out {
            let z: f32 = rng.sample(StandardNormal);
            params.push(z * std);
        }

        params.resize(params.len() + fan_out, 0.0);
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::Dense;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn buffer_matches_model_size_with_zero_biases() {
        let model = Sequential::new([Dense::new((1, 1)), Dense::new((1, 1))]);
        let mut rng = StdRng::seed_from_u64(3);

        let params = glorot_normal(&model, &mut rng);

        assert_eq!(params.len(), model.size());
        // Layout per unit is [weights..., biases...]; both biases start at zero.
        assert_eq!(params[1], 0.0);
        assert_eq!(params[3], 0.0);
    }

    #[test]
    fn weights_are_not_all_equal() {
        let model = Sequential::new([Dense::new((4, 8)), Dense::new((8, 1))]);
        let mut rng = StdRng::seed_from_u64(3);

        let params = glorot_normal(&model, &mut rng);

        let first = params[0];
        assert!(params[..32].iter().any(|w| *w != first));
    }
}
