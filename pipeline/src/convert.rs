use rand::Rng;

use regression::{dataset::XyDataset, normalize::MinMax};

use crate::{fetch::CleanRecord, PipelineError};

/// The scaling bounds of one run, fitted over the full record set before
/// training and required afterwards to map predictions back into grid
/// units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationBounds {
    pub input: MinMax,
    pub label: MinMax,
}

/// Prepares the fetched records for training:
///
/// 1. permutes `records` uniformly at random, in place;
/// 2. takes `solar` as the input vector and `demand` as the label vector,
///    preserving the pairing;
/// 3. fits min-max bounds per vector and scales both into [0, 1].
///
/// A vector with zero variance makes the scale division by zero and the
/// resulting dataset non-finite; that is left to surface during training.
pub fn convert_records<R: Rng>(
    records: &mut [CleanRecord],
    rng: &mut R,
) -> Result<(XyDataset, NormalizationBounds), PipelineError> {
    for i in (1..records.len()).rev() {
        let j = rng.random_range(0..=i);
        records.swap(i, j);
    }

    let inputs: Vec<f32> = records.iter().map(|r| r.solar).collect();
    let labels: Vec<f32> = records.iter().map(|r| r.demand).collect();

    let input = MinMax::fit(&inputs)?;
    let label = MinMax::fit(&labels)?;

    let dataset = XyDataset::new(input.normalize_all(&inputs), label.normalize_all(&labels))?;

    Ok((dataset, NormalizationBounds { input, label }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn record(solar: f32, demand: f32) -> CleanRecord {
        CleanRecord { demand, solar }
    }

    #[test]
    fn fits_bounds_and_scales_both_vectors() {
        let mut records = vec![record(1.0, 2.0), record(3.0, 4.0), record(5.0, 6.0)];
        let mut rng = StdRng::seed_from_u64(5);

        let (dataset, bounds) = convert_records(&mut records, &mut rng).unwrap();

        assert_eq!(bounds.input.min(), 1.0);
        assert_eq!(bounds.input.max(), 5.0);
        assert_eq!(bounds.label.min(), 2.0);
        assert_eq!(bounds.label.max(), 6.0);

        let mut xs = dataset.xs().to_vec();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(xs, vec![0.0, 0.5, 1.0]);

        let mut ys = dataset.ys().to_vec();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(ys, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn shuffling_keeps_each_record_paired() {
        // demand = 2 * solar for every record, so the pairing survives any
        // permutation iff it survives this one.
        let mut records: Vec<CleanRecord> =
            (0..64).map(|i| record(i as f32, 2.0 * i as f32)).collect();
        let mut rng = StdRng::seed_from_u64(21);

        let (dataset, bounds) = convert_records(&mut records, &mut rng).unwrap();

        for (x, y) in dataset.xs().iter().zip(dataset.ys()) {
            let solar = bounds.input.denormalize(*x);
            let demand = bounds.label.denormalize(*y);
            assert!((demand - 2.0 * solar).abs() < 1e-3);
        }
    }

    #[test]
    fn empty_record_set_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = convert_records(&mut [], &mut rng).unwrap_err();
        assert!(matches!(err, PipelineError::Ml(_)));
    }

    #[test]
    fn zero_variance_solar_yields_non_finite_inputs() {
        let mut records = vec![record(4.0, 1.0), record(4.0, 2.0)];
        let mut rng = StdRng::seed_from_u64(0);

        let (dataset, _) = convert_records(&mut records, &mut rng).unwrap();

        assert!(dataset.xs().iter().all(|x| !x.is_finite()));
    }
}
