use ndarray::ArrayView2;

use regression::arch::Sequential;

use crate::{convert::NormalizationBounds, fetch::CleanRecord, PipelineError};

/// A point on the rendered scatter plots, in grid units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Probes generated per run.
pub const PROBE_POINTS: usize = 100;

/// Runs inference over [`PROBE_POINTS`] evenly spaced inputs spanning
/// [0, 1], then inverts the run's normalization on both the probes and the
/// predictions so the points land in grid units.
pub fn probe_model(
    model: &mut Sequential,
    params: &[f32],
    bounds: &NormalizationBounds,
) -> Result<Vec<Point>, PipelineError> {
    let step = 1.0 / (PROBE_POINTS - 1) as f32;
    let xs: Vec<f32> = (0..PROBE_POINTS).map(|i| i as f32 * step).collect();

    let x = ArrayView2::from_shape((PROBE_POINTS, 1), &xs).unwrap();
    let preds = model.forward(params, x)?;

    Ok(xs
        .iter()
        .zip(preds.column(0))
        .map(|(x, y)| Point {
            x: bounds.input.denormalize(*x),
            y: bounds.label.denormalize(*y),
        })
        .collect())
}

/// The fetched records as (solar, demand) points.
pub fn observed_points(records: &[CleanRecord]) -> Vec<Point> {
    records
        .iter()
        .map(|r| Point {
            x: r.solar,
            y: r.demand,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::create_model;
    use regression::normalize::MinMax;

    fn bounds(input: (f32, f32), label: (f32, f32)) -> NormalizationBounds {
        NormalizationBounds {
            input: MinMax::fit(&[input.0, input.1]).unwrap(),
            label: MinMax::fit(&[label.0, label.1]).unwrap(),
        }
    }

    #[test]
    fn probes_span_the_denormalized_input_range() {
        let mut model = create_model();
        // Identity through both units: y = x.
        let params = [1.0, 0.0, 1.0, 0.0];
        let b = bounds((5.0, 9.0), (10.0, 30.0));

        let points = probe_model(&mut model, &params, &b).unwrap();

        assert_eq!(points.len(), PROBE_POINTS);
        assert!((points[0].x - 5.0).abs() < 1e-5);
        assert!((points[99].x - 9.0).abs() < 1e-4);

        // The normalized prediction equals the normalized input, so the
        // first and last probes map to the label bounds.
        assert!((points[0].y - 10.0).abs() < 1e-4);
        assert!((points[99].y - 30.0).abs() < 1e-3);
    }

    #[test]
    fn probes_are_evenly_spaced() {
        let mut model = create_model();
        let params = [1.0, 0.0, 1.0, 0.0];
        let b = bounds((0.0, 99.0), (0.0, 1.0));

        let points = probe_model(&mut model, &params, &b).unwrap();

        for pair in points.windows(2) {
            assert!(((pair[1].x - pair[0].x) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn observed_points_map_solar_to_x_and_demand_to_y() {
        let records = [CleanRecord { demand: 2.0, solar: 1.0 }];
        assert_eq!(observed_points(&records), vec![Point { x: 1.0, y: 2.0 }]);
    }
}
