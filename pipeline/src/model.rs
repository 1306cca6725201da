use regression::arch::{Dense, Sequential};

/// Builds the regressor: one biased dense unit feeding one biased dense
/// unit, single scalar in and out, no activations. The topology is fixed;
/// this is not a network builder.
pub fn create_model() -> Sequential {
    Sequential::new([Dense::new((1, 1)), Dense::new((1, 1))])
}

/// One line per unit plus the parameter total, for the run log.
pub fn summarize(model: &Sequential) -> String {
    let mut lines: Vec<String> = model
        .layer_dims()
        .iter()
        .map(|(fan_in, fan_out)| {
            let params = (fan_in + 1) * fan_out;
            format!("dense {fan_in}->{fan_out} ({params} params)")
        })
        .collect();

    lines.push(format!("total {} params", model.size()));
    lines.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_has_two_units_and_four_params() {
        let model = create_model();
        assert_eq!(model.layer_dims(), vec![(1, 1), (1, 1)]);
        assert_eq!(model.size(), 4);
    }

    #[test]
    fn summary_lists_units_and_total() {
        let summary = summarize(&create_model());
        assert_eq!(
            summary,
            "dense 1->1 (2 params), dense 1->1 (2 params), total 4 params"
        );
    }
}
