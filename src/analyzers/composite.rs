use crate::field::Field;

/// Combines one age group's six field averages into its overall score.
///
/// `averages` must be in [`Field::ALL`] order:
///
/// ```text
/// composite = Σ (average_i / range_i) * weight_i
/// ```
///
/// Ranges and weights come from [`Field::normalization`] and [`Field::weight`].
pub fn composite_score(averages: &[f64; 6]) -> f64 {
    Field::ALL
        .iter()
        .map(|f| weighted_term(*f, averages[f.index()]))
        .sum()
}

/// Contribution of a single field to the composite score.
pub fn weighted_term(field: Field, average: f64) -> f64 {
    (average / field.normalization()) * field.weight()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_field_isolates_its_weight() {
        for field in Field::ALL {
            let mut averages = [0.0; 6];
            averages[field.index()] = field.normalization();
            assert!((composite_score(&averages) - field.weight()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_composite_formula() {
        let averages = [15.0, 2.0, 3.0, 1.5, 2.5, 1.5];
        let expected = (15.0 / 22.0 * 0.3)
            + (2.0 / 5.0 * 0.2)
            + (3.0 / 5.0 * 0.1)
            + (1.5 / 4.0 * 0.1)
            + (2.5 / 5.0 * 0.1)
            + (1.5 / 5.0 * 0.2);
        let score = composite_score(&averages);

        assert!((score - expected).abs() < 1e-12);
        assert!((score - 0.49205).abs() < 1e-4);
    }

    #[test]
    fn test_composite_is_deterministic() {
        let averages = [7.3, 2.9, 3.1, 2.2, 2.8, 1.7];
        assert_eq!(
            composite_score(&averages).to_bits(),
            composite_score(&averages).to_bits()
        );
    }

    #[test]
    fn test_composite_at_range_maxima() {
        // every average at its normalization range gives exactly the weight sum
        let maxima = Field::ALL.map(Field::normalization);
        assert!((composite_score(&maxima) - 1.0).abs() < 1e-12);
        assert_eq!(composite_score(&[0.0; 6]), 0.0);
    }
}
