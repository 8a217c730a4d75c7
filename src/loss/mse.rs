pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>() / n
    }

    /// Euclidean distance `||expected - predicted||`.
    pub fn error_norm(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected.iter())
            .map(|(a, b)| (b - a).powi(2))
            .sum::<f64>()
            .sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_and_norm() {
        let p = [0.5, 1.0, 0.0];
        let e = [0.5, 0.0, 2.0];
        assert!((MseLoss::loss(&p, &e) - 5.0 / 3.0).abs() < 1e-12);
        assert!((MseLoss::error_norm(&p, &e) - 5.0_f64.sqrt()).abs() < 1e-12);
    }
}
