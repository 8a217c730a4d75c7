use crate::{
    error::{NetworkError, Result},
    loss::mse::MseLoss,
    network::network::Network,
    optim::sgd::Sgd,
};

/// Runs one in-order pass over the dataset, one online gradient step per
/// sample, and returns the mean MSE measured on each sample's output just
/// before its update.
pub fn train_network(
    network: &mut Network,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
    optimizer: &Sgd,
) -> Result<f64> {
    if inputs.len() != expected_outputs.len() {
        return Err(NetworkError::invalid(format!(
            "{} inputs but {} targets",
            inputs.len(),
            expected_outputs.len()
        )));
    }
    if inputs.is_empty() {
        return Err(NetworkError::invalid("dataset is empty"));
    }

    let mut total_loss = 0.0;

    for (input, expected) in inputs.iter().zip(expected_outputs.iter()) {
        let output = optimizer.step(network, input, expected)?;
        total_loss += MseLoss::loss(&output, expected);
    }

    Ok(total_loss / inputs.len() as f64)
}
