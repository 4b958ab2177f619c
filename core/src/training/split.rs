use crate::error::{CoreError, CoreResult};
use crate::model::RiskLabel;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Row indices of a train/test partition, each ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Stratified, seeded train/test partition.
///
/// Each label's rows are shuffled with one `StdRng` seeded from `seed`
/// (Safe first, then Risky). A label with `n` rows sends
/// `round(n * test_fraction)` of them to the test side, clamped so both sides
/// keep at least one row of every label.
pub fn stratified_split(labels: &[RiskLabel], test_fraction: f64, seed: u64) -> CoreResult<Split> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for label in [RiskLabel::Safe, RiskLabel::Risky] {
        let mut rows: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|(_, l)| **l == label)
            .map(|(i, _)| i)
            .collect();
        let n = rows.len();
        if n < 2 {
            return Err(CoreError::TrainingData(format!(
                "label {} has {} example(s); at least 2 are needed to stratify",
                label, n
            )));
        }
        rows.shuffle(&mut rng);
        let n_test = ((n as f64 * test_fraction).round() as usize).clamp(1, n - 1);
        test.extend_from_slice(&rows[..n_test]);
        train.extend_from_slice(&rows[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();
    Ok(Split { train, test })
}
