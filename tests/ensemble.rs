use metacost::{
    Attribute,
    BaggedEnsemble,
    BaggingParams,
    Classifier,
    Error,
    PriorClassifier,
    Sample,
};


/// Predicts the distribution stored for the value of the first feature.
#[derive(Debug, Clone)]
struct Table {
    rows: Vec<Vec<f64>>,
    fail_on_train: bool,
}


#[derive(Debug, thiserror::Error)]
enum TableError {
    #[error("training was refused")]
    Refused,
    #[error("no distribution for key {0}")]
    UnknownKey(usize),
}


impl Classifier for Table {
    type Error = TableError;

    fn train(&mut self, _sample: &Sample) -> Result<(), TableError> {
        if self.fail_on_train {
            Err(TableError::Refused)
        } else {
            Ok(())
        }
    }

    fn distribution(&self, sample: &Sample, row: usize)
        -> Result<Vec<f64>, TableError>
    {
        let key = sample.features()[0][row] as usize;
        self.rows.get(key)
            .cloned()
            .ok_or(TableError::UnknownKey(key))
    }
}


fn sample(n_sample: usize) -> Sample {
    let mut sample = Sample::new(
        "toy",
        vec![Attribute::numeric("key")],
        Attribute::nominal("class", &["a", "b", "c"]),
    );
    for i in 0..n_sample {
        sample.push(vec![i as f64], (i % 3) as f64, 1.0).unwrap();
    }
    sample
}


#[test]
fn single_member_distribution_is_passed_through() {
    let sample = sample(2);
    let table = Table {
        rows: vec![vec![0.2, 0.3, 0.5], vec![1.0, 0.0, 0.0]],
        fail_on_train: false,
    };

    let mut ensemble = BaggedEnsemble::new();
    let params = BaggingParams::default().n_iterations(1);
    ensemble.build(&sample, || table.clone(), &params).unwrap();

    assert_eq!(ensemble.len(), 1);
    assert_eq!(
        ensemble.distribution(&sample, 0).unwrap(),
        vec![0.2, 0.3, 0.5],
    );
    assert_eq!(
        ensemble.distribution(&sample, 1).unwrap(),
        vec![1.0, 0.0, 0.0],
    );
}


#[test]
fn mean_of_members_sums_to_one() {
    let sample = sample(30);
    let mut ensemble = BaggedEnsemble::new();
    let params = BaggingParams::default()
        .n_iterations(8)
        .seed(12);
    ensemble.build(&sample, PriorClassifier::new, &params).unwrap();

    assert_eq!(ensemble.len(), 8);
    let dists = ensemble.distribution_all(&sample).unwrap();
    assert_eq!(dists.len(), 30);
    for dist in dists {
        assert_eq!(dist.len(), 3);
        assert!((dist.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(dist.iter().all(|&p| p > 0.0));
    }
}


#[test]
fn members_match_their_own_bags() {
    let sample = sample(30);
    let mut ensemble = BaggedEnsemble::new();
    let params = BaggingParams::default()
        .n_iterations(4)
        .seed(3);
    ensemble.build(&sample, PriorClassifier::new, &params).unwrap();

    for i in 0..ensemble.len() {
        let bits = ensemble.in_bag(i);
        let n_in = bits.count_ones(..);
        assert!(n_in > 0 && n_in <= 30);
    }
    for row in 0..30 {
        assert!(ensemble.out_of_bag_count(row) <= 4);
    }
}


#[test]
fn same_seed_same_ensemble() {
    let sample = sample(25);
    let params = BaggingParams::default()
        .n_iterations(6)
        .bag_size_percent(70)
        .seed(99);

    let mut a = BaggedEnsemble::new();
    let mut b = BaggedEnsemble::new();
    a.build(&sample, PriorClassifier::new, &params).unwrap();
    b.build(&sample, PriorClassifier::new, &params).unwrap();

    assert_eq!(a.models(), b.models());
    for i in 0..6 {
        assert_eq!(a.in_bag(i), b.in_bag(i));
    }
}


#[test]
fn failing_member_aborts_the_build() {
    let sample = sample(10);
    let good = Table { rows: vec![vec![1.0, 0.0, 0.0]; 10], fail_on_train: false };
    let bad = Table { fail_on_train: true, ..good.clone() };

    let mut ensemble = BaggedEnsemble::new();
    let params = BaggingParams::default().n_iterations(3);
    ensemble.build(&sample, || good.clone(), &params).unwrap();
    assert_eq!(ensemble.len(), 3);

    let err = ensemble.build(&sample, || bad.clone(), &params).unwrap_err();
    assert_eq!(err.to_string(), "training was refused");
    assert!(ensemble.is_empty());
    assert!(matches!(ensemble.distribution(&sample, 0), Err(Error::NotBuilt)));
}


#[test]
fn wrong_distribution_length() {
    let sample = sample(3);
    let table = Table { rows: vec![vec![0.5, 0.5]; 3], fail_on_train: false };

    let mut ensemble = BaggedEnsemble::new();
    let params = BaggingParams::default().n_iterations(2);
    ensemble.build(&sample, || table.clone(), &params).unwrap();

    let err = ensemble.distribution(&sample, 0).unwrap_err();
    assert!(matches!(
        err,
        Error::DimensionMismatch { expected: 3, got: 2, .. }
    ));
}


#[test]
fn empty_sample_cannot_be_bagged() {
    let sample = sample(0);
    let mut ensemble = BaggedEnsemble::<PriorClassifier>::new();
    let params = BaggingParams::default();
    let err = ensemble.build(&sample, PriorClassifier::new, &params)
        .unwrap_err();
    assert!(matches!(err, Error::EmptyDataset));
}


#[test]
fn unnormalized_member_output_is_rescaled() {
    let sample = sample(2);
    let table = Table {
        rows: vec![vec![0.5, 0.50001, 0.0], vec![1.0, 3.0, 0.0]],
        fail_on_train: false,
    };

    let mut ensemble = BaggedEnsemble::new();
    let params = BaggingParams::default().n_iterations(2);
    ensemble.build(&sample, || table.clone(), &params).unwrap();

    let dist = ensemble.distribution(&sample, 0).unwrap();
    assert!((dist.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    assert!(dist[1] > dist[0]);

    let dist = ensemble.distribution(&sample, 1).unwrap();
    assert!((dist[0] - 0.25).abs() < 1e-12);
    assert!((dist[1] - 0.75).abs() < 1e-12);
    assert_eq!(dist[2], 0.0);
}


#[test]
fn nan_member_output_is_an_error() {
    let sample = sample(2);
    let table = Table {
        rows: vec![vec![f64::NAN, 0.5, 0.5], vec![0.2, -0.2, 1.0]],
        fail_on_train: false,
    };

    let mut ensemble = BaggedEnsemble::new();
    let params = BaggingParams::default().n_iterations(3);
    ensemble.build(&sample, || table.clone(), &params).unwrap();

    let err = ensemble.distribution(&sample, 0).unwrap_err();
    assert!(matches!(err, Error::InvalidDistribution { index: 0, .. }));

    let err = ensemble.distribution(&sample, 1).unwrap_err();
    assert!(matches!(err, Error::InvalidDistribution { index: 1, .. }));

    assert!(ensemble.distribution_all(&sample).is_err());
}


#[test]
fn weighted_bags_skip_zero_weight_rows() {
    let mut sample = Sample::new(
        "toy",
        vec![Attribute::numeric("key")],
        Attribute::nominal("class", &["a", "b", "c"]),
    );
    for i in 0..12 {
        let weight = if i % 3 == 0 { 1.0 } else { 0.0 };
        sample.push(vec![i as f64], (i % 3) as f64, weight).unwrap();
    }

    let mut ensemble = BaggedEnsemble::new();
    let params = BaggingParams::default()
        .n_iterations(5)
        .seed(4)
        .with_weights(true);
    ensemble.build(&sample, PriorClassifier::new, &params).unwrap();

    for i in 0..ensemble.len() {
        let bits = ensemble.in_bag(i);
        assert!(bits.ones().all(|row| row % 3 == 0));
    }
    // Rows with zero weight are never drawn.
    for row in (0..12).filter(|row| row % 3 != 0) {
        assert_eq!(ensemble.out_of_bag_count(row), 5);
    }
}
