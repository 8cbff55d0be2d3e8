use approx::assert_relative_eq;
use plate_core::{
    checksum, plate_average, FieldPair, PlateParams, ProgressLog, RelaxConfig, RelaxationEngine,
    Schedule,
};
use proptest::prelude::*;

fn initialized(n: usize, north: f64, wall: f64, epsilon: f64) -> (FieldPair, RelaxConfig) {
    let params = PlateParams::new(n, north, wall, epsilon).unwrap();
    (
        FieldPair::initialize(&params).unwrap(),
        RelaxConfig::from_params(&params),
    )
}

#[test]
fn three_by_three_plate() {
    let (mut fields, config) = initialized(3, 100.0, 0.0, 1.0);
    assert_relative_eq!(fields.average(), 37.5);

    let engine = RelaxationEngine::new(config).unwrap();
    let mut log = ProgressLog::new();
    let outcome = engine.run(&mut fields, &mut log);

    assert_relative_eq!(log.points()[0].residual, 12.5);
    assert!(outcome.converged());
    assert!(outcome.residual <= 1.0);
    assert_relative_eq!(fields.current().get(1, 1), 25.0);
}

#[test]
fn cold_plate_stays_zero() {
    let (mut fields, config) = initialized(5, 0.0, 0.0, 1e-6);
    let engine = RelaxationEngine::new(config).unwrap();
    let outcome = engine.run(&mut fields, &mut ());

    assert!(outcome.converged());
    assert_eq!(outcome.iterations, 1);
    assert_eq!(outcome.residual, 0.0);
    assert_eq!(fields.current().checksum(), checksum(&vec![0.0; 25]));
}

#[test]
fn progress_is_sampled_at_powers_of_two_and_final() {
    let (mut fields, config) = initialized(40, 100.0, 10.0, 1e-4);
    let engine = RelaxationEngine::new(config).unwrap();
    let mut log = ProgressLog::new();
    let outcome = engine.run(&mut fields, &mut log);

    let iterations = log.iterations();
    let (last, sampled) = iterations.split_last().unwrap();
    assert_eq!(*last, outcome.iterations);
    for (k, it) in sampled.iter().enumerate() {
        assert_eq!(*it, 1u64 << k);
    }
    assert!(sampled.iter().all(|&it| it <= outcome.iterations));
}

#[test]
fn boundary_is_untouched_by_relaxation() {
    let (mut fields, config) = initialized(12, 70.0, 30.0, 1e-3);
    let engine = RelaxationEngine::new(config).unwrap();
    engine.run(&mut fields, &mut ());

    let field = fields.current();
    for row in 0..12 {
        for col in 0..12 {
            if row == 0 {
                assert_eq!(field.get(row, col), 70.0);
            } else if field.is_boundary(row, col) {
                assert_eq!(field.get(row, col), 30.0);
            }
        }
    }
}

#[test]
fn into_current_returns_converged_buffer() {
    let (mut fields, config) = initialized(10, 60.0, 20.0, 1e-2);
    let engine = RelaxationEngine::new(config).unwrap();
    let outcome = engine.run(&mut fields, &mut ());
    let expected = fields.field(outcome.buffer).checksum();
    assert_eq!(fields.into_current().checksum(), expected);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn initial_field_matches_boundary_model(
        n in 3usize..64,
        north in 0.0f64..=100.0,
        wall in 0.0f64..=100.0,
    ) {
        let (fields, _) = initialized(n, north, wall, 1.0);
        let avg = plate_average(n, north, wall);
        let nf = n as f64;
        prop_assert!((fields.average() - (wall * (3.0 * nf - 4.0) + north * nf) / (4.0 * nf - 4.0)).abs() < 1e-9);

        let field = fields.current();
        for row in 0..n {
            for col in 0..n {
                let v = field.get(row, col);
                if row == 0 {
                    prop_assert_eq!(v, north);
                } else if field.is_boundary(row, col) {
                    prop_assert_eq!(v, wall);
                } else {
                    prop_assert_eq!(v, avg);
                }
            }
        }
    }

    #[test]
    fn converges_and_stays_converged(
        n in 3usize..14,
        north in 0.0f64..=100.0,
        wall in 0.0f64..=100.0,
        epsilon in 1e-6f64..1.0,
    ) {
        let (mut fields, config) = initialized(n, north, wall, epsilon);
        let engine = RelaxationEngine::new(config.with_schedule(Schedule::Sequential)).unwrap();
        let outcome = engine.run(&mut fields, &mut ());
        prop_assert!(outcome.converged());
        prop_assert!(outcome.residual <= epsilon);

        let before = fields.current().clone();
        engine.step(&mut fields);
        let after = fields.current();
        for (a, b) in before.cells().iter().zip(after.cells()) {
            prop_assert!((a - b).abs() <= epsilon + 1e-12);
        }
    }

    #[test]
    fn worker_count_does_not_change_result(
        n in 3usize..30,
        north in 0.0f64..=100.0,
        wall in 0.0f64..=100.0,
        workers in 1usize..6,
    ) {
        let (mut seq_fields, config) = initialized(n, north, wall, 1e-2);
        let mut par_fields = seq_fields.clone();
        let seq = RelaxationEngine::new(config.clone().with_schedule(Schedule::Sequential)).unwrap();
        let par = RelaxationEngine::new(config.with_schedule(Schedule::Parallel { workers })).unwrap();

        let a = seq.run(&mut seq_fields, &mut ());
        let b = par.run(&mut par_fields, &mut ());
        prop_assert_eq!(a.iterations, b.iterations);
        prop_assert_eq!(a.residual.to_bits(), b.residual.to_bits());
        prop_assert_eq!(seq_fields.current().cells(), par_fields.current().cells());
    }
}
