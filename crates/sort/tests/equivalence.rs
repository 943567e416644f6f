#![allow(missing_docs)]
use bitonet_backend::cpu::{CpuBackend, CpuBackendConfig};
use bitonet_primitives::direction::{Direction, PadSide};
use bitonet_primitives::schedule::{NetworkSchedule, Stage};
use bitonet_primitives::traits::SortElement;
use bitonet_sort::oracle::{assert_equivalent, oracle_sort};
use bitonet_sort::parallel::run_parallel;
use bitonet_sort::serial::run_serial;
use bitonet_sort::{verify, verify_sequence, PaddedSequence, RunConfig};
use proptest::{collection::vec, prelude::*};

fn init_tracing() {
  let _ = tracing_subscriber::fmt()
    .with_max_level(tracing::Level::DEBUG)
    .with_test_writer()
    .try_init();
}

fn direction() -> impl Strategy<Value = Direction> {
  prop_oneof![Just(Direction::Ascending), Just(Direction::Descending)]
}

fn cpu<T: SortElement>() -> CpuBackend<T> {
  CpuBackend::new(CpuBackendConfig { threads: Some(4), min_pairs_per_task: 8 }).unwrap()
}

/// Runs all three executors on copies of `values` and checks every pair for equivalence.
fn check_all_executors<T: SortElement>(values: &[T], direction: Direction) {
  let original = PaddedSequence::from_values(values);
  let schedule = NetworkSchedule::new(original.padded_length());

  let mut serial = original.clone();
  run_serial(&mut serial, &schedule, direction);
  let mut parallel = original.clone();
  run_parallel(&mut parallel, &schedule, direction, &mut cpu::<T>()).unwrap();
  let mut oracle = original;
  oracle_sort(&mut oracle, direction);

  assert_equivalent(&oracle, &serial);
  assert_equivalent(&oracle, &parallel);
  assert_equivalent(&serial, &parallel);
  assert!(oracle.is_well_formed());
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(200))]

  #[test]
  fn executors_agree_on_i32(values in vec(any::<i32>(), 1..300), direction in direction()) {
    check_all_executors(&values, direction);
  }

  #[test]
  fn executors_agree_on_u8(values in vec(any::<u8>(), 1..300), direction in direction()) {
    check_all_executors(&values, direction);
  }

  #[test]
  fn executors_agree_on_f64(values in vec(-1.0f64..1.0, 1..300), direction in direction()) {
    check_all_executors(&values, direction);
  }

  #[test]
  fn sorting_twice_changes_nothing(values in vec(any::<i16>(), 1..300), direction in direction()) {
    let mut seq = PaddedSequence::from_values(&values);
    oracle_sort(&mut seq, direction);
    let sorted = seq.clone();
    let schedule = NetworkSchedule::new(seq.padded_length());
    run_serial(&mut seq, &schedule, direction);
    prop_assert_eq!(&seq, &sorted);
    run_parallel(&mut seq, &schedule, direction, &mut cpu::<i16>()).unwrap();
    prop_assert_eq!(&seq, &sorted);
  }

  #[test]
  fn padded_length_is_next_power_of_two(len in 1usize..5000) {
    let seq = PaddedSequence::from_values(&vec![0u32; len]);
    let n = seq.padded_length();
    prop_assert!(n.is_power_of_two());
    prop_assert!(n >= len && n >= 2);
    prop_assert!(len == 1 || n / 2 < len);
  }
}

#[test]
fn four_values_ascending() {
  let schedule = NetworkSchedule::new(4);
  assert_eq!(schedule.stages(), &[Stage::new(2, 1), Stage::new(4, 2), Stage::new(4, 1)]);
  check_all_executors(&[5i32, 1, 4, 2], Direction::Ascending);

  let mut seq = PaddedSequence::from_values(&[5i32, 1, 4, 2]);
  run_serial(&mut seq, &schedule, Direction::Ascending);
  assert_eq!(seq.contents(), &[1, 2, 4, 5]);
  assert_eq!(seq.padding_len(), 0);
}

#[test]
fn three_values_move_the_sentinel() {
  let original = PaddedSequence::from_values(&[7i64, -7, 0]);
  assert_eq!(original.padded_length(), 4);
  assert_eq!(original.contents()[3], i64::MAX);

  let asc = verify_sequence(&original, Direction::Ascending, &mut cpu::<i64>()).unwrap();
  assert_eq!(asc.sorted.contents()[3], i64::MAX);
  assert_eq!(asc.sorted.pad_side(), PadSide::Tail);

  let desc = verify_sequence(&original, Direction::Descending, &mut cpu::<i64>()).unwrap();
  assert_eq!(desc.sorted.contents()[0], i64::MAX);
  assert_eq!(desc.sorted.pad_side(), PadSide::Head);
}

#[test]
fn single_value_runs_one_stage() {
  let original = PaddedSequence::from_values(&[0.125f32]);
  for direction in [Direction::Ascending, Direction::Descending] {
    let verification = verify_sequence(&original, direction, &mut cpu::<f32>()).unwrap();
    assert_eq!(verification.report.padded_length, 2);
    assert_eq!(verification.report.stages, 1);
    assert_eq!(verification.sorted.logical_values(), &[0.125]);
  }
}

#[test]
fn every_element_type_verifies() {
  init_tracing();
  fn run<T: SortElement>() {
    for direction in [Direction::Ascending, Direction::Descending] {
      let config = RunConfig { length: 1500, direction, seed: Some(2024) };
      let verification = verify::<T, _>(&config, &mut cpu::<T>()).unwrap();
      assert_eq!(verification.report.padded_length, 2048);
      assert_eq!(verification.report.stages, 66);
      assert!(verification.sorted.is_well_formed());
    }
  }
  run::<i8>();
  run::<i16>();
  run::<i32>();
  run::<i64>();
  run::<u8>();
  run::<u16>();
  run::<u32>();
  run::<u64>();
  run::<f32>();
  run::<f64>();
}

#[test]
fn boxed_backend_verifies() {
  let mut backend: Box<dyn bitonet_backend::traits::ComputeBackend<u32>> = Box::new(cpu::<u32>());
  let config = RunConfig { length: 100, seed: Some(5), ..Default::default() };
  let verification = verify::<u32, _>(&config, &mut backend).unwrap();
  assert!(verification.report.backend.starts_with("cpu"));
}
