#![allow(missing_docs)]
use bitonet_primitives::direction::Direction;
use bitonet_primitives::rule::{compare_exchange, should_swap};
use bitonet_primitives::schedule::Stage;
use criterion::{criterion_group, criterion_main, measurement::Measurement, Criterion};
#[cfg(target_arch = "x86_64")]
use criterion_cycles_per_byte::CyclesPerByte;
use std::hint::black_box;

pub fn benchmark_rule<T: Measurement + 'static>(c: &mut Criterion<T>) {
  c.bench_function("should_swap", |b| {
    let stage = Stage::new(1 << 10, 1 << 4);
    b.iter(|| {
      for i in 0..1000usize {
        black_box(should_swap(
          black_box(i),
          stage,
          Direction::Ascending,
          black_box(&0x1234_5678u64),
          black_box(&0x1234u64),
        ));
      }
    })
  });

  c.bench_function("compare_exchange_stage", |b| {
    let mut data: Vec<u64> = (0..1024u64).rev().collect();
    let stage = Stage::new(1 << 10, 1);
    b.iter(|| {
      for i in 0..data.len() {
        black_box(compare_exchange(&mut data, i, stage, Direction::Descending));
      }
    })
  });
}

#[cfg(target_arch = "x86_64")]
criterion_group!(
  name = benches_cycles;
  config = Criterion::default().with_measurement(CyclesPerByte).warm_up_time(std::time::Duration::from_millis(500)).measurement_time(std::time::Duration::from_secs(1));
  targets = benchmark_rule<CyclesPerByte>
);

#[cfg(not(target_arch = "x86_64"))]
criterion_group!(
  name = benches_cycles;
  config = Criterion::default().warm_up_time(std::time::Duration::from_millis(500)).measurement_time(std::time::Duration::from_secs(1));
  targets = benchmark_rule
);

criterion_main!(benches_cycles);
