//! Reference sort and the equivalence check.
use bitonet_primitives::direction::Direction;
use bitonet_primitives::traits::SortElement;

use crate::error::Mismatch;
use crate::sequence::PaddedSequence;

/// Sorts the whole buffer of `seq`, padding included, with the standard library sort.
///
/// The sentinels are the maximum value, so they end up on the same side as the network puts them.
pub fn oracle_sort<T: SortElement>(seq: &mut PaddedSequence<T>, direction: Direction) {
  let contents = seq.contents_mut();
  match direction {
    Direction::Ascending => contents.sort_unstable_by(|a, b| a.total_cmp(b)),
    Direction::Descending => contents.sort_unstable_by(|a, b| b.total_cmp(a)),
  }
  seq.settle(direction);
}

/// Compares `actual` against `expected`: lengths, padding side, then every slot byte for byte.
/// Returns the first difference found.
pub fn check_equivalence<T: SortElement>(
  expected: &PaddedSequence<T>,
  actual: &PaddedSequence<T>,
) -> Result<(), Mismatch> {
  if expected.logical_length() != actual.logical_length() {
    return Err(Mismatch::LogicalLength {
      expected: expected.logical_length(),
      actual: actual.logical_length(),
    });
  }
  if expected.padded_length() != actual.padded_length() {
    return Err(Mismatch::PaddedLength {
      expected: expected.padded_length(),
      actual: actual.padded_length(),
    });
  }
  if expected.pad_side() != actual.pad_side() {
    return Err(Mismatch::PadSide { expected: expected.pad_side(), actual: actual.pad_side() });
  }

  let differing = expected
    .contents()
    .iter()
    .zip(actual.contents())
    .position(|(e, a)| bytemuck::bytes_of(e) != bytemuck::bytes_of(a));
  match differing {
    Some(index) => Err(Mismatch::Element {
      index,
      expected: format!("{:?}", expected.contents()[index]),
      actual: format!("{:?}", actual.contents()[index]),
    }),
    None => Ok(()),
  }
}

/// Panicking form of [`check_equivalence`].
/// # Panics
/// * If the sequences differ in any way.
#[track_caller]
pub fn assert_equivalent<T: SortElement>(expected: &PaddedSequence<T>, actual: &PaddedSequence<T>) {
  if let Err(mismatch) = check_equivalence(expected, actual) {
    panic!("sequences are not equivalent: {mismatch}");
  }
}
