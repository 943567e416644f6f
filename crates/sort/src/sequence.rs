//! Power-of-two padded sequences.
use std::fmt;

use bitonet_primitives::direction::{Direction, PadSide};
use bitonet_primitives::traits::SortElement;
use bitonet_primitives::utils::padded_length_for;
use rand::Rng;

/// A sequence of `logical_length` values stored in a power-of-two buffer.
///
/// The `padded_length - logical_length` slots on the `pad_side` end hold `T::SENTINEL`. A fresh
/// sequence is padded at the tail; sorting moves the sentinels to the end implied by the sort
/// direction, and executors record that with [`PaddedSequence::settle`].
///
/// `Clone` is a deep copy, which is how each executor gets its own independent sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct PaddedSequence<T: SortElement> {
  contents: Vec<T>,
  logical_length: usize,
  pad_side: PadSide,
}

impl<T: SortElement> PaddedSequence<T> {
  /// Generates `logical_length` random values followed by sentinel padding.
  /// # Panics
  /// * If `logical_length == 0`.
  pub fn random<R: Rng + ?Sized>(logical_length: usize, rng: &mut R) -> Self {
    let padded_length = padded_length_for(logical_length);
    let mut contents = Vec::with_capacity(padded_length);
    contents.extend((0..logical_length).map(|_| T::random(rng)));
    contents.resize(padded_length, T::SENTINEL);
    Self { contents, logical_length, pad_side: PadSide::Tail }
  }

  /// Wraps the given values, padding at the tail.
  /// # Panics
  /// * If `values` is empty.
  pub fn from_values(values: &[T]) -> Self {
    let padded_length = padded_length_for(values.len());
    let mut contents = values.to_vec();
    contents.resize(padded_length, T::SENTINEL);
    Self { contents, logical_length: values.len(), pad_side: PadSide::Tail }
  }

  /// The full buffer, padding included.
  #[inline]
  pub fn contents(&self) -> &[T] {
    &self.contents
  }

  /// Mutable access to the full buffer. Executors reorder it in place.
  #[inline]
  pub fn contents_mut(&mut self) -> &mut [T] {
    &mut self.contents
  }

  /// Number of real values.
  #[inline]
  pub const fn logical_length(&self) -> usize {
    self.logical_length
  }

  /// Number of slots, a power of two.
  #[inline]
  pub fn padded_length(&self) -> usize {
    self.contents.len()
  }

  /// Number of sentinel slots.
  #[inline]
  pub fn padding_len(&self) -> usize {
    self.padded_length() - self.logical_length
  }

  /// The end currently holding the padding.
  #[inline]
  pub const fn pad_side(&self) -> PadSide {
    self.pad_side
  }

  /// Records that the sequence was sorted in `direction`, which moves the padding to
  /// `direction.pad_side()`.
  #[inline]
  pub fn settle(&mut self, direction: Direction) {
    self.pad_side = direction.pad_side();
  }

  /// The real values, skipping the padding slots.
  pub fn logical_values(&self) -> &[T] {
    match self.pad_side {
      PadSide::Head => &self.contents[self.padding_len()..],
      PadSide::Tail => &self.contents[..self.logical_length],
    }
  }

  /// Checks the layout invariant: power-of-two length covering the logical length, and every
  /// padding slot holding the sentinel.
  pub fn is_well_formed(&self) -> bool {
    let n = self.padded_length();
    if self.logical_length == 0 || n != padded_length_for(self.logical_length) {
      return false;
    }
    let padding = match self.pad_side {
      PadSide::Head => &self.contents[..self.padding_len()],
      PadSide::Tail => &self.contents[self.logical_length..],
    };
    padding.iter().all(|v| v.total_cmp(&T::SENTINEL).is_eq())
  }
}

impl<T: SortElement> fmt::Display for PaddedSequence<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, v) in self.logical_values().iter().enumerate() {
      if i > 0 {
        f.write_str(" ")?;
      }
      write!(f, "{v}")?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn test_random_layout() {
    let mut rng = StdRng::seed_from_u64(3);
    for len in [1usize, 2, 3, 5, 8, 100, 1000] {
      let seq = PaddedSequence::<i32>::random(len, &mut rng);
      assert_eq!(seq.logical_length(), len);
      assert_eq!(seq.padded_length(), padded_length_for(len));
      assert_eq!(seq.pad_side(), PadSide::Tail);
      assert!(seq.is_well_formed());
      assert_eq!(seq.logical_values().len(), len);
    }
  }

  #[test]
  fn test_single_value_is_padded_to_two() {
    let seq = PaddedSequence::from_values(&[7u16]);
    assert_eq!(seq.contents(), &[7, u16::MAX]);
    assert_eq!(seq.padding_len(), 1);
  }

  #[test]
  fn test_three_values_pad_one_slot() {
    let seq = PaddedSequence::from_values(&[3i32, -1, 9]);
    assert_eq!(seq.padded_length(), 4);
    assert_eq!(seq.contents()[3], i32::MAX);
    assert_eq!(seq.logical_values(), &[3, -1, 9]);
  }

  #[test]
  fn test_logical_values_follow_pad_side() {
    let mut seq = PaddedSequence::from_values(&[1i8, 2, 3]);
    seq.contents_mut().reverse();
    seq.settle(Direction::Descending);
    assert_eq!(seq.pad_side(), PadSide::Head);
    assert_eq!(seq.logical_values(), &[3, 2, 1]);
    assert!(seq.is_well_formed());
    assert_eq!(seq.to_string(), "3 2 1");
  }

  #[test]
  fn test_clone_is_independent() {
    let original = PaddedSequence::from_values(&[0.5f64, -0.25]);
    let mut copy = original.clone();
    copy.contents_mut()[0] = 0.0;
    assert_eq!(original.contents()[0], 0.5);
  }

  #[test]
  fn test_detects_broken_padding() {
    let mut seq = PaddedSequence::from_values(&[1u32, 2, 3]);
    seq.contents_mut()[3] = 0;
    assert!(!seq.is_well_formed());
  }

  #[test]
  fn test_same_seed_same_sequence() {
    let a = PaddedSequence::<f32>::random(257, &mut StdRng::seed_from_u64(42));
    let b = PaddedSequence::<f32>::random(257, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
  }

  #[test]
  #[should_panic(expected = "at least one value")]
  fn test_rejects_empty() {
    let _ = PaddedSequence::<u8>::from_values(&[]);
  }
}
