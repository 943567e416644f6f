//! Traits for the element types the sorting network operates on.
use std::cmp::Ordering;
use std::fmt::{Debug, Display};

use bytemuck::Pod;
use rand::Rng;

/// A fixed-width numeric type that can be sorted by the network.
///
/// The type must be plain old data so that sequences can be handed to a compute backend and
/// compared byte-for-byte, and it must carry a total order so every executor agrees on where
/// each value (including the sentinel) lands.
pub trait SortElement: Pod + PartialOrd + Send + Sync + Debug + Display {
  /// Padding value. The maximum finite value of the type, so padding always sorts to one end.
  const SENTINEL: Self;

  /// Rust spelling of the type, used in logs and reports.
  const TYPE_NAME: &'static str;

  /// OpenCL C spelling of the type, passed to device kernels at build time.
  const CL_TYPE: &'static str;

  /// Total order over all values of the type.
  fn total_cmp(&self, other: &Self) -> Ordering;

  /// Draws one value. Integers are uniform over their full range, floats uniform over `[-1, 1)`.
  fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;

  /// `self > other` under `total_cmp`.
  #[inline]
  fn is_greater(&self, other: &Self) -> bool {
    self.total_cmp(other) == Ordering::Greater
  }
}

/// Implements `SortElement` for a primitive integer type.
macro_rules! impl_sort_element_for_int {
  ($ty:ty, $cl:literal) => {
    impl SortElement for $ty {
      const SENTINEL: Self = <$ty>::MAX;
      const TYPE_NAME: &'static str = stringify!($ty);
      const CL_TYPE: &'static str = $cl;

      #[inline]
      fn total_cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(self, other)
      }

      #[inline]
      fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.random::<$ty>()
      }
    }
  };
}

/// Implements `SortElement` for a primitive floating point type.
macro_rules! impl_sort_element_for_float {
  ($ty:ty, $cl:literal) => {
    impl SortElement for $ty {
      const SENTINEL: Self = <$ty>::MAX;
      const TYPE_NAME: &'static str = stringify!($ty);
      const CL_TYPE: &'static str = $cl;

      #[inline]
      fn total_cmp(&self, other: &Self) -> Ordering {
        <$ty>::total_cmp(self, other)
      }

      #[inline]
      fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.random_range(-1.0..1.0)
      }
    }
  };
}

impl_sort_element_for_int!(i8, "char");
impl_sort_element_for_int!(i16, "short");
impl_sort_element_for_int!(i32, "int");
impl_sort_element_for_int!(i64, "long");
impl_sort_element_for_int!(u8, "uchar");
impl_sort_element_for_int!(u16, "ushort");
impl_sort_element_for_int!(u32, "uint");
impl_sort_element_for_int!(u64, "ulong");
impl_sort_element_for_float!(f32, "float");
impl_sort_element_for_float!(f64, "double");

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn test_sentinel_is_maximum() {
    assert_eq!(<i8 as SortElement>::SENTINEL, i8::MAX);
    assert_eq!(<u64 as SortElement>::SENTINEL, u64::MAX);
    assert_eq!(<f32 as SortElement>::SENTINEL, f32::MAX);
    assert!(<f64 as SortElement>::SENTINEL.is_greater(&1.0));
    assert!(<i32 as SortElement>::SENTINEL.is_greater(&i32::MIN));
  }

  #[test]
  fn test_float_random_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..10_000 {
      let v = <f64 as SortElement>::random(&mut rng);
      assert!((-1.0..1.0).contains(&v));
      let w = <f32 as SortElement>::random(&mut rng);
      assert!((-1.0..1.0).contains(&w));
    }
  }

  #[test]
  fn test_int_random_covers_odd_and_negative() {
    let mut rng = StdRng::seed_from_u64(11);
    let values: Vec<i32> = (0..1000).map(|_| <i32 as SortElement>::random(&mut rng)).collect();
    assert!(values.iter().any(|v| v % 2 != 0));
    assert!(values.iter().any(|v| *v < 0));
    assert!(values.iter().any(|v| *v > 0));
  }

  #[test]
  fn test_total_cmp_floats() {
    assert_eq!(SortElement::total_cmp(&-0.5f64, &0.25), Ordering::Less);
    assert_eq!(SortElement::total_cmp(&0.25f32, &0.25), Ordering::Equal);
    assert!(!0.25f64.is_greater(&0.25));
  }

  #[test]
  fn test_type_names() {
    assert_eq!(<u16 as SortElement>::TYPE_NAME, "u16");
    assert_eq!(<f64 as SortElement>::CL_TYPE, "double");
    assert_eq!(<i64 as SortElement>::CL_TYPE, "long");
  }
}
