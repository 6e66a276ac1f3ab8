
// utilities for hashing

/// Something that can turn an item into an integer hash.  A
/// `BloomFilter` holds two of these, a primary and a secondary, and
/// derives all of its probe positions from their outputs.
///
/// Implementations must be deterministic: the same item has to hash
/// to the same value every time, or the filter will report false
/// negatives.  The two hashes given to a filter should also be
/// independent of each other, otherwise the probes collapse onto the
/// same few bits and the false positive rate goes up.
///
/// Any `Fn(&T) -> i64` is a `ProbeHash<T>`:
///
/// ```rust
/// use bloomprobe::ProbeHash;
///
/// let len = |s: &str| s.len() as i64;
/// assert_eq!(len.hash("four"), 4);
/// ```
pub trait ProbeHash<T: ?Sized> {
    fn hash(&self, item: &T) -> i64;
}

impl<T: ?Sized, F> ProbeHash<T> for F
    where F: Fn(&T) -> i64
{
    #[inline]
    fn hash(&self, item: &T) -> i64 {
        self(item)
    }
}

/// Position of probe `i` in a bit array of `num_bits` bits, using the
/// Dillinger-Manolios composition `abs((h1 + i * h2) mod m)`.
///
/// The remainder is truncating, so its sign follows the dividend; the
/// absolute value of it is therefore always below `num_bits`.  The sum
/// is carried in `i128`, which holds `i64 + u32 * i64` without
/// overflow.
///
/// # Panics
/// Panics if `num_bits` is zero.
#[inline]
pub fn probe_position(h1: i64, h2: i64, i: u32, num_bits: usize) -> usize {
    assert!(num_bits > 0, "probe_position on an empty bit array");
    let sum = h1 as i128 + i as i128 * h2 as i128;
    (sum % num_bits as i128).unsigned_abs() as usize
}

/// Iterator over the `count` probe positions of one item.  The two
/// base hashes are computed once, when the iterator is created.
pub struct ProbeIter {
    h1: i64,
    h2: i64,
    num_bits: usize,
    i: u32,
    count: u32,
}

impl Iterator for ProbeIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.i == self.count {
            return None;
        }
        let r = probe_position(self.h1, self.h2, self.i, self.num_bits);
        self.i += 1;
        Some(r)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.count - self.i) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ProbeIter {}

impl ProbeIter {
    pub fn from<T, P, S>(item: &T, count: u32, num_bits: usize,
                         primary: &P, secondary: &S) -> ProbeIter
        where T: ?Sized, P: ProbeHash<T>, S: ProbeHash<T>
    {
        ProbeIter::with_hashes(primary.hash(item), secondary.hash(item), count, num_bits)
    }

    pub fn with_hashes(h1: i64, h2: i64, count: u32, num_bits: usize) -> ProbeIter {
        ProbeIter {
            h1,
            h2,
            num_bits,
            i: 0,
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use rand::{self, Rng};
    use super::{probe_position, ProbeHash, ProbeIter};

    #[test]
    fn first_probe_is_primary() {
        assert_eq!(probe_position(128, 626, 0, 14378), 128);
        assert_eq!(probe_position(128, 626, 1, 14378), 754);
        assert_eq!(probe_position(128, 626, 9, 14378), 5762);
    }

    #[test]
    fn negative_sum_uses_truncating_remainder() {
        // -7 + 3 * 2 = -1, and -1 % 5 is -1 rather than 4
        assert_eq!(probe_position(-7, 2, 3, 5), 1);
        assert_eq!(probe_position(-10, 0, 0, 5), 0);
        assert_eq!(probe_position(-9, 0, 0, 5), 4);
    }

    #[test]
    fn extremes_stay_in_range() {
        let edges = [i64::MIN, i64::MIN + 1, -1, 0, 1, i64::MAX - 1, i64::MAX];
        for &m in &[1usize, 2, 3, 7, 64, 14378, usize::MAX] {
            for &h1 in &edges {
                for &h2 in &edges {
                    for &i in &[0u32, 1, 2, 199, u32::MAX] {
                        assert!(probe_position(h1, h2, i, m) < m,
                                "h1={} h2={} i={} m={}", h1, h2, i, m);
                    }
                }
            }
        }
    }

    #[test]
    fn random_stay_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..10000 {
            let m = rng.gen_range(1..100000usize);
            let h1 = rng.gen::<i64>();
            let h2 = rng.gen::<i64>();
            for p in ProbeIter::with_hashes(h1, h2, 16, m) {
                assert!(p < m);
            }
        }
    }

    #[test]
    #[should_panic]
    fn zero_bits() {
        probe_position(1, 1, 0, 0);
    }

    #[test]
    fn iter_yields_count_positions() {
        let it = ProbeIter::with_hashes(783, 97, 10, 14378);
        assert_eq!(it.len(), 10);
        let v: Vec<usize> = it.collect();
        assert_eq!(v, vec![783, 880, 977, 1074, 1171, 1268, 1365, 1462, 1559, 1656]);
    }

    #[test]
    fn hashes_computed_once() {
        let calls = Cell::new(0);
        let primary = |s: &str| { calls.set(calls.get() + 1); s.len() as i64 };
        let secondary = |_: &str| 3i64;
        let v: Vec<usize> = ProbeIter::from("ab", 12, 100, &primary, &secondary).collect();
        assert_eq!(v.len(), 12);
        assert_eq!(calls.get(), 1);
        assert_eq!(primary.hash("abc"), 3);
    }
}
