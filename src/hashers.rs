// This program is free software; you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation; either version 2 of the
// License, or (at your option) any later version.

// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program; if not, write to the Free Software
// Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston, MA
// 02110-1301, USA.

//! Ready made `ProbeHash` implementations.

use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash, Hasher};
use std::marker::PhantomData;

use digest::Digest;
use rustc_hex::ToHex;

use super::hashing::ProbeHash;

/// Default bound of the hex fold used by `DigestHash::new`.
pub const DEFAULT_FOLD_BOUND: i64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Fold {
    /// Sum of the character codes of the lowercase hex digest, modulo
    /// the bound.
    HexSum(i64),
    /// First eight digest bytes, big endian.
    Wide,
}

/// Hashes byte-like items with a cryptographic digest `D` and folds
/// the digest down to an `i64`.
///
/// `DigestHash::new()` uses the narrow hex fold: the digest is
/// rendered as lowercase hex, the ASCII codes of those characters are
/// summed, and the sum is reduced modulo 1000.  Filters built this way
/// are reproducible across implementations that use the same fold,
/// but every hash lands in `[0, 1000)`, so primary and secondary
/// hashes collide far more often than two independent 64 bit hashes
/// would.  Prefer `DigestHash::wide()` when compatibility with the
/// narrow fold is not needed.
///
/// ```rust
/// use bloomprobe::{DigestHash, ProbeHash};
/// use sha1::Sha1;
///
/// let h = DigestHash::<Sha1>::new();
/// assert_eq!(h.hash("foo"), 128);
/// ```
pub struct DigestHash<D> {
    fold: Fold,
    _digest: PhantomData<fn() -> D>,
}

impl<D: Digest> DigestHash<D> {
    /// Hex fold with the default bound of 1000.
    pub fn new() -> DigestHash<D> {
        DigestHash::with_bound(DEFAULT_FOLD_BOUND)
    }

    /// Hex fold reduced modulo `bound`.
    ///
    /// # Panics
    /// Panics if `bound` is not positive.
    pub fn with_bound(bound: i64) -> DigestHash<D> {
        assert!(bound > 0, "fold bound must be positive, got {}", bound);
        DigestHash {
            fold: Fold::HexSum(bound),
            _digest: PhantomData,
        }
    }

    /// Use the full width of the digest: its first eight bytes read
    /// as a big endian `i64`.  The result may be negative.
    pub fn wide() -> DigestHash<D> {
        DigestHash {
            fold: Fold::Wide,
            _digest: PhantomData,
        }
    }

    fn fold_digest(&self, digest: &[u8]) -> i64 {
        match self.fold {
            Fold::HexSum(bound) => {
                let hex: String = digest.to_hex();
                let sum: i64 = hex.bytes().map(|c| c as i64).sum();
                sum % bound
            }
            Fold::Wide => {
                let mut buf = [0u8; 8];
                let n = digest.len().min(8);
                buf[..n].copy_from_slice(&digest[..n]);
                i64::from_be_bytes(buf)
            }
        }
    }
}

impl<D: Digest> Default for DigestHash<D> {
    fn default() -> DigestHash<D> {
        DigestHash::new()
    }
}

impl<D> Clone for DigestHash<D> {
    fn clone(&self) -> DigestHash<D> {
        DigestHash {
            fold: self.fold,
            _digest: PhantomData,
        }
    }
}

impl<D> fmt::Debug for DigestHash<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigestHash")
            .field("digest", &std::any::type_name::<D>())
            .field("fold", &self.fold)
            .finish()
    }
}

impl<D, T> ProbeHash<T> for DigestHash<D>
    where D: Digest, T: AsRef<[u8]> + ?Sized
{
    fn hash(&self, item: &T) -> i64 {
        let digest = D::digest(item.as_ref());
        self.fold_digest(digest.as_slice())
    }
}

/// Adapts a `std::hash::BuildHasher` into a `ProbeHash` for any
/// `Hash` item.  The `u64` produced by the hasher is reinterpreted as
/// an `i64`.
///
/// Two `BuildHasherHash<RandomState>` values are seeded independently,
/// which makes them a reasonable primary/secondary pair within one
/// process.  Their outputs are not stable across processes.
#[derive(Clone, Debug, Default)]
pub struct BuildHasherHash<B = RandomState> {
    build_hasher: B,
}

impl BuildHasherHash<RandomState> {
    /// A randomly seeded hasher.
    pub fn new() -> BuildHasherHash<RandomState> {
        BuildHasherHash { build_hasher: RandomState::new() }
    }
}

impl<B: BuildHasher> BuildHasherHash<B> {
    pub fn with_hasher(build_hasher: B) -> BuildHasherHash<B> {
        BuildHasherHash { build_hasher }
    }
}

impl<B, T> ProbeHash<T> for BuildHasherHash<B>
    where B: BuildHasher, T: Hash + ?Sized
{
    fn hash(&self, item: &T) -> i64 {
        let mut hasher = self.build_hasher.build_hasher();
        Hash::hash(item, &mut hasher);
        hasher.finish() as i64
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::RandomState;
    use md5::Md5;
    use sha1::Sha1;
    use super::{BuildHasherHash, DigestHash};
    use crate::hashing::ProbeHash;

    #[test]
    fn hex_fold_sha1() {
        let h = DigestHash::<Sha1>::new();
        assert_eq!(h.hash("foo"), 128);
        assert_eq!(h.hash("bar"), 783);
        assert_eq!(h.hash("abc"), 675);
        assert_eq!(h.hash(""), 854);
    }

    #[test]
    fn hex_fold_md5() {
        let h = DigestHash::<Md5>::new();
        assert_eq!(h.hash("foo"), 626);
        assert_eq!(h.hash("bar"), 97);
        assert_eq!(h.hash("abc"), 107);
        assert_eq!(h.hash(""), 211);
    }

    #[test]
    fn hex_fold_bound() {
        let narrow = DigestHash::<Sha1>::with_bound(10);
        assert_eq!(narrow.hash("foo"), 8);
        for s in &["foo", "bar", "abc", "a longer string"] {
            let v = narrow.hash(*s);
            assert!(v >= 0 && v < 10);
        }
    }

    #[test]
    #[should_panic]
    fn zero_bound() {
        DigestHash::<Sha1>::with_bound(0);
    }

    #[test]
    fn wide_fold() {
        // sha1("abc") = a9993e364706816a...
        let h = DigestHash::<Sha1>::wide();
        assert_eq!(h.hash("abc"), 0xa9993e364706816au64 as i64);
        assert!(h.hash("abc") < 0);
        // works on byte slices and owned bytes too
        assert_eq!(h.hash(&b"abc"[..]), h.hash(&b"abc".to_vec()));
    }

    #[test]
    fn deterministic() {
        let a = DigestHash::<Md5>::wide();
        let b = a.clone();
        assert_eq!(a.hash("same"), b.hash("same"));
    }

    #[test]
    fn build_hasher() {
        let s = RandomState::new();
        let a = BuildHasherHash::with_hasher(s.clone());
        let b = BuildHasherHash::with_hasher(s);
        assert_eq!(a.hash(&42u32), b.hash(&42u32));
        assert_eq!(a.hash(&42u32), a.hash(&42u32));
        let fresh = BuildHasherHash::new();
        assert_eq!(fresh.hash("x"), fresh.hash("x"));
    }
}
