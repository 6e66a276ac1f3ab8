//! Implementation of a bloom filter in rust, with pluggable hash
//! functions and Dillinger-Manolios double hashing.
//!
//! # Basic Usage
//! ```toml
//! [dependencies]
//! bloomprobe = "0.1.0"
//! ```
//!
//! A filter is sized from the number of items it should hold and the
//! false positive rate it should have at that size.  It is given two
//! hash functions (anything implementing `ProbeHash`) and simulates
//! the `k` hash functions a bloom filter needs from those two:
//!
//! ```rust
//! use bloomprobe::{BloomFilter, DigestHash};
//! use md5::Md5;
//! use sha1::Sha1;
//!
//! let mut filter = BloomFilter::with_rate_and_hashers(
//!     1000, 0.001,
//!     DigestHash::<Sha1>::wide(),
//!     DigestHash::<Md5>::wide(),
//! ).unwrap();
//!
//! filter.add("foo");
//! assert!(filter.maybe_contains("foo"));
//! ```
//!
//! Construction reports `Error::InvalidArgument` for a zero capacity,
//! an error rate outside `(0, 1)` or, through `BloomFilterBuilder`, a
//! missing hash function.  `add` and `maybe_contains` never fail.

#![cfg_attr(feature = "do-bench", feature(test))]

pub mod bloom;
pub mod builder;
pub mod error;
pub mod hashers;
pub mod hashing;

pub use bloom::{BloomFilter, needed_bits, optimal_num_hashes};
pub use builder::BloomFilterBuilder;
pub use error::{Error, Result};
pub use hashers::{BuildHasherHash, DigestHash};
pub use hashing::{probe_position, ProbeHash, ProbeIter};
