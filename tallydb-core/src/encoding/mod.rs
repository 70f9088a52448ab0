//! Order-preserving encodings for keys and counts.
//!
//! The store sorts entries by raw bytes, so these codecs are written to make
//! byte order and logical order coincide. See [`keys`] for the layout.

pub mod keys;
