//! Frame sequence naming, byte sources, decoding and the preloading store.

pub mod decode;
pub mod sequence;
pub mod source;
pub mod store;
