//! String algorithms: KMP pattern search and Huffman coding.
//!
//! Text is handled as a sequence of `char`s, so indices in snapshots are
//! character positions rather than byte offsets.

mod huffman;
mod kmp;

pub use huffman::{CodeEntry, Huffman, HuffmanState, HuffmanStep, HuffNode};
pub use kmp::{Kmp, KmpPhase, KmpState, KmpStep, SearchQuery};
