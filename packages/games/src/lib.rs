//! Game engines for the petroglyph learning games.
//!
//! Each module holds the rules of one mechanic and nothing else: no I/O, no
//! clocks, and randomness always comes from a caller supplied [`rand::Rng`]
//! so rounds can be replayed from a seed.

pub mod canvas;
pub mod catalog;
pub mod errors;
pub mod hotspot_viewer;
pub mod memory_match;
pub mod quiz;
pub mod spot_difference;
pub mod timeline;
pub mod word_search;
