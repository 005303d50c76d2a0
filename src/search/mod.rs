//! Palette search: fuzzy scoring and grouped ranking of `/search` results.

pub mod fuzzy;
pub mod ranker;

pub use ranker::{rank, Category, PaletteRow, RankedResults, ResultGroup, SearchResultItem};
