//! View building blocks for the search palette.

pub mod highlight;
pub mod palette;
pub mod results;
pub mod search_bar;
pub mod theme;
