pub mod all;
pub mod merge;
pub mod normalize;
