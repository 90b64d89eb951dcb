pub mod grouping;
pub mod normalize;
pub mod resize;
pub mod sequence;
pub mod stack;
