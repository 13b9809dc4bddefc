//! Auxiliary dataset files handled alongside the edge list

pub mod features;
