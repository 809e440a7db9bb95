//! Circuits assembled from gates, switches and lights.

pub mod adder;
pub mod bus;
pub mod counter;
pub mod display;
pub mod latch;
