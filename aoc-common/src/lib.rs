//! Shared support library for Advent of Code solutions
//!
//! Small immutable value types and helpers used across the daily solvers:
//!
//! - [`grid`]: 2D integer [`grid::Position`] with its validity-checked
//!   rectangular [`grid::Boundary`]
//! - [`three_d`]: 3D integer [`three_d::Coordinate`] with axis-aligned
//!   stepping and line generation
//! - [`ranges`]: inclusive [`ranges::IntegerRange`] with split/membership
//!   operations
//! - [`math`]: GCD/LCM/min-max free functions
//! - [`input`]: non-empty-line helpers over strings and files
//!
//! All value types are created by their constructors and never mutated;
//! "modification" produces a new value.

pub mod grid;
pub mod input;
pub mod math;
pub mod ranges;
pub mod three_d;
