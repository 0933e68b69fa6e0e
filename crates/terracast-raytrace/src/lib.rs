#![warn(missing_docs)]

//! Ray-heightfield intersection for the terracast kernel.
//!
//! Finds the nearest surface hit of a ray against a
//! [`HeightMap`](terracast_heightfield::HeightMap) in three stages:
//!
//! - [`intersect_bounds`] - slab test against the heightfield's bounding
//!   box; the X/Z slabs yield the parametric window the traversal walks,
//!   the Y slab only vetoes
//! - [`Raycast::find_intersection`] - run-based DDA over the cell grid,
//!   culling runs whose cells the ray passes entirely above
//! - [`intersect::intersect_triangle`] - exact parametric test against the
//!   two triangles of each surviving cell
//!
//! Cells are visited in strictly increasing distance along the ray, so the
//! first exact hit is the nearest one.
//!
//! Queries are read-only over the immutable grid; calling
//! [`Raycast::find_intersection`] on one `HeightMap` from many threads at
//! once is safe.

pub mod intersect;
mod ray;
mod raycast;
mod slab;

pub use ray::{Ray, RayHit};
pub use raycast::Raycast;
pub use slab::intersect_bounds;
