#![warn(missing_docs)]

//! Heightfield grid geometry for the terracast kernel.
//!
//! A [`HeightMap`] is a rectangular grid of [`Cell`]s built from a
//! [`HeightSource`] sample grid, plus the placement and scale metadata that
//! maps grid indices to world space. It owns a precomputed bounding box and
//! answers coordinate and surface-sampling queries. Ray intersection lives
//! in the `terracast-raytrace` crate.

use thiserror::Error;

mod aabb;
mod cell;
mod heightmap;
mod source;

pub use aabb::Aabb3;
pub use cell::Cell;
pub use heightmap::HeightMap;
pub use source::{HeightSource, SampleGrid};

/// Errors from heightfield construction.
#[derive(Debug, Clone, Error)]
pub enum HeightFieldError {
    /// The sample source has fewer than 2x2 samples, so no cell can be built.
    #[error("sample source is {rows}x{cols}, need at least 2x2 samples")]
    SourceTooSmall {
        /// Sample rows provided by the source.
        rows: usize,
        /// Sample columns provided by the source.
        cols: usize,
    },

    /// A world-space extent is zero, negative, or not finite.
    #[error("extent `{0}` must be positive and finite")]
    BadExtent(&'static str),
}

/// Opaque material handle attached to a heightfield.
///
/// Never interpreted by the kernel; shading collaborators resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material(u32);

impl Material {
    /// Create a material handle from an external id.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// The external id this handle wraps.
    pub fn id(&self) -> u32 {
        self.0
    }
}
