//! Map view state management.
//!
//! The rendering engine lives in the client; this crate owns everything the
//! product defines about the map that is not pixels: the per-layer
//! lifecycle state machine ([`view::MapView`]), the layer catalog with its
//! paint parameters ([`catalog`]), the piecewise-linear interpolation
//! constants ([`interpolate`]), the globe rotation loop
//! ([`rotation::RotationLoop`]), and GeoJSON point validation ([`geojson`]).

pub mod catalog;
pub mod geojson;
pub mod interpolate;
pub mod rotation;
pub mod view;


pub use catalog::{layer_catalog, LayerDescriptor};
pub use rotation::RotationLoop;
pub use view::{LayerId, LayerState, MapCommand, MapView};
