//! Scene module
//!
//! The camera, the floating shape instances, the wireframe grid and the
//! builder that assembles them into a `SceneGraph`.

mod camera;
mod shape;
mod grid;
mod scene_graph;
mod scene_builder;

pub use camera::PerspectiveCamera;
pub use shape::ShapeInstance;
pub use grid::{GridGroup, GridLine, LineOrientation};
pub use scene_graph::SceneGraph;
pub use scene_builder::SceneBuilder;
