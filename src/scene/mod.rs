//! Scene graph side of picking: named node hierarchies, ray/box
//! intersection, the [`SceneProvider`] trait the pick controller consumes,
//! and [`Stage`], the headless provider every preset shares.

mod bounds;
mod node;
mod provider;
mod stage;
mod surface;

pub use bounds::{Aabb, Ray};
pub use node::{Intersection, NodeDescription, SceneNode};
pub use provider::{OrbitGesture, SceneProvider};
pub use stage::{Stage, GRID_NODE, GROUND_NODE};
pub use surface::{RenderSurface, Viewport};
