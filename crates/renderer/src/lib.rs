//! 2D drawing for the hike scene: the canvas-style surface contract, paths
//! and paints, a recording surface, a software raster surface, the viewport
//! and the follow camera.

pub mod camera;
pub mod paint;
pub mod path;
pub mod raster;
pub mod recorder;
pub mod surface;
pub mod viewport;

pub use camera::*;
pub use paint::*;
pub use path::*;
pub use raster::*;
pub use recorder::*;
pub use surface::*;
pub use viewport::*;
