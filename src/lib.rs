/*

    Geometry math kernel: bounds, affine transforms and
    UV-coordinate generation for a 3D rendering toolkit.

    Vectors and matrices come from bevy_math (see numeric.rs).

    @date: Nov, 2025
    @author: bartu
*/

pub mod numeric;
pub mod interval;
pub mod transform;
pub mod bbox;
pub mod texture;
pub mod uvmap;
pub mod json_parser;
pub mod error;

pub mod prelude;

pub use bbox::{Axis, BBoxable, Bounds3};
pub use error::GeomError;
pub use texture::TextureMap;
pub use transform::Transform3D;
pub use uvmap::{PlanarUVMap, TransformUVGenerator, UVGenerator, UVMap};
