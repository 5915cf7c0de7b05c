/*

    UV mapping: compute 2D texture coordinates for 3D points.

    - UVMap: a mapping strategy (planar here; spherical, box, etc.
      would be other implementers) that hands out a generator
      configured for a texture map.
    - UVGenerator: evaluated per vertex to produce (u, v).

    PlanarUVMap projects points onto the XY-plane of its plane2wcs
    transform, see PlanarUVMap::uv_transform( ) for the math.

    @date: Nov, 2025
    @author: bartu
*/

use rayon::prelude::*;
use serde::Serialize;
use std::any::Any;
use std::fmt::Debug;

use crate::json_parser::deser_float;
use crate::prelude::*;
use crate::texture::TextureMap;
use crate::transform::Transform3D;

pub type HeapAllocatedGenerator = Arc<dyn UVGenerator>;


// =======================================================================================================
// UVGenerator Trait
// =======================================================================================================
pub trait UVGenerator: Debug + Send + Sync {
    /// Texture coordinates of a point on a surface with the given normal.
    fn generate(&self, point: &Vector3, normal: &Vector3) -> Vector2;

    /// generate( ) for every vertex of a surface sharing one normal.
    fn generate_all(&self, points: &[Vector3], normal: &Vector3) -> Vec<Vector2> {
        points
            .par_iter()
            .map(|p| self.generate(p, normal))
            .collect()
    }
}


// =======================================================================================================
// UVMap Trait
// =======================================================================================================
pub trait UVMap: Debug + Send + Sync + Any {
    /// Generator for the given texture map. flip_texture swaps the U and V
    /// directions.
    fn get_generator(&self, texture_map: Option<&TextureMap>, normal: &Vector3, flip_texture: bool) -> HeapAllocatedGenerator;

    fn as_any(&self) -> &dyn Any;

    /// Equality across strategies, false for different concrete types.
    fn equals(&self, other: &dyn UVMap) -> bool;
}


// =======================================================================================================
// TransformUVGenerator (impl UVGenerator)
// =======================================================================================================

/// Generator that takes U and V from the X and Y rows of an affine transform.
/// The Z row is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformUVGenerator {
    uv_transform: Transform3D,
}

impl TransformUVGenerator {
    pub fn new(uv_transform: Transform3D) -> Self {
        Self { uv_transform }
    }

    pub fn uv_transform(&self) -> &Transform3D {
        &self.uv_transform
    }
}

impl UVGenerator for TransformUVGenerator {
    #[inline]
    fn generate(&self, point: &Vector3, _normal: &Vector3) -> Vector2 {
        let t = &self.uv_transform;
        Vector2::new(
            t.transform_x(point.x, point.y, point.z),
            t.transform_y(point.x, point.y, point.z),
        )
    }
}


// =======================================================================================================
// PlanarUVMap (impl UVMap)
// =======================================================================================================

/// Planar UV-mapping parallel to the XY-plane of plane2wcs.
///
/// plane2wcs must not scale; scaling is done by scale_u and scale_v
/// (UV units per model unit), optionally divided by the physical size of
/// the texture map.
///
/// set_plane2wcs( ) is the only mutation. Sharing a PlanarUVMap between
/// threads is fine as long as it is not being modified at the same time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, SmartDefault)]
#[serde(default)]
pub struct PlanarUVMap {
    #[serde(rename = "ScaleU", deserialize_with = "deser_float")]
    #[default = 1.0]
    scale_u: Float,
    #[serde(rename = "ScaleV", deserialize_with = "deser_float")]
    #[default = 1.0]
    scale_v: Float,
    #[serde(rename = "Plane2wcs")]
    plane2wcs: Transform3D,
}

impl PlanarUVMap {
    pub fn new(scale_u: Float, scale_v: Float, plane2wcs: Transform3D) -> Self {
        Self {
            scale_u,
            scale_v,
            plane2wcs,
        }
    }

    pub fn scale_u(&self) -> Float {
        self.scale_u
    }

    pub fn scale_v(&self) -> Float {
        self.scale_v
    }

    /// Plane to model coordinates, without scaling.
    pub fn get_plane2wcs(&self) -> &Transform3D {
        &self.plane2wcs
    }

    pub fn set_plane2wcs(&mut self, plane2wcs: Transform3D) {
        self.plane2wcs = plane2wcs;
    }

    /// scale_u and scale_v after taking the texture's physical size into
    /// account. The physical size is only used when both dimensions are known.
    pub fn effective_scale(&self, texture_map: Option<&TextureMap>) -> (Float, Float) {
        let mut scale_u = self.scale_u;
        let mut scale_v = self.scale_v;

        if let Some(map) = texture_map {
            if map.has_physical_size() {
                scale_u /= map.physical_width;
                scale_v /= map.physical_height;
                debug!(
                    "Texture '{}' is {}x{}, UV scale becomes ({}, {})",
                    map.name, map.physical_width, map.physical_height, scale_u, scale_v
                );
            } else if map.physical_width > 0.0 || map.physical_height > 0.0 {
                warn!(
                    "Texture '{}' has partial physical size {}x{}, ignoring it",
                    map.name, map.physical_width, map.physical_height
                );
            }
        }

        (scale_u, scale_v)
    }

    /// Transform from model coordinates to UV coordinates.
    ///
    /// The X and Y rows are the plane's X and Y axes (columns of plane2wcs,
    /// i.e. rows of its inverse) and the inverse translation, each scaled.
    /// With flip_texture the plane's Y axis feeds U and its X axis feeds V.
    /// The Z row is zero.
    pub fn uv_transform(&self, texture_map: Option<&TextureMap>, flip_texture: bool) -> Transform3D {
        let p = &self.plane2wcs;
        let (su, sv) = self.effective_scale(texture_map);

        let x_row = [p.xx(), p.yx(), p.zx(), p.inverse_xo()];
        let y_row = [p.xy(), p.yy(), p.zy(), p.inverse_yo()];
        let (u_row, v_row) = if flip_texture { (y_row, x_row) } else { (x_row, y_row) };

        Transform3D::from_rows(
            u_row[0] * su, u_row[1] * su, u_row[2] * su, u_row[3] * su,
            v_row[0] * sv, v_row[1] * sv, v_row[2] * sv, v_row[3] * sv,
            0.0, 0.0, 0.0, 0.0,
        )
    }
}

impl UVMap for PlanarUVMap {
    /// The normal does not matter for planar mapping.
    fn get_generator(&self, texture_map: Option<&TextureMap>, _normal: &Vector3, flip_texture: bool) -> HeapAllocatedGenerator {
        Arc::new(TransformUVGenerator::new(self.uv_transform(texture_map, flip_texture)))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn equals(&self, other: &dyn UVMap) -> bool {
        if std::ptr::addr_eq(self as *const PlanarUVMap, other as *const dyn UVMap) {
            return true;
        }
        match other.as_any().downcast_ref::<PlanarUVMap>() {
            Some(other) => self == other,
            None => false,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    // Stand-in for another mapping strategy
    #[derive(Debug)]
    struct ConstantUVMap;

    impl UVMap for ConstantUVMap {
        fn get_generator(&self, _: Option<&TextureMap>, _: &Vector3, _: bool) -> HeapAllocatedGenerator {
            Arc::new(TransformUVGenerator::new(Transform3D::from_rows(
                0., 0., 0., 0.,
                0., 0., 0., 0.,
                0., 0., 0., 0.,
            )))
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn equals(&self, other: &dyn UVMap) -> bool {
            other.as_any().is::<ConstantUVMap>()
        }
    }

    fn assert_uv(actual: Vector2, expected: Vector2) {
        assert!(
            approx_eq(actual.x, expected.x) && approx_eq(actual.y, expected.y),
            "expected {:?}, got {:?}", expected, actual
        );
    }

    #[test]
    fn test_identity_plane() {
        let map = PlanarUVMap::new(1.0, 1.0, Transform3D::IDENTITY);
        let normals = [Vector3::Z, Vector3::X, Vector3::new(0.3, -2.0, 7.0)];
        for normal in &normals {
            let generator = map.get_generator(None, normal, false);
            assert_uv(generator.generate(&Vector3::new(0.25, 0.75, 0.0), normal), Vector2::new(0.25, 0.75));
            assert_uv(generator.generate(&Vector3::new(-3.0, 2.0, 0.0), normal), Vector2::new(-3.0, 2.0));
        }
    }

    #[test]
    fn test_flip_swaps_axes() {
        let map = PlanarUVMap::new(1.0, 1.0, Transform3D::IDENTITY);
        let generator = map.get_generator(None, &Vector3::Z, true);
        assert_uv(generator.generate(&Vector3::new(1.0, 2.0, 0.0), &Vector3::Z), Vector2::new(2.0, 1.0));
    }

    #[test]
    fn test_flip_uses_swapped_scales() {
        // scale_u always applies to U, whichever plane axis feeds it
        let map = PlanarUVMap::new(2.0, 10.0, Transform3D::IDENTITY);
        let generator = map.get_generator(None, &Vector3::Z, true);
        assert_uv(generator.generate(&Vector3::new(1.0, 3.0, 0.0), &Vector3::Z), Vector2::new(6.0, 10.0));
    }

    #[test]
    fn test_scale() {
        let map = PlanarUVMap::new(2.0, 0.5, Transform3D::IDENTITY);
        let generator = map.get_generator(None, &Vector3::Z, false);
        assert_uv(generator.generate(&Vector3::new(1.0, 4.0, 0.0), &Vector3::Z), Vector2::new(2.0, 2.0));
    }

    #[test]
    fn test_texture_physical_size() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let map = PlanarUVMap::new(1.0, 1.0, Transform3D::IDENTITY);
        let texture = TextureMap::new("tiles", "tiles.png", 2.0, 4.0);
        let p = Vector3::new(1.0, 1.0, 0.0);

        let plain = map.get_generator(None, &Vector3::Z, false).generate(&p, &Vector3::Z);
        let scaled = map.get_generator(Some(&texture), &Vector3::Z, false).generate(&p, &Vector3::Z);
        assert_uv(scaled, Vector2::new(plain.x / 2.0, plain.y / 4.0));
    }

    #[test]
    fn test_texture_without_physical_size_is_ignored() {
        let map = PlanarUVMap::new(3.0, 3.0, Transform3D::IDENTITY);
        let unknown = TextureMap::new("tiles", "tiles.png", 0.0, 0.0);
        let partial = TextureMap::new("tiles", "tiles.png", 2.0, 0.0);
        assert_eq!(map.effective_scale(Some(&unknown)), (3.0, 3.0));
        assert_eq!(map.effective_scale(Some(&partial)), (3.0, 3.0));
        assert_eq!(map.effective_scale(None), (3.0, 3.0));
    }

    #[test]
    fn test_translated_plane() {
        let plane2wcs = Transform3D::from_translation(Vector3::new(5.0, 6.0, 7.0));
        let map = PlanarUVMap::new(1.0, 1.0, plane2wcs);
        let generator = map.get_generator(None, &Vector3::Z, false);
        assert_uv(generator.generate(&Vector3::new(5.0, 6.0, 7.0), &Vector3::Z), Vector2::ZERO);
        assert_uv(generator.generate(&Vector3::new(6.0, 8.0, 7.0), &Vector3::Z), Vector2::new(1.0, 2.0));
    }

    #[test]
    fn test_round_trip_through_plane() {
        // Plane coordinates mapped to world and back to UV give the scaled plane coordinates
        let plane2wcs = Transform3D::from_axis_angle(Vector3::new(1.0, 1.0, 0.0), 0.7)
            .with_translation(Vector3::new(-2.0, 3.0, 0.5));
        let map = PlanarUVMap::new(0.5, 2.0, plane2wcs);
        let generator = map.get_generator(None, &Vector3::Z, false);

        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (-2.5, 4.0)] {
            let world = plane2wcs.transform_point(&Vector3::new(x, y, 0.0));
            assert_uv(generator.generate(&world, &Vector3::Z), Vector2::new(x * 0.5, y * 2.0));
        }
    }

    #[test]
    fn test_vertical_plane() {
        // Plane XY rotated onto the world XZ plane
        let plane2wcs = Transform3D::from_axis_angle(Vector3::X, FRAC_PI_2);
        let map = PlanarUVMap::new(1.0, 1.0, plane2wcs);
        let generator = map.get_generator(None, &Vector3::NEG_Y, false);
        assert_uv(generator.generate(&Vector3::new(1.0, 0.0, 2.0), &Vector3::NEG_Y), Vector2::new(1.0, 2.0));
    }

    #[test]
    fn test_generate_all() {
        let map = PlanarUVMap::new(1.0, 2.0, Transform3D::from_rotation_z(0.3));
        let generator = map.get_generator(None, &Vector3::Z, false);
        let points: Vec<Vector3> = (0..100)
            .map(|i| Vector3::new(i as Float, (i * 2) as Float, 0.0))
            .collect();
        let all = generator.generate_all(&points, &Vector3::Z);
        assert_eq!(all.len(), points.len());
        for (p, uv) in points.iter().zip(all) {
            assert_eq!(uv, generator.generate(p, &Vector3::Z));
        }
    }

    #[test]
    fn test_set_plane2wcs() {
        let mut map = PlanarUVMap::default();
        assert_eq!(map.get_plane2wcs(), &Transform3D::IDENTITY);
        let moved = Transform3D::from_translation(Vector3::new(1.0, 0.0, 0.0));
        map.set_plane2wcs(moved);
        assert_eq!(map.get_plane2wcs(), &moved);
        let generator = map.get_generator(None, &Vector3::Z, false);
        assert_uv(generator.generate(&Vector3::new(1.0, 0.0, 0.0), &Vector3::Z), Vector2::ZERO);
    }

    #[test]
    fn test_equals() {
        let a = PlanarUVMap::new(1.0, 2.0, Transform3D::from_rotation_z(0.5));
        let b = PlanarUVMap::new(1.0, 2.0, Transform3D::from_rotation_z(0.5));
        let other_scale = PlanarUVMap::new(1.0, 3.0, Transform3D::from_rotation_z(0.5));
        let other_plane = PlanarUVMap::new(1.0, 2.0, Transform3D::IDENTITY);

        assert!(a.equals(&a));
        assert!(a.equals(&b) && b.equals(&a));
        assert!(!a.equals(&other_scale));
        assert!(!a.equals(&other_plane));

        let constant = ConstantUVMap;
        assert!(!a.equals(&constant));
        assert!(!constant.equals(&a));
        assert!(constant.equals(&constant));
    }

    #[test]
    fn test_json() {
        let map: PlanarUVMap = serde_json::from_str(
            r#"{"ScaleU": "0.5", "ScaleV": 2, "Plane2wcs": "1 0 0 1  0 1 0 2  0 0 1 3"}"#,
        ).unwrap();
        assert_eq!(map, PlanarUVMap::new(0.5, 2.0, Transform3D::from_translation(Vector3::new(1.0, 2.0, 3.0))));

        let defaults: PlanarUVMap = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, PlanarUVMap::default());
        assert_eq!((defaults.scale_u(), defaults.scale_v()), (1.0, 1.0));
    }
}
