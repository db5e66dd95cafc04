//! Typed plugin variants
//!
//! One struct per built-in plugin type, with a setter per declared
//! parameter. Each variant is a thin wrapper around [`PluginBuilder`], so
//! validation is identical to building by name:
//!
//! ```
//! use scene_description::plugin::catalog::{SmoothDiffuseMaterial, Sphere};
//! use scene_description::transform::Transform;
//! use scene_description::value::Rgb;
//!
//! let sphere = Sphere::new()
//!     .radius(1.0)
//!     .bsdf(SmoothDiffuseMaterial::new().reflectance(Rgb::new(0.8, 0.2, 0.2)).build().unwrap())
//!     .to_world(Transform::new().translate(0.0, 0.0, 3.0))
//!     .build()
//!     .unwrap();
//! assert_eq!(sphere.type_id(), "sphere");
//! ```
//!
//! Adding a variant takes one entry below plus the matching schema entry.

use super::{Plugin, PluginBuilder, PluginError};
use crate::schema::{Category, SchemaRegistry};
use crate::value::Value;

macro_rules! catalog {
    ($(
        $(#[$meta:meta])*
        $name:ident => $category:ident / $type_id:literal { $($param:ident),* $(,)? }
    )*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone)]
            pub struct $name(PluginBuilder);

            impl $name {
                /// Plugin category
                pub const CATEGORY: Category = Category::$category;

                /// Type identifier in the scene document
                pub const TYPE_ID: &'static str = $type_id;

                /// Parameters with a dedicated setter
                pub const PARAMS: &'static [&'static str] = &[$(stringify!($param)),*];

                /// Start a plugin without parameters
                pub fn new() -> Self {
                    Self(PluginBuilder::new(Self::CATEGORY, Self::TYPE_ID))
                }

                /// Set the plugin id
                #[must_use]
                pub fn id(self, id: impl Into<String>) -> Self {
                    Self(self.0.id(id))
                }

                $(
                    #[doc = concat!("Set the `", stringify!($param), "` parameter")]
                    #[must_use]
                    pub fn $param(self, value: impl Into<Value>) -> Self {
                        Self(self.0.param(stringify!($param), value))
                    }
                )*

                /// Set a parameter by name
                #[must_use]
                pub fn param(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
                    Self(self.0.param(name, value))
                }

                /// Let undeclared parameters through
                #[must_use]
                pub fn relaxed(self) -> Self {
                    Self(self.0.relaxed())
                }

                /// Validate against the process-wide registry
                pub fn build(self) -> Result<Plugin, PluginError> {
                    self.0.build()
                }

                /// Validate against `registry`
                pub fn build_with(self, registry: &SchemaRegistry) -> Result<Plugin, PluginError> {
                    self.0.build_with(registry)
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::new()
                }
            }

            impl From<$name> for PluginBuilder {
                fn from(variant: $name) -> Self {
                    variant.0
                }
            }
        )*

        #[cfg(test)]
        const VARIANTS: &[(Category, &str, &[&str])] = &[
            $((Category::$category, $type_id, &[$(stringify!($param)),*])),*
        ];
    };
}

catalog! {
    /// Ideal diffuse (Lambertian) material
    SmoothDiffuseMaterial => Bsdf / "diffuse" { reflectance }
    /// Perfectly smooth conductor
    SmoothConductor => Bsdf / "conductor" { material, eta, k, specular_reflectance }
    /// Microfacet conductor
    RoughConductor => Bsdf / "roughconductor" {
        material, eta, k, specular_reflectance, distribution, alpha, alpha_u, alpha_v, sample_visible,
    }
    /// Smooth interface between two dielectrics
    SmoothDielectric => Bsdf / "dielectric" {
        int_ior, ext_ior, specular_reflectance, specular_transmittance,
    }
    /// Smooth diffuse base under a dielectric coating
    SmoothPlastic => Bsdf / "plastic" {
        diffuse_reflectance, nonlinear, int_ior, ext_ior, specular_reflectance,
    }
    /// Makes a one-sided BSDF two-sided
    TwoSidedBsdf => Bsdf / "twosided" { bsdf }

    /// Analytic sphere
    Sphere => Shape / "sphere" { center, radius, flip_normals, to_world, bsdf }
    /// Unit cube spanning -1..1
    Cube => Shape / "cube" { flip_normals, to_world, bsdf }
    /// Unit rectangle in the xy plane
    Rectangle => Shape / "rectangle" { flip_normals, to_world, bsdf }
    /// Unit disk in the xy plane
    Disk => Shape / "disk" { flip_normals, to_world, bsdf }
    /// Open cylinder between two points
    Cylinder => Shape / "cylinder" { p0, p1, radius, flip_normals, to_world, bsdf }
    /// Triangle mesh loaded from a Wavefront OBJ file
    WavefrontObjMesh => Shape / "obj" {
        filename, face_normals, flip_tex_coords, flip_normals, to_world, bsdf,
    }
    /// Triangle mesh loaded from a PLY file
    PlyMesh => Shape / "ply" { filename, face_normals, flip_normals, to_world, bsdf }

    /// Pinhole camera with perspective projection
    PerspectivePinholeCamera => Sensor / "perspective" {
        to_world, fov, fov_axis, focal_length, near_clip, far_clip, film, sampler,
    }
    /// Camera with orthographic projection
    OrthographicCamera => Sensor / "orthographic" { to_world, near_clip, far_clip, film, sampler }

    /// Isotropic point light
    PointLightSource => Emitter / "point" { intensity, position, to_world }
    /// Emission from the surface of the shape it is attached to
    AreaLight => Emitter / "area" { radiance }
    /// Uniform emission from every direction
    ConstantEnvironmentEmitter => Emitter / "constant" { radiance }
    /// Environment map in latitude-longitude format
    EnvironmentEmitter => Emitter / "envmap" { filename, scale, to_world }
    /// Light arriving from one direction at infinity
    DistantDirectionalEmitter => Emitter / "directional" { irradiance, direction, to_world }

    /// Unidirectional path tracer
    PathTracer => Integrator / "path" { max_depth, rr_depth, hide_emitters }
    /// Direct illumination only
    DirectIllumination => Integrator / "direct" {
        shading_samples, emitter_samples, bsdf_samples, hide_emitters,
    }
    /// Path tracer with participating media
    VolumetricPathTracer => Integrator / "volpath" { max_depth, rr_depth, hide_emitters }

    /// Image texture
    BitmapTexture => Texture / "bitmap" { filename, filter_type, wrap_mode, raw, to_uv }
    /// Two-color checkerboard
    CheckerboardTexture => Texture / "checkerboard" { color0, color1, to_uv }

    /// High dynamic range film
    HighDynamicRangeFilm => Film / "hdrfilm" {
        width, height, file_format, pixel_format, component_format,
        crop_offset_x, crop_offset_y, crop_width, crop_height, rfilter,
    }

    /// Independent uniform samples
    IndependentSampler => Sampler / "independent" { sample_count, seed }
    /// Stratified samples
    StratifiedSampler => Sampler / "stratified" { sample_count, seed, jitter }
    /// Correlated multi-jittered samples
    MultijitterSampler => Sampler / "multijitter" { sample_count, seed, jitter }

    /// Medium with constant properties
    HomogeneousMedium => Medium / "homogeneous" { albedo, sigma_t, scale, sample_emitters, phase }

    /// Scatters uniformly in all directions
    IsotropicPhaseFunction => PhaseFunction / "isotropic" {}
    /// Henyey-Greenstein lobe
    HenyeyGreensteinPhaseFunction => PhaseFunction / "hg" { g }

    /// Box reconstruction filter
    BoxFilter => ReconstructionFilter / "box" {}
    /// Gaussian reconstruction filter
    GaussianFilter => ReconstructionFilter / "gaussian" { stddev }
    /// Tent reconstruction filter
    TentFilter => ReconstructionFilter / "tent" { radius }

    /// Constant spectrum
    UniformSpectrum => Spectrum / "uniform" { value }
    /// Spectrum sampled at regular wavelength intervals
    RegularSpectrum => Spectrum / "regular" { wavelength_min, wavelength_max, values }
    /// Blackbody emission spectrum
    BlackbodySpectrum => Spectrum / "blackbody" { temperature, wavelength_min, wavelength_max }

    /// Constant volume data
    ConstantVolume => Volume / "constvolume" { value, to_world }
    /// Volume data loaded from a grid file
    GridVolume => Volume / "gridvolume" { filename, filter_type, raw, to_world }
}
