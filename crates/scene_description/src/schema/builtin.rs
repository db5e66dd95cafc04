//! Built-in fallback schema
//!
//! A hand-maintained subset of the renderer's plugin reference, used when no
//! schema file matches the target engine version. Every entry here has a
//! typed counterpart in `plugin::catalog`.

use super::ParamKind::{Boolean, Float, Integer, Spectrum, Transform, Vector};
use super::{Category, DefaultValue, ParamKind, ParamSchema, PluginSchema};

/// Engine version the built-in schema was taken from
pub const BUILTIN_ENGINE_VERSION: &str = "3.6.4";

fn opt(name: &str, kind: ParamKind) -> ParamSchema {
    ParamSchema::optional(name, kind)
}

fn req(name: &str, kind: ParamKind) -> ParamSchema {
    ParamSchema::required(name, kind)
}

fn float(name: &str, value: f64) -> ParamSchema {
    opt(name, Float).with_default(DefaultValue::Float(value))
}

fn int(name: &str, value: i64) -> ParamSchema {
    opt(name, Integer).with_default(DefaultValue::Int(value))
}

fn flag(name: &str, value: bool) -> ParamSchema {
    opt(name, Boolean).with_default(DefaultValue::Bool(value))
}

fn text(name: &str, value: &str) -> ParamSchema {
    opt(name, ParamKind::String).with_default(DefaultValue::String(value.to_string()))
}

fn spectrum(name: &str, value: f64) -> ParamSchema {
    opt(name, Spectrum).with_default(DefaultValue::Float(value))
}

fn plugin(name: &str, category: Category) -> ParamSchema {
    opt(name, ParamKind::Plugin(category))
}

fn schema(type_id: &str, title: &str, params: Vec<ParamSchema>) -> PluginSchema {
    PluginSchema {
        type_id: type_id.to_string(),
        title: title.to_string(),
        params,
    }
}

#[allow(clippy::too_many_lines)]
pub(super) fn builtin_schemas() -> Vec<(Category, PluginSchema)> {
    use Category as C;

    vec![
        // BSDFs
        (C::Bsdf, schema("diffuse", "Smooth diffuse material", vec![spectrum("reflectance", 0.5)])),
        (C::Bsdf, schema("conductor", "Smooth conductor", vec![
            text("material", "none"),
            opt("eta", Spectrum),
            opt("k", Spectrum),
            opt("specular_reflectance", Spectrum),
        ])),
        (C::Bsdf, schema("roughconductor", "Rough conductor material", vec![
            text("material", "none"),
            opt("eta", Spectrum),
            opt("k", Spectrum),
            opt("specular_reflectance", Spectrum),
            text("distribution", "beckmann"),
            float("alpha", 0.1),
            opt("alpha_u", Float),
            opt("alpha_v", Float),
            flag("sample_visible", true),
        ])),
        (C::Bsdf, schema("dielectric", "Smooth dielectric material", vec![
            float("int_ior", 1.5046),
            float("ext_ior", 1.000_277),
            opt("specular_reflectance", Spectrum),
            opt("specular_transmittance", Spectrum),
        ])),
        (C::Bsdf, schema("plastic", "Smooth plastic material", vec![
            spectrum("diffuse_reflectance", 0.5),
            flag("nonlinear", false),
            float("int_ior", 1.49),
            float("ext_ior", 1.000_277),
            opt("specular_reflectance", Spectrum),
        ])),
        (C::Bsdf, schema("twosided", "Two-sided BRDF adapter", vec![plugin("bsdf", C::Bsdf)])),
        // Shapes
        (C::Shape, schema("sphere", "Sphere", vec![
            opt("center", Vector),
            float("radius", 1.0),
            flag("flip_normals", false),
            opt("to_world", Transform),
        ])),
        (C::Shape, schema("cube", "Cube", vec![flag("flip_normals", false), opt("to_world", Transform)])),
        (C::Shape, schema("rectangle", "Rectangle", vec![flag("flip_normals", false), opt("to_world", Transform)])),
        (C::Shape, schema("disk", "Disk", vec![flag("flip_normals", false), opt("to_world", Transform)])),
        (C::Shape, schema("cylinder", "Cylinder", vec![
            opt("p0", Vector),
            opt("p1", Vector),
            float("radius", 1.0),
            flag("flip_normals", false),
            opt("to_world", Transform),
        ])),
        (C::Shape, schema("obj", "Wavefront OBJ mesh loader", vec![
            req("filename", ParamKind::String),
            flag("face_normals", false),
            flag("flip_tex_coords", true),
            flag("flip_normals", false),
            opt("to_world", Transform),
        ])),
        (C::Shape, schema("ply", "PLY (Stanford Triangle Format) mesh loader", vec![
            req("filename", ParamKind::String),
            flag("face_normals", false),
            flag("flip_normals", false),
            opt("to_world", Transform),
        ])),
        // Sensors
        (C::Sensor, schema("perspective", "Perspective pinhole camera", vec![
            opt("to_world", Transform),
            opt("fov", Float),
            text("fov_axis", "x"),
            opt("focal_length", ParamKind::String),
            float("near_clip", 0.01),
            float("far_clip", 10_000.0),
            plugin("film", C::Film),
            plugin("sampler", C::Sampler),
        ])),
        (C::Sensor, schema("orthographic", "Orthographic camera", vec![
            opt("to_world", Transform),
            float("near_clip", 0.01),
            float("far_clip", 10_000.0),
            plugin("film", C::Film),
            plugin("sampler", C::Sampler),
        ])),
        // Emitters
        (C::Emitter, schema("point", "Point light source", vec![
            opt("intensity", Spectrum),
            opt("position", Vector),
            opt("to_world", Transform),
        ])),
        (C::Emitter, schema("area", "Area light", vec![req("radiance", Spectrum)])),
        (C::Emitter, schema("constant", "Constant environment emitter", vec![spectrum("radiance", 1.0)])),
        (C::Emitter, schema("envmap", "Environment emitter", vec![
            req("filename", ParamKind::String),
            float("scale", 1.0),
            opt("to_world", Transform),
        ])),
        (C::Emitter, schema("directional", "Distant directional emitter", vec![
            opt("irradiance", Spectrum),
            opt("direction", Vector),
            opt("to_world", Transform),
        ])),
        // Integrators
        (C::Integrator, schema("path", "Path tracer", vec![
            int("max_depth", -1),
            int("rr_depth", 5),
            flag("hide_emitters", false),
        ])),
        (C::Integrator, schema("direct", "Direct illumination integrator", vec![
            opt("shading_samples", Integer),
            opt("emitter_samples", Integer),
            opt("bsdf_samples", Integer),
            flag("hide_emitters", false),
        ])),
        (C::Integrator, schema("volpath", "Volumetric path tracer", vec![
            int("max_depth", -1),
            int("rr_depth", 5),
            flag("hide_emitters", false),
        ])),
        // Textures
        (C::Texture, schema("bitmap", "Bitmap texture", vec![
            req("filename", ParamKind::String),
            text("filter_type", "bilinear"),
            text("wrap_mode", "repeat"),
            flag("raw", false),
            opt("to_uv", Transform),
        ])),
        (C::Texture, schema("checkerboard", "Checkerboard", vec![
            spectrum("color0", 0.4),
            spectrum("color1", 0.2),
            opt("to_uv", Transform),
        ])),
        // Films
        (C::Film, schema("hdrfilm", "High dynamic range film", vec![
            int("width", 768),
            int("height", 576),
            text("file_format", "openexr"),
            text("pixel_format", "rgb"),
            text("component_format", "float16"),
            opt("crop_offset_x", Integer),
            opt("crop_offset_y", Integer),
            opt("crop_width", Integer),
            opt("crop_height", Integer),
            plugin("rfilter", C::ReconstructionFilter),
        ])),
        // Samplers
        (C::Sampler, schema("independent", "Independent sampler", vec![int("sample_count", 4), int("seed", 0)])),
        (C::Sampler, schema("stratified", "Stratified sampler", vec![
            int("sample_count", 4),
            int("seed", 0),
            flag("jitter", true),
        ])),
        (C::Sampler, schema("multijitter", "Correlated multi-jittered sampler", vec![
            int("sample_count", 4),
            int("seed", 0),
            flag("jitter", true),
        ])),
        // Media
        (C::Medium, schema("homogeneous", "Homogeneous medium", vec![
            spectrum("albedo", 0.75),
            spectrum("sigma_t", 1.0),
            float("scale", 1.0),
            flag("sample_emitters", true),
            plugin("phase", C::PhaseFunction),
        ])),
        // Phase functions
        (C::PhaseFunction, schema("isotropic", "Isotropic phase function", vec![])),
        (C::PhaseFunction, schema("hg", "Henyey-Greenstein phase function", vec![float("g", 0.8)])),
        // Reconstruction filters
        (C::ReconstructionFilter, schema("box", "Box filter", vec![])),
        (C::ReconstructionFilter, schema("gaussian", "Gaussian filter", vec![float("stddev", 0.5)])),
        (C::ReconstructionFilter, schema("tent", "Tent filter", vec![float("radius", 1.0)])),
        // Spectra
        (C::Spectrum, schema("uniform", "Uniform spectrum", vec![req("value", Float)])),
        (C::Spectrum, schema("regular", "Regular spectrum", vec![
            float("wavelength_min", 360.0),
            float("wavelength_max", 830.0),
            req("values", ParamKind::String),
        ])),
        (C::Spectrum, schema("blackbody", "Blackbody spectrum", vec![
            req("temperature", Float),
            float("wavelength_min", 360.0),
            float("wavelength_max", 830.0),
        ])),
        // Volumes
        (C::Volume, schema("constvolume", "Constant-valued volume data source", vec![
            spectrum("value", 1.0),
            opt("to_world", Transform),
        ])),
        (C::Volume, schema("gridvolume", "Grid-based volume data source", vec![
            req("filename", ParamKind::String),
            text("filter_type", "trilinear"),
            flag("raw", false),
            opt("to_world", Transform),
        ])),
    ]
}
