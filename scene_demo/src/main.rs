//! Scene description demo
//!
//! Builds a small reference scene (a red sphere lit by a point light, seen
//! by a perspective camera) and prints its document as JSON or RON.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use scene_description::config::Config;
use scene_description::foundation::logging;
use scene_description::prelude::*;

fn main() -> Result<()> {
    logging::init();

    let matches = Command::new("scene_demo")
        .about("Builds a reference scene and prints its scene document")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Scene configuration file (.toml or .ron)"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format")
                .value_parser(["json", "ron"])
                .default_value("json"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Write the document to a file instead of stdout"),
        )
        .arg(
            Arg::new("dump-schema")
                .long("dump-schema")
                .value_name("FILE")
                .help("Write the active plugin schema to a .toml or .ron file"),
        )
        .arg(
            Arg::new("relaxed")
                .long("relaxed")
                .help("Accept parameters the schema does not declare")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let mut config = match matches.get_one::<String>("config") {
        Some(path) => SceneConfig::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {path}"))?,
        None => SceneConfig::default(),
    };
    if matches.get_flag("relaxed") {
        config = config.with_validation(ValidationMode::Relaxed);
    }
    config.validate().map_err(anyhow::Error::msg)?;

    let registry = SchemaRegistry::from_config(&config).context("Failed to select plugin schema")?;
    log::info!(
        "Using {} plugin schemas for engine {}",
        registry.len(),
        registry.engine_version()
    );

    if let Some(path) = matches.get_one::<String>("dump-schema") {
        registry
            .to_schema_file()
            .save_to_file(path)
            .with_context(|| format!("Failed to write schema to {path}"))?;
        log::info!("Wrote schema to {path}");
    }

    registry.install()?;

    let scene = build_scene()?;
    let document = serialize(&scene).context("Failed to serialize scene")?;

    let text = match matches.get_one::<String>("format").map(String::as_str) {
        Some("ron") => document.to_ron_string()?,
        _ => document.to_json_string_pretty()?,
    };

    match matches.get_one::<String>("output") {
        Some(path) => {
            let path = PathBuf::from(path);
            std::fs::write(&path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote scene document to {}", path.display());
        }
        None => println!("{text}"),
    }

    Ok(())
}

fn build_scene() -> Result<Scene> {
    let red = SmoothDiffuseMaterial::new()
        .reflectance(Rgb::new(0.8, 0.2, 0.2))
        .build()?;
    let ball = Sphere::new()
        .radius(1.0)
        .bsdf(red)
        .to_world(Transform::new().translate(0.0, 0.0, 3.0).scale(1.0, 1.0, 1.0))
        .build()?;

    let camera = PerspectivePinholeCamera::new()
        .fov(45)
        .to_world(Transform::new().look_at([0.0, 1.0, -6.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0])?)
        .build()?;

    let sun = PointLightSource::new()
        .to_world(Transform::new().translate(3.0, 4.0, 2.0))
        .intensity(Rgb::gray(3.0))
        .build()?;

    let scene = SceneBuilder::new()
        .integrator(PathTracer::new().build()?)
        .sensor(camera)
        .shape("ball", ball)
        .emitter("sun", sun)
        .build()?;
    Ok(scene)
}
