use std::path::PathBuf;

use ambivox_io::{Binarize, BuildConfig, ConfigError, StlFormat, load_config_from_path};
use ambivox_voxel::ColorMode;

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("ambivox-io-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn full_config_parses() {
    let cfg = BuildConfig::from_toml_str(
        r#"
        name = "NLP"
        resolution = 32
        use_mirror = true
        color_mode = "by_axis"
        merge_coplanar = true
        format = "ascii"

        [[views]]
        source = "n.png"

        [[views]]
        source = "l.txt"
        binarize = "ge"
        threshold = 1
        keep_aspect_ratio = false
        "#,
    )
    .unwrap();
    assert_eq!(cfg.name, "NLP");
    assert_eq!(cfg.resolution, 32);
    assert!(cfg.use_mirror && cfg.merge_coplanar);
    assert_eq!(cfg.color_mode, ColorMode::ByAxis);
    assert_eq!(cfg.format, StlFormat::Ascii);
    assert_eq!(cfg.output_path(), PathBuf::from("NLP.stl"));

    let sources = cfg.mask_sources(Some(std::path::Path::new("/data"))).unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].path, PathBuf::from("/data/n.png"));
    assert_eq!(sources[0].binarize, Binarize::Le);
    assert_eq!(sources[1].threshold, 1);
    assert!(!sources[1].keep_aspect_ratio);
}

#[test]
fn four_views_are_rejected() {
    let toml = (0..4).map(|i| format!("[[views]]\nsource = \"{i}.png\"\n")).collect::<String>();
    assert!(matches!(
        BuildConfig::from_toml_str(&toml),
        Err(ConfigError::TooManyViews { count: 4 })
    ));
}

#[test]
fn zero_resolution_is_rejected() {
    assert!(matches!(
        BuildConfig::from_toml_str("resolution = 0"),
        Err(ConfigError::ZeroResolution)
    ));
}

#[test]
fn unknown_color_mode_is_a_parse_error() {
    assert!(matches!(
        BuildConfig::from_toml_str("color_mode = \"rainbow\""),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn loads_from_disk() {
    let dir = scratch("config");
    let path = dir.join("build.toml");
    std::fs::write(&path, "name = \"disk\"\noutput = \"out/disk.stl\"\n").unwrap();
    let cfg = load_config_from_path(&path).unwrap();
    assert_eq!(cfg.output_path(), PathBuf::from("out/disk.stl"));
    assert!(matches!(
        load_config_from_path(&dir.join("missing.toml")),
        Err(ConfigError::Read { .. })
    ));
}
