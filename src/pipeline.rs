use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;

use ambivox_geom::Aabb;
use ambivox_io::{BuildConfig, StlFormat, ViewSource, load_config_from_path, load_mesh, save_mesh};
use ambivox_mesh::{Mesh, assemble, merge_coplanar};
use ambivox_voxel::{Carver, Carving, ColorMode, Solid, ViewAxis, Views};

use crate::cli::Cli;

/// Effective build settings: config file (if any) with flags applied on top.
/// Returns the config plus the directory relative view paths resolve against.
pub fn resolve_config(cli: &Cli) -> Result<(BuildConfig, Option<PathBuf>), Box<dyn Error>> {
    let (mut cfg, base) = match &cli.config {
        Some(path) => (
            load_config_from_path(path)?,
            path.parent().map(Path::to_path_buf),
        ),
        None => (BuildConfig::default(), None),
    };
    cfg.name = cli.target.clone();
    if let Some(r) = cli.resolution {
        cfg.resolution = r;
    }
    cfg.use_mirror |= cli.use_mirror;
    if cli.color_coded {
        cfg.color_mode = ColorMode::ByAxis;
    } else if cli.plain_colors {
        cfg.color_mode = ColorMode::Plain;
    }
    cfg.merge_coplanar |= cli.merge_coplanar;
    if cli.ascii {
        cfg.format = StlFormat::Ascii;
    }
    if cli.output.is_some() {
        cfg.output = cli.output.clone();
    }
    if cli.font.is_some() {
        cfg.font = cli.font.clone();
    }
    cfg.char_inv |= cli.char_inv;
    // Command-line sources are relative to the working directory.
    let base = if cli.images.is_empty() && cli.chars.is_empty() {
        base
    } else {
        cfg.views = cli.images.iter().map(ViewSource::new).collect();
        cfg.chars = cli.chars.clone();
        if cli.font.is_none() {
            cfg.font = cfg.font.take().map(|f| match &base {
                Some(dir) if f.is_relative() => dir.join(f),
                _ => f,
            });
        }
        None
    };
    cfg.validate()?;
    Ok((cfg, base))
}

pub struct Built {
    pub carving: Carving,
    pub mesh: Mesh,
}

pub fn build(cfg: &BuildConfig, base: Option<&Path>) -> Result<Built, Box<dyn Error>> {
    let t0 = Instant::now();
    let mut masks = cfg
        .mask_sources(base)?
        .iter()
        .map(|s| s.load(cfg.resolution))
        .collect::<Result<Vec<_>, _>>()?;
    for glyph in cfg.glyph_sources(base) {
        masks.push(glyph.load(cfg.resolution)?);
    }
    let views = Views::from_masks(masks)?;
    let carving = Carver::new(cfg.resolution)?
        .with_mirror(cfg.use_mirror)
        .with_color_mode(cfg.color_mode)
        .build(&views)?;
    log::info!("Created (Voxel): {}", cfg.name);
    if let Some(colors) = &carving.annotation {
        log::info!(
            "colors: {} visible voxel(s), {} in the view union",
            colors.visible_count(),
            colors.union().count()
        );
    }

    let mut mesh = assemble(&carving.solid)?.with_name(cfg.name.as_str());
    if cfg.merge_coplanar {
        mesh = merge_coplanar(&mesh)?;
    }
    let ms: u32 = t0.elapsed().as_millis().min(u128::from(u32::MAX)) as u32;
    log::info!(
        target: "perf",
        "ms={} build name={} size={} voxels={} tris={}",
        ms,
        cfg.name,
        cfg.resolution,
        carving.solid.voxel_count(),
        mesh.len()
    );
    Ok(Built { carving, mesh })
}

/// What the solid looks like from each view, one text block per axis.
pub fn preview_text(solid: &Solid) -> String {
    let mut out = String::new();
    for axis in ViewAxis::ALL {
        out.push_str(&format!("{axis}:\n"));
        out.push_str(&solid.proof_view(axis).to_text('#', '.'));
    }
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeshReport {
    pub triangles: usize,
    pub edges: usize,
    pub non_manifold: usize,
    pub bounds: Option<Aabb>,
    pub volume: f64,
}

/// Loads an STL and verifies it is closed.
pub fn check(path: &Path) -> Result<MeshReport, Box<dyn Error>> {
    let mesh = load_mesh(path)?;
    let stats = mesh.check_closed()?;
    Ok(MeshReport {
        triangles: mesh.len(),
        edges: stats.edges,
        non_manifold: stats.non_manifold,
        bounds: mesh.bounds(),
        volume: mesh.signed_volume(),
    })
}

pub fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if cli.is_check() {
        let path = Path::new(&cli.target);
        let report = check(path)?;
        log::info!(
            "{}: closed, {} triangles, {} edges ({} non-manifold), volume {:.3}",
            path.display(),
            report.triangles,
            report.edges,
            report.non_manifold,
            report.volume
        );
        if let Some(b) = report.bounds {
            log::info!("bounds {} .. {}", b.min, b.max);
        }
        return Ok(());
    }

    let (cfg, base) = resolve_config(cli)?;
    let built = build(&cfg, base.as_deref())?;
    if cli.preview {
        print!("{}", preview_text(&built.carving.solid));
    }
    save_mesh(&built.mesh, &cfg.output_path(), cfg.format)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ambivox-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn flags_override_config() {
        let dir = scratch("resolve");
        let cfg_path = dir.join("build.toml");
        std::fs::write(
            &cfg_path,
            "resolution = 8\ncolor_mode = \"plain\"\n[[views]]\nsource = \"a.txt\"\n",
        )
        .unwrap();
        let cli = Cli::try_parse_from([
            "ambivox",
            "obj",
            "--config",
            cfg_path.to_str().unwrap(),
            "-r",
            "5",
            "--ascii",
        ])
        .unwrap();
        let (cfg, base) = resolve_config(&cli).unwrap();
        assert_eq!(cfg.name, "obj");
        assert_eq!(cfg.resolution, 5);
        assert_eq!(cfg.color_mode, ColorMode::Plain);
        assert_eq!(cfg.format, StlFormat::Ascii);
        assert_eq!(base.as_deref(), Some(dir.as_path()));
        assert_eq!(cfg.views.len(), 1);
    }

    #[test]
    fn builds_saves_and_checks() {
        let dir = scratch("build");
        let dot = dir.join("dot.txt");
        std::fs::write(&dot, "#\n").unwrap();
        let out = dir.join("dot.stl");
        let cli = Cli::try_parse_from([
            "ambivox",
            "dot",
            "-r",
            "3",
            "-I",
            dot.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--merge-coplanar",
        ])
        .unwrap();
        // A single dot fills the frame after cropping, so one full view
        let (cfg, base) = resolve_config(&cli).unwrap();
        let built = build(&cfg, base.as_deref()).unwrap();
        assert_eq!(built.carving.solid.voxel_count(), 27);
        assert_eq!(built.mesh.len(), 12);
        assert!(preview_text(&built.carving.solid).starts_with("Left:\n###\n"));

        run(&cli).unwrap();
        let report = check(&out).unwrap();
        assert_eq!(report.triangles, 12);
        assert!((report.volume - 27.0).abs() < 1e-3);
    }

    #[test]
    fn too_many_images_fail() {
        let cli = Cli::try_parse_from(["ambivox", "x", "-I", "a", "b", "c", "d"]).unwrap();
        let err = resolve_config(&cli).err().unwrap();
        assert!(err.to_string().contains("at most 3"));

        let cli = Cli::try_parse_from(["ambivox", "x", "-I", "a", "b", "-C", "c", "d", "-f", "k.ttf"]).unwrap();
        let err = resolve_config(&cli).err().unwrap();
        assert!(err.to_string().contains("4 views"));
    }

    #[test]
    fn chars_without_font_fail() {
        let cli = Cli::try_parse_from(["ambivox", "x", "-C", "N"]).unwrap();
        let err = resolve_config(&cli).err().unwrap();
        assert!(err.to_string().contains("without a font"));
    }

    #[test]
    fn chars_follow_images() {
        let cli = Cli::try_parse_from(["ambivox", "x", "-I", "a.png", "-C", "N", "-f", "k.ttf", "-i"]).unwrap();
        let (cfg, base) = resolve_config(&cli).unwrap();
        assert!(base.is_none());
        let glyphs = cfg.glyph_sources(None);
        assert_eq!(cfg.views.len(), 1);
        assert_eq!(glyphs.len(), 1);
        assert_eq!(glyphs[0].font, PathBuf::from("k.ttf"));
        assert!(glyphs[0].invert);
    }
}
