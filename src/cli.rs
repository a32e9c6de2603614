use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ambivox",
    about = "Carve an object that shows a different silhouette from each of three views"
)]
pub struct Cli {
    /// Object name to build, or an existing `.stl` file to check
    pub target: String,

    /// Voxel grid side length
    #[arg(short = 'r', long)]
    pub resolution: Option<usize>,

    /// Mirror the Top view
    #[arg(short = 'm', long = "mirror")]
    pub use_mirror: bool,

    /// Silhouette sources in Left, Top, Right order (`path` or `path@ge1`)
    #[arg(short = 'I', long = "image", num_args = 1..)]
    pub images: Vec<String>,

    /// Characters drawn with `--font`, taking the views after `-I`
    #[arg(short = 'C', long = "chars", num_args = 1..)]
    pub chars: Vec<String>,

    /// TrueType/OpenType font used for `-C`
    #[arg(short = 'f', long = "font")]
    pub font: Option<PathBuf>,

    /// Invert the drawn characters
    #[arg(short = 'i', long = "char-inv")]
    pub char_inv: bool,

    /// Color voxels by the view volume they fall in
    #[arg(short = 'c', long = "color-coded")]
    pub color_coded: bool,

    /// Color solid voxels with a single color
    #[arg(long, conflicts_with = "color_coded")]
    pub plain_colors: bool,

    /// TOML build configuration; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Merge coplanar unit faces into rectangles before saving
    #[arg(long)]
    pub merge_coplanar: bool,

    /// Write ASCII STL instead of binary
    #[arg(long)]
    pub ascii: bool,

    /// Output path (default `<NAME>.stl`)
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Print what the solid looks like from each view
    #[arg(long)]
    pub preview: bool,
}

impl Cli {
    /// Targets ending in `.stl` are checked rather than built.
    pub fn is_check(&self) -> bool {
        PathBuf::from(&self.target)
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("stl"))
    }
}
