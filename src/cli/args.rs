use clap::Parser;
use std::path::PathBuf;

use bandstack::{DuplicateBandPolicy, PipelineStep, ResampleKernel, StackOrder};

#[derive(Parser)]
#[command(name = "bandstack", version, about = "BANDSTACK CLI")]
pub struct CliArgs {
    /// Pipeline step to run (stack, check, resize, sequence or all)
    #[arg(long, value_enum, default_value_t = PipelineStep::All)]
    pub step: PipelineStep,

    /// JSON file with pipeline parameters; flags given on the command line override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory with raw single-band rasters
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Directory for multi-band stacks (<timestamp>_stack.tif)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Directory for resampled stacks
    #[arg(long)]
    pub resized_dir: Option<PathBuf>,

    /// Required bands in stacking order, comma separated (e.g. VIS,SWIR,MIR,TIR1,TIR2,WV)
    #[arg(long, value_delimiter = ',')]
    pub band_order: Option<Vec<String>>,

    /// Time steps per input window
    #[arg(long)]
    pub input_len: Option<usize>,

    /// Time steps per target window
    #[arg(long)]
    pub pred_len: Option<usize>,

    /// Resampling ratio (< 1 shrinks, > 1 enlarges)
    #[arg(long)]
    pub scale_factor: Option<f64>,

    /// Resampling kernel (nearest, bilinear, catmull-rom, lanczos3)
    #[arg(long, value_enum)]
    pub kernel: Option<ResampleKernel>,

    /// Time ordering of loaded stacks (lexicographic or chronological)
    #[arg(long, value_enum)]
    pub order: Option<StackOrder>,

    /// Handling of several files for one band and timestamp (last-wins or reject)
    #[arg(long, value_enum)]
    pub duplicates: Option<DuplicateBandPolicy>,

    /// Rescale each loaded stack to [0, 1] before building windows
    #[arg(long, default_value_t = false)]
    pub normalize: bool,

    /// Write the step report as JSON to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
