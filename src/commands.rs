//! CLI argument definitions
//!
//! Defines the clap arguments for the test wrapper.

use clap::Args;
use std::path::PathBuf;

use crate::engine::BuildConfiguration;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// The test pattern to use for Unreal Automation
    pub test_pattern: String,

    /// The build configuration to use (default: Development)
    #[arg(short = 'b', long, value_enum, ignore_case = true)]
    pub build_configuration: Option<BuildConfiguration>,

    /// Path to the base of the Unreal project to use (default: current directory)
    #[arg(short = 'p', long)]
    pub project_dir: Option<PathBuf>,

    /// Path to the base of the Unreal Engine installation to use
    #[arg(long)]
    pub engine_dir: Option<PathBuf>,

    /// Editor binary to run instead of the one found in the engine directory
    #[arg(long, value_name = "PATH")]
    pub editor: Option<String>,

    /// Disable colorized output
    #[arg(long)]
    pub no_color: bool,
}
