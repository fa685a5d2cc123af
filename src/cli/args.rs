use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "modrun", version, about = "Compose and run a program from a module template")]
pub struct CliArgs {
    /// Module to run; its template is `<template-dir>/<module>.template.json`
    #[arg(short = 'm', long)]
    pub module_name: String,

    /// File holding the run arguments: a raw run-argument string, or an I/O
    /// descriptor when the file name ends in `.json`
    #[arg(short = 'r', long)]
    pub run_arguments: PathBuf,

    /// Base directory; each run gets its own unique subdirectory here
    #[arg(short = 'w', long)]
    pub working_dir: PathBuf,

    /// Directory holding module templates
    #[arg(long, default_value = "templates")]
    pub template_dir: PathBuf,

    /// Directory holding per-module io/ and job/ files
    #[arg(long, default_value = "modules")]
    pub module_dir: PathBuf,

    /// Compute staged paths without transferring any files
    #[arg(long, default_value_t = false)]
    pub mock: bool,

    /// Keep outputs in the working directory instead of uploading them
    #[arg(long, default_value_t = false)]
    pub no_upload: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
