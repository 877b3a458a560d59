use crate::sinks::DEFAULT_OUTFILE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// Where to write the generated invoice
    #[clap(short, long, default_value = DEFAULT_OUTFILE)]
    pub output: PathBuf,

    /// A TOML file overriding page size, fonts, colours and column widths
    #[clap(short, long)]
    pub style: Option<PathBuf>,
}
