use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "search-cloud")]
#[command(about = "Scrapes search results for a keyword and renders a word cloud")]
#[command(version)]
pub struct Args {
    /// Keyword to search for (prompted on stdin when omitted)
    pub keyword: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of result pages to crawl
    #[arg(short = 'p', long)]
    pub max_pages: Option<u32>,

    /// Number of weighted keywords to draw
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Shape mask image (white pixels stay empty)
    #[arg(short, long, conflicts_with = "no_mask")]
    pub mask: Option<PathBuf>,

    /// Render without a shape mask
    #[arg(long)]
    pub no_mask: bool,

    /// Font file able to render the result language
    #[arg(short, long)]
    pub font: Option<PathBuf>,

    /// Directory for the text dump and the image
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Do not open the rendered image
    #[arg(long)]
    pub no_show: bool,
}
