use clap::Parser;
use search_cloud::SearchCloud;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Keyword to search for
    #[arg(short, long)]
    keyword: String,

    /// JSON configuration string
    #[arg(short, long)]
    config: Option<String>,

    /// Number of result pages to crawl
    #[arg(short, long, default_value_t = 2)]
    pages: u32,

    /// Shape mask image
    #[arg(short, long)]
    mask: Option<PathBuf>,

    /// Directory for the text dump and image
    #[arg(short, long, default_value = "txt_data")]
    out_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    let args = Args::parse();
    println!("Building word cloud for: {}", args.keyword);

    let mut builder = SearchCloud::new(args.keyword);

    // Configuration string replaces the defaults, flags override it
    if let Some(config_str) = args.config {
        println!("Applying configuration from string");
        builder = builder.with_config_str(&config_str)?;
    }

    if let Some(mask) = args.mask {
        println!("Using mask: {}", mask.display());
        builder = builder.with_mask(Some(mask));
    }

    let start_time = std::time::Instant::now();
    let summary = builder
        .with_max_pages(args.pages)
        .with_top_k(50)
        .with_output_dir(args.out_dir)
        .with_show(false)
        .run()
        .await?;

    println!(
        "Collected {} of {} pages, drew {} of {} keywords in {:.2} seconds",
        summary.report.collected(),
        summary.report.attempted(),
        summary.words_drawn,
        summary.keywords.len(),
        start_time.elapsed().as_secs_f64()
    );
    println!("Text:  {}", summary.paths.text_path.display());
    println!("Image: {}", summary.paths.image_path.display());

    Ok(())
}
