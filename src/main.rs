use clap::Parser;
use search_cloud::SearchCloud;
use search_cloud::config::AppConfig;
use std::error::Error;
use std::io::{self, BufRead, Write};

mod args;
use args::Args;

/// Prompts for a keyword on stdin
fn read_keyword() -> io::Result<String> {
    print!("请输入关键词：");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(mut job: SearchCloud, args: &Args) -> SearchCloud {
    if let Some(max_pages) = args.max_pages {
        job = job.with_max_pages(max_pages);
    }
    if let Some(top_k) = args.top_k {
        job = job.with_top_k(top_k);
    }
    if args.no_mask {
        job = job.with_mask(None);
    } else if let Some(mask) = &args.mask {
        job = job.with_mask(Some(mask.clone()));
    }
    if let Some(font) = &args.font {
        job = job.with_font(font.clone());
    }
    if let Some(dir) = &args.out_dir {
        job = job.with_output_dir(dir.clone());
    }
    if args.no_show {
        job = job.with_show(false);
    }
    job
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };

    let keyword = match &args.keyword {
        Some(keyword) => keyword.trim().to_string(),
        None => read_keyword()?,
    };

    let job = apply_overrides(SearchCloud::new(keyword).with_config(config), &args);

    let summary = match job.run().await {
        Ok(summary) => summary,
        Err(e) => {
            ::log::error!("Word cloud generation failed: {}", e);
            return Err(e.into());
        }
    };

    println!(
        "Crawled {} pages ({} with results), {} lines saved to {}",
        summary.report.attempted(),
        summary.report.collected(),
        summary.report.lines(),
        summary.paths.text_path.display()
    );
    println!(
        "Drew {} of {} keywords into {}",
        summary.words_drawn,
        summary.keywords.len(),
        summary.paths.image_path.display()
    );

    Ok(())
}
