pub mod aggregate;
pub mod crawler;
pub mod search;

#[cfg(test)]
mod tests;

pub use aggregate::{Pacing, crawl};
pub use crawler::PageSource;
pub use search::SearchClient;
