//! Domain models for market data.

mod fundamentals;
mod news;
mod profile;
mod quote;
mod rating;
mod screener;
mod types;

pub use fundamentals::{DcfValuation, IncomeSummary};
pub use news::NewsArticle;
pub use profile::CompanyProfile;
pub use quote::{Candle, Quote};
pub use rating::{AnalystRecommendations, RatingSnapshot};
pub use screener::ScreenerEntry;
pub use types::{Interval, ProviderId};
