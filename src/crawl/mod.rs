//! Web crawling and talent roster extraction.

mod firecrawl;
mod talents;

pub use firecrawl::{CrawledPage, FirecrawlClient};
pub use talents::{AgencyContact, SocialLinks, Talent, TalentExtractor, TalentRoster};
