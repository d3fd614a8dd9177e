//! Talents command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::output::content_preview;
use crate::cli::Output;
use crate::config::Settings;
use crate::toolkit::Toolkit;
use anyhow::Result;
use console::style;

/// Run the talents command.
pub async fn run_talents(
    url: &str,
    pages: u32,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Chat) {
        Output::error(&format!("{}", e));
        Output::info("Run 'brandlens doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let toolkit = Toolkit::new(settings)?;

    let spinner = Output::spinner(&format!("Crawling {} (up to {} pages)...", url, pages));
    let roster = toolkit.crawl_talent_agency(url, pages).await;
    spinner.finish_and_clear();

    match roster {
        Ok(roster) => {
            if roster.agency_name.is_empty() {
                Output::header("Talent roster");
            } else {
                Output::header(&roster.agency_name);
            }

            if let Some(email) = &roster.agency_contact.email {
                Output::kv("Email", email);
            }
            if let Some(phone) = &roster.agency_contact.phone {
                Output::kv("Phone", phone);
            }
            if let Some(address) = &roster.agency_contact.address {
                Output::kv("Address", address);
            }

            if roster.talents.is_empty() {
                println!();
                Output::warning("No talents were identified on the site.");
            } else {
                Output::header(&format!("Talents ({})", roster.talents.len()));
                for talent in &roster.talents {
                    println!("\n  {} {}", style("*").cyan(), style(&talent.name).bold());
                    if let Some(bio) = &talent.bio {
                        println!("    {}", content_preview(bio, 160));
                    }
                    if let Some(youtube) = &talent.social_links.youtube {
                        println!("    {} {}", style("youtube:").dim(), youtube);
                    }
                    if let Some(instagram) = &talent.social_links.instagram {
                        println!("    {} {}", style("instagram:").dim(), instagram);
                    }
                    if let Some(other) = &talent.social_links.other {
                        println!("    {} {}", style("other:").dim(), other);
                    }
                }
                println!();
            }

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&roster)?;
                if path == "-" {
                    println!("{}", json);
                } else {
                    std::fs::write(&path, &json)?;
                    Output::success(&format!("Roster saved to {}", path));
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Talent extraction failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
