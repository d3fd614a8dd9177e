//! Prompt templates for BrandLens.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub scenes: ScenePrompts,
    pub sponsors: SponsorPrompts,
    pub talents: TalentPrompts,
    pub agent: AgentPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}


/// Prompts for per-scene content and sponsor analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenePrompts {
    pub system: String,
    pub user: String,
}

impl Default for ScenePrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a video content analyst. Analyze the given scene text and provide:
1. A brief, informative summary of what was discussed in the scene
2. If any sponsor/brand was mentioned in this specific scene, return the sponsor name
3. If no sponsor was mentioned, return an empty string

Respond with a JSON object containing exactly two fields:
{"summary": "string", "sponsor": "string"}

Do not add commentary around the JSON."#
                .to_string(),

            user: "Scene text: {{scene_text}}".to_string(),
        }
    }
}

/// Prompts for sponsor detection in video descriptions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SponsorPrompts {
    pub system: String,
    pub user: String,
}

impl Default for SponsorPrompts {
    fn default() -> Self {
        Self {
            system: r#"You detect sponsors from video descriptions.

Analyze the video description and list all sponsors/brands mentioned.
Return only a comma-separated list of sponsor names, nothing else.
Be precise and only include actual sponsors, not just mentioned brands.
If there are no sponsors, return an empty response."#
                .to_string(),

            user: "Video description: {{description}}".to_string(),
        }
    }
}

/// Prompts for talent roster extraction from crawled agency sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TalentPrompts {
    pub system: String,
    pub user: String,
}

impl Default for TalentPrompts {
    fn default() -> Self {
        Self {
            system: r#"You parse talent agency website content to extract talent information.

Extract the following information from the website content:
1. Agency name
2. Agency contact information (email, phone, address)
3. List of talents with:
   - Name
   - Social media links (YouTube, Instagram, etc.)
   - Brief bio (1-2 sentences)

Respond with JSON in exactly this shape:
{
  "agency_name": "string",
  "agency_contact": {
    "email": "string",
    "phone": "string",
    "address": "string"
  },
  "talents": [
    {
      "name": "string",
      "social_links": {
        "youtube": "string",
        "instagram": "string",
        "other": "string"
      },
      "bio": "string"
    }
  ]
}

Use null for fields that cannot be found. Do not add commentary around the JSON."#
                .to_string(),

            user: "Website content:\n{{content}}".to_string(),
        }
    }
}

/// System prompt for the tool-calling agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPrompts {
    pub system: String,
}

impl Default for AgentPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a YouTube creator and brand analysis assistant with access to data collection and analysis tools.

Capabilities:
- Resolve channel handles, URLs, and custom names to official channel IDs
- Fetch channel profiles, recent uploads, video details, statistics, and comments
- Search for channels by topic and for videos within a channel
- Download videos, transcribe them, and analyze content for scenes and sponsor mentions
- Score thumbnail visual appeal
- Score comment sentiment
- Predict view ranges for a channel's next upload from its recent view counts
- Crawl talent agency websites to extract talent rosters

Guidelines:
- Resolve channel identifiers to official channel IDs before calling tools that need one
- Use tools to gather real data; never invent numbers or channel facts
- When a search query is needed, use the short phrase a person would realistically type into YouTube
- Chain tools when a task needs multiple steps and carry results between them
- Present findings in clear, organized markdown and keep numeric results exact"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        // Store custom variables
        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            // Load scene prompts if file exists
            let scenes_path = custom_path.join("scenes.toml");
            if scenes_path.exists() {
                let content = std::fs::read_to_string(&scenes_path)?;
                prompts.scenes = toml::from_str(&content)?;
            }

            // Load sponsor prompts if file exists
            let sponsors_path = custom_path.join("sponsors.toml");
            if sponsors_path.exists() {
                let content = std::fs::read_to_string(&sponsors_path)?;
                prompts.sponsors = toml::from_str(&content)?;
            }

            // Load talent prompts if file exists
            let talents_path = custom_path.join("talents.toml");
            if talents_path.exists() {
                let content = std::fs::read_to_string(&talents_path)?;
                prompts.talents = toml::from_str(&content)?;
            }

            // Load agent prompts if file exists
            let agent_path = custom_path.join("agent.toml");
            if agent_path.exists() {
                let content = std::fs::read_to_string(&agent_path)?;
                prompts.agent = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        // Start with custom variables, then override with provided vars
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.scenes.system.is_empty());
        assert!(!prompts.sponsors.system.is_empty());
        assert!(!prompts.talents.system.is_empty());
        assert!(!prompts.agent.system.is_empty());
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = std::collections::HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_custom_variables_yield_to_call_site() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("tone".to_string(), "formal".to_string());
        prompts
            .variables
            .insert("name".to_string(), "config".to_string());

        let mut vars = std::collections::HashMap::new();
        vars.insert("name".to_string(), "call".to_string());

        let result = prompts.render_with_custom("{{tone}} {{name}}", &vars);
        assert_eq!(result, "formal call");
    }
}
