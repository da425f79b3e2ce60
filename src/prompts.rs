//! Prompt builders for each gateway call.
//!
//! Prompt versioning: bump `PROMPT_VERSION` whenever prompt content changes.
//! The version is attached to gateway traces so a given artifact can be traced
//! back to the prompt that produced it.

use crate::artifacts::BrandKit;
use crate::project::ProjectDescriptor;

/// Prompt version. Bump on any prompt content change.
pub const PROMPT_VERSION: &str = "1.1.0";

/// Brand-strategy prompt: embeds every descriptor field and names the exact
/// structured fields the response schema enforces.
pub fn brand_strategy(project: &ProjectDescriptor) -> String {
    format!(
        "Based on the meme project details below, generate a comprehensive brand identity.\n\
         Project: {name} (${ticker})\n\
         Concept: {concept}\n\
         Target: {audience}\n\
         Chain: {chain}\n\n\
         Output in JSON format with exactly: tagline, missionStatement, \
         colors (hex array), visualStyle (short description for AI image gen).",
        name = project.name,
        ticker = project.ticker,
        concept = project.concept,
        audience = project.target_audience,
        chain = project.chain,
    )
}

/// Square mascot-logo prompt, steered by the generated visual style.
pub fn mascot_logo(project: &ProjectDescriptor, brand: &BrandKit) -> String {
    format!(
        "High quality mascot logo for {name}, reflecting trend concept: {concept}, style: {style}",
        name = project.name,
        concept = project.concept,
        style = brand.visual_style,
    )
}

/// Widescreen banner prompt.
pub fn web_banner(project: &ProjectDescriptor, brand: &BrandKit) -> String {
    format!(
        "Cinematic web banner for {name}, style: {style}",
        name = project.name,
        style = brand.visual_style,
    )
}

/// Marketing-content prompt: five posts, three announcement templates, hero
/// copy, four-stage roadmap.
pub fn marketing_content(project: &ProjectDescriptor, brand: &BrandKit) -> String {
    format!(
        "Generate viral marketing content for this meme project: {name} (${ticker}).\n\
         Mission: {mission}\n\
         Style: {style}\n\n\
         Provide:\n\
         1. 5 viral tweets/X posts with emojis and hashtags.\n\
         2. 3 Telegram announcement templates.\n\
         3. Website copy (Hero title, Hero subtitle).\n\
         4. A 4-stage roadmap.",
        name = project.name,
        ticker = project.ticker,
        mission = brand.mission_statement,
        style = brand.visual_style,
    )
}
