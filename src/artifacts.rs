//! Generated artifact types — the brand identity and marketing copy produced
//! by the gateway calls.
//!
//! These derive `JsonSchema` so the gateway can constrain the provider's
//! structured responses to exactly this shape (see [`crate::schema`]). Field
//! names on the wire are camelCase to match the provider payloads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Brand identity artifact.
///
/// The branding call populates the four text fields; `logo_url`/`banner_url`
/// are merged in later by the visuals call. A kit without image URLs is a
/// valid intermediate state, not an error. The image fields are excluded from
/// the response schema (`schemars(skip)`) — the provider never fills them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BrandKit {
    pub tagline: String,
    pub mission_statement: String,
    /// Ordered palette of hex color strings.
    pub colors: Vec<String>,
    /// Short art-direction description fed back into image prompts.
    pub visual_style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(skip)]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(skip)]
    pub banner_url: Option<String>,
}

impl BrandKit {
    /// Whether both visual assets have been merged in.
    pub fn has_visuals(&self) -> bool {
        self.logo_url.is_some() && self.banner_url.is_some()
    }
}

/// Marketing copy artifact. Created atomically — no partial states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContentPackage {
    pub tweets: Vec<String>,
    pub tg_announcements: Vec<String>,
    pub web_copy: WebCopy,
}

/// Website hero copy plus roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebCopy {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub roadmap: Vec<RoadmapStage>,
}

/// One roadmap milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStage {
    pub stage: String,
    pub goals: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_kit_parses_without_image_fields() {
        let kit: BrandKit = serde_json::from_str(
            r##"{
                "tagline": "To the trenches",
                "missionStatement": "Memes for everyone",
                "colors": ["#00FF00", "#000000"],
                "visualStyle": "neon pixel art"
            }"##,
        )
        .unwrap();
        assert_eq!(kit.tagline, "To the trenches");
        assert_eq!(kit.colors.len(), 2);
        assert!(kit.logo_url.is_none());
        assert!(!kit.has_visuals());
    }

    #[test]
    fn brand_kit_serializes_camel_case() {
        let kit = BrandKit {
            tagline: "t".into(),
            mission_statement: "m".into(),
            colors: vec!["#FFFFFF".into()],
            visual_style: "v".into(),
            logo_url: Some("data:image/png;base64,AAAA".into()),
            banner_url: None,
        };
        let value = serde_json::to_value(&kit).unwrap();
        assert!(value.get("missionStatement").is_some());
        assert!(value.get("logoUrl").is_some());
        // None fields are omitted entirely
        assert!(value.get("bannerUrl").is_none());
    }

    #[test]
    fn content_package_roundtrip() {
        let pkg: ContentPackage = serde_json::from_str(
            r#"{
                "tweets": ["gm", "wagmi"],
                "tgAnnouncements": ["we are live"],
                "webCopy": {
                    "heroTitle": "TrenchCat",
                    "heroSubtitle": "The cat that digs",
                    "roadmap": [
                        {"stage": "Phase 1", "goals": ["launch", "meme"]}
                    ]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(pkg.tweets.len(), 2);
        assert_eq!(pkg.web_copy.roadmap[0].goals[0], "launch");
    }
}
