//! Core data types: the business facts going in and the plan coming out.

use serde::{Deserialize, Serialize};

/// Caller-supplied facts describing the business seeking a plan.
///
/// Values are forwarded verbatim into the prompt; no local validation is
/// performed beyond what the caller chooses to do before calling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInfo {
    pub name: String,
    pub industry: String,
    pub target_audience: String,
    pub goals: String,
}

impl BusinessInfo {
    pub fn new(
        name: impl Into<String>,
        industry: impl Into<String>,
        target_audience: impl Into<String>,
        goals: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            industry: industry.into(),
            target_audience: target_audience.into(),
            goals: goals.into(),
        }
    }
}

/// Recommendations for the business website.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteStrategy {
    pub platform_suggestion: String,
    pub key_features: Vec<String>,
    pub design_concept: String,
}

/// Plan for a single social media platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaPlatformPlan {
    pub platform: String,
    pub strategy: String,
    pub content_ideas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMarketing {
    pub blog_ideas: Vec<String>,
    pub video_ideas: Vec<String>,
}

/// The structured, multi-section plan returned by a successful generation.
///
/// No field carries a serde default: a missing or mistyped field fails
/// deserialization instead of producing a partially populated plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlinePresencePlan {
    pub branding_voice: String,
    pub website_strategy: WebsiteStrategy,
    pub social_media_plan: Vec<SocialMediaPlatformPlan>,
    pub content_marketing: ContentMarketing,
    pub seo_keywords: Vec<String>,
}
