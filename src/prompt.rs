//! Prompt construction for plan generation.

use crate::types::BusinessInfo;

/// Render the plan request prompt.
///
/// The template is fixed; only the four business fields vary, and they are
/// embedded verbatim. Identical input always yields byte-identical output.
pub fn build_prompt(info: &BusinessInfo) -> String {
    format!(
        "Act as an expert digital marketing strategist and business consultant.\n\
         Based on the following business details, generate a comprehensive and actionable online presence plan.\n\
         \n\
         Business Name: {name}\n\
         Industry: {industry}\n\
         Target Audience: {audience}\n\
         Business Goals: {goals}\n\
         \n\
         Please provide a plan that is creative, specific, and tailored to the provided details.\n\
         The plan should cover branding, website strategy, social media for at least 3 platforms, \
         content marketing ideas (blogs and videos), and SEO keywords.\n",
        name = info.name,
        industry = info.industry,
        audience = info.target_audience,
        goals = info.goals,
    )
}
