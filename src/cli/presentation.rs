//! CLI presentation: text and json renderings of a generated plan.

use crate::error::PlannerError;
use crate::types::OnlinePresencePlan;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use owo_colors::OwoColorize;

pub fn format_plan_json(plan: &OnlinePresencePlan) -> Result<String, PlannerError> {
    serde_json::to_string_pretty(plan).map_err(|e| PlannerError::Output(e.to_string()))
}

pub fn format_plan_text(plan: &OnlinePresencePlan, color: bool) -> String {
    let mut output = String::new();

    push_heading(&mut output, "Branding Voice", color);
    output.push_str(&format!("  {}\n", plan.branding_voice));

    push_heading(&mut output, "Website Strategy", color);
    let website = &plan.website_strategy;
    output.push_str(&format!("  Platform: {}\n", website.platform_suggestion));
    output.push_str(&format!("  Design concept: {}\n", website.design_concept));
    output.push_str("  Key features:\n");
    push_bullets(&mut output, &website.key_features);

    push_heading(&mut output, "SEO Keywords", color);
    if plan.seo_keywords.is_empty() {
        output.push_str("  (none)\n");
    } else {
        output.push_str(&format!("  {}\n", plan.seo_keywords.join(", ")));
    }

    push_heading(&mut output, "Content Marketing", color);
    output.push_str("  Blog ideas:\n");
    push_bullets(&mut output, &plan.content_marketing.blog_ideas);
    output.push_str("  Video ideas:\n");
    push_bullets(&mut output, &plan.content_marketing.video_ideas);

    push_heading(&mut output, "Social Media Plan", color);
    if plan.social_media_plan.is_empty() {
        output.push_str("  (none)\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Platform", "Strategy", "Content Ideas"]);
        for entry in &plan.social_media_plan {
            let ideas = entry
                .content_ideas
                .iter()
                .map(|idea| format!("- {}", idea))
                .collect::<Vec<_>>()
                .join("\n");
            table.add_row(vec![entry.platform.as_str(), entry.strategy.as_str(), ideas.as_str()]);
        }
        output.push_str(&table.to_string());
        output.push('\n');
    }

    output
}

fn push_heading(output: &mut String, title: &str, color: bool) {
    if !output.is_empty() {
        output.push('\n');
    }
    if color {
        output.push_str(&format!("{}\n", title.bold().purple()));
    } else {
        output.push_str(&format!("{}\n", title));
    }
}

fn push_bullets(output: &mut String, items: &[String]) {
    if items.is_empty() {
        output.push_str("    (none)\n");
    }
    for item in items {
        output.push_str(&format!("    - {}\n", item));
    }
}
