use crate::domain::recommendation::FinancialItem;

pub const SYSTEM_PROMPT: &str = "You are a helpful AI financial advisor.";

const EXPENSES_HEADER: &str = "User's Expenses:";
const RECOMMENDATION_CUE: &str = "Recommendation:";

#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub text: String,
    pub total_spending: f64,
    pub item_count: usize,
}

pub fn render_item_line(item: &FinancialItem) -> String {
    let mut line = format!("- {}: ${:.2}", item.name, item.price);
    if let Some(category) = item.category.as_deref().filter(|s| !s.is_empty()) {
        line.push_str(&format!(" (Category: {category})"));
    }
    if let Some(description) = item.description.as_deref().filter(|s| !s.is_empty()) {
        line.push_str(&format!(" - {description}"));
    }
    line
}

pub fn total_spending(items: &[FinancialItem]) -> f64 {
    items.iter().map(|item| item.price).sum()
}

fn context_block(total_spending: f64) -> String {
    [
        "You are an AI financial advisor. The user has provided a list of recent expenses.".to_string(),
        format!("Their total spending for these items is approximately ${total_spending:.2}."),
        "Based on the following list, provide a detailed financial recommendation with actionable steps.".to_string(),
        "Focus on identifying potential areas for saving, budgeting strategies, and general financial planning tips.".to_string(),
        "Keep the tone encouraging and helpful. The recommendation should be at least 3 paragraphs long.".to_string(),
    ]
    .join(" ")
}

/// Builds the user-turn prompt: instruction block, expense lines in input order, trailing cue.
pub fn render_prompt(items: &[FinancialItem]) -> Prompt {
    let total_spending = total_spending(items);
    let lines: Vec<String> = items.iter().map(render_item_line).collect();

    let text = format!(
        "{}\n\n{EXPENSES_HEADER}\n{}\n\n{RECOMMENDATION_CUE}",
        context_block(total_spending),
        lines.join("\n")
    );

    Prompt {
        text,
        total_spending,
        item_count: lines.len(),
    }
}
