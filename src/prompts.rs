pub const LESSON_PLAN: &str = include_str!("../data/prompts/lesson_plan.txt");

/// Builds the instruction sent alongside the uploaded documents.
pub fn build_lesson_prompt(topic: &str, duration: &str) -> String {
    render(LESSON_PLAN, &[("topic", topic), ("duration", duration)])
}

/// Replace `{{key}}` placeholders in a template string.
///
/// Single pass: substituted values are copied verbatim and never scanned for
/// further placeholders. Unknown placeholders are left as-is.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            break;
        };

        result.push_str(&rest[..start]);
        let key = &after_open[..end];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => result.push_str(value),
            None => {
                result.push_str("{{");
                result.push_str(key);
                result.push_str("}}");
            }
        }
        rest = &after_open[end + 2..];
    }

    result.push_str(rest);
    result
}
