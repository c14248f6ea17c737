use super::keywords::{BASE_TOOL, TOOL_KEYWORDS};
use super::normalize::fold;

/// Accessories required by the instructions, in table order after the
/// appliance itself.
pub fn detect_tools<S: AsRef<str>>(instructions: &[S]) -> Vec<String> {
    let joined = instructions
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    let folded = fold(&joined);

    let mut tools = vec![BASE_TOOL.to_string()];
    for (tool, keywords) in TOOL_KEYWORDS {
        if keywords.iter().any(|keyword| folded.contains(keyword))
            && !tools.iter().any(|t| t == tool)
        {
            tools.push(tool.to_string());
        }
    }
    tools
}
