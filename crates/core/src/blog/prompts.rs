//! Agent backstories bundled at compile time.

/// Researcher - gathers and structures facts on the topic
pub const RESEARCHER: &str = include_str!("defaults/researcher.md");

/// Writer - turns research notes into a blog post
pub const WRITER: &str = include_str!("defaults/writer.md");

/// All backstories with their agent roles
pub fn all_defaults() -> Vec<(&'static str, &'static str)> {
    vec![("researcher", RESEARCHER), ("writer", WRITER)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_prompts_non_empty() {
        for (role, content) in all_defaults() {
            assert!(content.len() > 50, "Prompt '{}' seems too short", role);
        }
    }

    #[test]
    fn test_prompts_have_no_placeholders() {
        for (role, content) in all_defaults() {
            assert!(
                !content.contains('{') && !content.contains('}'),
                "Prompt '{}' must not contain braces",
                role
            );
        }
    }
}
