//! Terminal rendering of path cards

use colored::*;

use crate::path::{LearningPath, PathCollection};

/// Label of the submit control
pub fn submit_label(loading: bool) -> &'static str {
    if loading { "Generating..." } else { "Generate Roadmap" }
}

fn accent(text: &str) -> ColoredString {
    text.truecolor(249, 115, 22).bold()
}

/// Render one learning path as a heading followed by one card per step
pub fn render_path(path: &LearningPath) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}  {}\n",
        path.topic.to_uppercase().bold(),
        "Generated".dimmed()
    ));
    out.push_str(&format!("{}\n", "─".repeat(40).dimmed()));

    for (idx, step) in path.steps.iter().enumerate() {
        out.push_str(&format!(
            "  {}  {}\n",
            accent(&format!("Step {}", idx + 1)),
            step.duration.dimmed()
        ));
        out.push_str(&format!("  {}\n", step.title.bold()));
        out.push_str(&format!("  {}\n", step.description));
        if !step.resources.is_empty() {
            let tags: Vec<String> = step.resources.iter().map(|r| format!("[{}]", r)).collect();
            out.push_str(&format!("  {}\n", tags.join(" ").dimmed()));
        }
        out.push('\n');
    }

    out
}

/// Render the visible paths, or the matching empty-state message
pub fn render_collection(paths: &PathCollection) -> String {
    if let Some(message) = paths.empty_state() {
        return format!("{}\n", message.dimmed());
    }

    paths
        .visible_paths()
        .into_iter()
        .map(render_path)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::LearningStep;

    fn sample() -> LearningPath {
        LearningPath {
            topic: "Rust".to_string(),
            steps: vec![
                LearningStep {
                    title: "Install".to_string(),
                    description: "Set up the toolchain".to_string(),
                    duration: "1 day".to_string(),
                    resources: vec!["rustup".to_string(), "cargo".to_string()],
                },
                LearningStep {
                    title: "Ownership".to_string(),
                    description: "Understand borrowing".to_string(),
                    duration: "2 weeks".to_string(),
                    resources: vec![],
                },
            ],
        }
    }

    #[test]
    fn test_submit_label() {
        assert_eq!(submit_label(true), "Generating...");
        assert_eq!(submit_label(false), "Generate Roadmap");
    }

    #[test]
    fn test_render_path_numbers_steps() {
        colored::control::set_override(false);
        let text = render_path(&sample());

        assert!(text.starts_with("RUST  Generated"));
        assert!(text.contains("Step 1  1 day"));
        assert!(text.contains("Step 2  2 weeks"));
        assert!(text.contains("[rustup] [cargo]"));
        assert!(text.contains("Understand borrowing"));
    }

    #[test]
    fn test_render_collection_empty_states() {
        colored::control::set_override(false);
        let mut paths = PathCollection::new();
        assert_eq!(render_collection(&paths), "Start by generating a roadmap above.\n");

        paths.record_path(sample());
        paths.set_search_term("python");
        assert_eq!(render_collection(&paths), "No paths found matching your search.\n");

        paths.set_search_term("RUST");
        assert!(render_collection(&paths).contains("Ownership"));
    }
}
