//! Breadcrumb insertion under deep headings.

use crate::fence::code_mask;
use crate::heading::parse_heading;

/// Shallowest heading depth that receives a breadcrumb.
const MIN_BREADCRUMB_DEPTH: usize = 3;

/// Insert an italic `*A → B*` line after every heading deeper than level 2
/// that has ancestors.
///
/// Ancestors are the most recent headings of every shallower depth. A
/// heading already followed by its breadcrumb is left alone.
pub(crate) fn add_context_headers(markdown: &str) -> String {
    let lines: Vec<&str> = markdown.lines().collect();
    let code = code_mask(&lines);
    let mut stack: Vec<(usize, &str)> = Vec::new();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    for (idx, &line) in lines.iter().enumerate() {
        out.push(line.to_owned());
        if code[idx] {
            continue;
        }
        let Some(heading) = parse_heading(line) else {
            continue;
        };

        stack.retain(|(depth, _)| *depth < heading.depth);
        if heading.depth >= MIN_BREADCRUMB_DEPTH && !stack.is_empty() {
            let trail: Vec<&str> = stack.iter().map(|(_, text)| *text).collect();
            let breadcrumb = format!("*{}*", trail.join(" → "));
            if lines.get(idx + 1).copied() != Some(breadcrumb.as_str()) {
                out.push(breadcrumb);
            }
        }
        stack.push((heading.depth, heading.text));
    }

    let mut output = out.join("\n");
    if markdown.ends_with('\n') && !output.is_empty() {
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_breadcrumb_for_deep_heading() {
        let input = "# Guide\n\n## Install\n\n### Linux\n\nRun.\n";
        assert_eq!(
            add_context_headers(input),
            "# Guide\n\n## Install\n\n### Linux\n*Guide → Install*\n\nRun.\n"
        );
    }

    #[test]
    fn test_shallow_headings_untouched() {
        let input = "# A\n\n## B\n\ntext\n";
        assert_eq!(add_context_headers(input), input);
    }

    #[test]
    fn test_stack_pops_on_sibling() {
        let input = "# A\n## B\n### C\n## D\n### E\n";
        assert_eq!(
            add_context_headers(input),
            "# A\n## B\n### C\n*A → B*\n## D\n### E\n*A → D*\n"
        );
    }

    #[test]
    fn test_skipped_levels_use_available_ancestors() {
        let input = "## Top\n#### Deep\n";
        assert_eq!(add_context_headers(input), "## Top\n#### Deep\n*Top*\n");
    }

    #[test]
    fn test_deep_heading_without_ancestor() {
        let input = "### Alone\ntext\n";
        assert_eq!(add_context_headers(input), input);
    }

    #[test]
    fn test_existing_breadcrumb_not_duplicated() {
        let input = "# A\n## B\n### C\n*A → B*\n";
        assert_eq!(add_context_headers(input), input);
    }

    #[test]
    fn test_headings_in_code_ignored() {
        let input = "# A\n```\n## B\n### C\n```\n";
        assert_eq!(add_context_headers(input), input);
    }
}
