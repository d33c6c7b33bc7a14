//! Structured directive rendering.

use super::inline::render_inline;
use super::text::{fence_for, render_text};
use crate::{Directive, DirectiveError};

/// Autodoc directive name and the kind label it renders with.
const AUTODOC: [(&str, &str); 7] = [
    ("automodule", "module"),
    ("autoclass", "class"),
    ("autofunction", "function"),
    ("automethod", "method"),
    ("autoexception", "exception"),
    ("autodata", "data"),
    ("autoattribute", "attribute"),
];

/// Render a directive to Markdown.
///
/// Unrecognized directives pass through as their original markup.
pub(crate) fn render_directive(
    directive: &Directive,
    preserve_references: bool,
) -> Result<String, DirectiveError> {
    let name = directive.name.to_ascii_lowercase();
    match name.as_str() {
        "code-block" | "code" | "sourcecode" => code_block(directive),
        "highlight" => Ok(String::new()),
        "math" => math(directive),
        "image" => image(directive),
        "figure" => figure(directive, preserve_references),
        "versionadded" | "versionchanged" | "deprecated" => {
            version_note(directive, &name, preserve_references)
        }
        "rubric" => {
            let text = directive
                .argument()
                .ok_or_else(|| DirectiveError::malformed(directive, "missing rubric text"))?;
            Ok(format!("**{}**", render_inline(text, preserve_references)))
        }
        other => match AUTODOC.iter().find(|(n, _)| *n == other) {
            Some((_, kind)) => autodoc(directive, kind, preserve_references),
            None => {
                tracing::debug!(directive = other, line = directive.line, "Passing directive through");
                Ok(directive.raw.clone())
            }
        },
    }
}

fn code_block(directive: &Directive) -> Result<String, DirectiveError> {
    if directive.content.iter().all(|l| l.trim().is_empty()) {
        return Err(DirectiveError::malformed(directive, "empty code block"));
    }
    let language = directive
        .argument()
        .and_then(|a| a.split_whitespace().next())
        .unwrap_or_default();
    let fence = fence_for(&directive.content);

    let mut out = String::new();
    if let Some(caption) = directive.option("caption").filter(|c| !c.is_empty()) {
        out.push_str(&format!("*{caption}*\n\n"));
    }
    out.push_str(&format!("{fence}{language}\n{}\n{fence}", directive.body()));
    Ok(out)
}

fn math(directive: &Directive) -> Result<String, DirectiveError> {
    let body = directive.body();
    let formula = if body.trim().is_empty() {
        directive.argument().unwrap_or_default()
    } else {
        body.as_str()
    };
    if formula.trim().is_empty() {
        return Err(DirectiveError::malformed(directive, "empty math block"));
    }
    Ok(format!("```math\n{formula}\n```"))
}

fn image(directive: &Directive) -> Result<String, DirectiveError> {
    let uri: String = directive
        .argument()
        .ok_or_else(|| DirectiveError::malformed(directive, "missing image URI"))?
        .split_whitespace()
        .collect();
    let alt = directive.option("alt").unwrap_or_default();
    let image = format!("![{alt}]({uri})");
    Ok(match directive.option("target").filter(|t| !t.is_empty()) {
        Some(target) => format!("[{image}]({target})"),
        None => image,
    })
}

/// Image followed by the first body paragraph as an italic caption and the
/// rest as a legend.
fn figure(directive: &Directive, preserve_references: bool) -> Result<String, DirectiveError> {
    let mut out = image(directive)?;

    let body = &directive.content;
    let start = body.iter().position(|l| !l.trim().is_empty()).unwrap_or(body.len());
    let end = body[start..]
        .iter()
        .position(|l| l.trim().is_empty())
        .map_or(body.len(), |pos| start + pos);

    let caption = body[start..end]
        .iter()
        .map(|l| l.trim())
        .collect::<Vec<_>>()
        .join(" ");
    if !caption.is_empty() {
        out.push_str(&format!("\n\n*{}*", render_inline(&caption, preserve_references)));
    }

    let legend = render_text(&body[end..].join("\n"), preserve_references);
    if !legend.is_empty() {
        out.push_str("\n\n");
        out.push_str(&legend);
    }
    Ok(out)
}

fn version_note(
    directive: &Directive,
    name: &str,
    preserve_references: bool,
) -> Result<String, DirectiveError> {
    let argument = directive
        .argument()
        .ok_or_else(|| DirectiveError::malformed(directive, "missing version"))?;
    let (version, inline_text) = argument
        .split_once(char::is_whitespace)
        .map_or((argument, ""), |(v, rest)| (v, rest.trim()));

    let lead = match name {
        "versionadded" => "New in version",
        "versionchanged" => "Changed in version",
        _ => "Deprecated since version",
    };

    let mut text = inline_text.to_owned();
    let body = directive.body();
    if !body.trim().is_empty() {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&body);
    }

    let text = render_text(&text, preserve_references);
    if text.is_empty() {
        Ok(format!("*{lead} {version}.*"))
    } else {
        Ok(format!("*{lead} {version}:* {text}"))
    }
}

fn autodoc(
    directive: &Directive,
    kind: &str,
    preserve_references: bool,
) -> Result<String, DirectiveError> {
    let target = directive
        .argument()
        .ok_or_else(|| DirectiveError::malformed(directive, "missing target"))?;

    let mut out = format!("**{kind}** `{target}`");
    let body = render_text(&directive.body(), preserve_references);
    if !body.is_empty() {
        out.push_str("\n\n");
        out.push_str(&body);
    }
    Ok(out)
}
