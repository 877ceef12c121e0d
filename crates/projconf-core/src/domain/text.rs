//! Whitespace normalization and the generator output sink.
//!
//! Generated manifests are diffed against earlier generations, so every
//! renderer funnels multi-line text through [`format_block`].

use crate::error::ProjconfResult;

/// Number of 4-space runs folded into tabs per line.
pub const DEFAULT_TAB_PASSES: usize = 5;

/// Normalize a block of text.
///
/// 1. Remove the longest leading whitespace shared by all non-blank lines.
///    Whitespace-only lines become empty.
/// 2. End with exactly one line terminator.
/// 3. Fold up to `tab_passes` runs of 4 spaces that follow the leading tabs
///    of each line into one tab each (`0` disables folding).
/// 4. Prefix every non-empty line with `indent`.
pub fn format_block(text: &str, indent: &str, tab_passes: usize) -> String {
    let dedented = dedent(text);
    let body = dedented.trim_end_matches('\n');

    let mut out = String::with_capacity(body.len() + 1);
    for line in body.split('\n') {
        let line = fold_tabs(line, tab_passes);
        if !line.is_empty() {
            out.push_str(indent);
            out.push_str(&line);
        }
        out.push('\n');
    }
    out
}

/// Remove common leading whitespace.
pub fn dedent(text: &str) -> String {
    let margin = common_margin(text);
    text.split('\n')
        .map(|line| {
            if is_blank(line) {
                ""
            } else {
                &line[margin.len()..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn common_margin(text: &str) -> &str {
    let mut margin: Option<&str> = None;
    for line in text.split('\n').filter(|l| !is_blank(l)) {
        let lead = &line[..line.len() - line.trim_start_matches([' ', '\t']).len()];
        margin = Some(match margin {
            None => lead,
            Some(current) => {
                let shared = current
                    .bytes()
                    .zip(lead.bytes())
                    .take_while(|(a, b)| a == b)
                    .count();
                &current[..shared]
            }
        });
    }
    margin.unwrap_or("")
}

fn is_blank(line: &str) -> bool {
    line.trim_matches([' ', '\t']).is_empty()
}

fn fold_tabs(line: &str, passes: usize) -> String {
    let mut line = line.to_string();
    for _ in 0..passes {
        let tabs = line.len() - line.trim_start_matches('\t').len();
        if !line[tabs..].starts_with("    ") {
            break;
        }
        line.replace_range(tabs..tabs + 4, "\t");
    }
    line
}

/// Output sink for generators.
///
/// Mirrors sequential `print` semantics: every call appends a chunk and
/// every line-oriented call ends with a line terminator.
#[derive(Debug, Default, Clone)]
pub struct Emitter {
    buffer: String,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` and a line terminator.
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.buffer.push_str(text.as_ref());
        self.buffer.push('\n');
        self
    }

    /// Append an empty line.
    pub fn blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Append `text` verbatim.
    pub fn raw(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.buffer.push_str(text.as_ref());
        self
    }

    /// Append a normalized block with no indent and no tab folding.
    ///
    /// A single line break right after the opening quote is skipped so that
    /// templates can start on their own source line.
    pub fn lines(&mut self, text: &str) -> &mut Self {
        self.indented(text, "", 0)
    }

    /// Append a normalized block with an indent and optional tab folding.
    pub fn indented(&mut self, text: &str, indent: &str, tab_passes: usize) -> &mut Self {
        let text = text.strip_prefix('\n').unwrap_or(text);
        self.buffer
            .push_str(&format_block(text, indent, tab_passes));
        self
    }

    /// Tab-indented XML (POM, solution files): `depth` tabs, 4-space runs folded.
    pub fn xml_tabs(&mut self, depth: usize, text: &str) -> &mut Self {
        self.indented(text, &"\t".repeat(depth), DEFAULT_TAB_PASSES)
    }

    /// Space-indented XML (csproj): two spaces per `depth`.
    pub fn xml_spaces(&mut self, depth: usize, text: &str) -> &mut Self {
        self.indented(text, &"  ".repeat(depth), 0)
    }

    /// Render a nested generator into a string without touching this sink.
    pub fn capture<F>(generator: F) -> ProjconfResult<String>
    where
        F: FnOnce(&mut Emitter) -> ProjconfResult<()>,
    {
        let mut nested = Emitter::new();
        generator(&mut nested)?;
        Ok(nested.finish())
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_common_margin() {
        let text = "    <a>\n        <b/>\n    </a>\n";
        assert_eq!(format_block(text, "", 0), "<a>\n    <b/>\n</a>\n");
    }

    #[test]
    fn blank_lines_do_not_limit_margin_and_stay_empty() {
        let text = "        one\n  \n        two";
        assert_eq!(format_block(text, "\t", 0), "\tone\n\n\ttwo\n");
    }

    #[test]
    fn mixed_margins_keep_only_shared_prefix() {
        let text = "\t  x\n\t y\n";
        assert_eq!(dedent(text), " x\ny\n");
    }

    #[test]
    fn ensures_exactly_one_trailing_newline() {
        assert_eq!(format_block("a", "", 0), "a\n");
        assert_eq!(format_block("a\n", "", 0), "a\n");
        assert_eq!(format_block("a\n\n\n", "", 0), "a\n");
        assert_eq!(format_block("", "", 0), "\n");
    }

    #[test]
    fn folds_nested_runs_into_tabs() {
        let text = "<a>\n    <b>\n        <c/>\n    </b>\n</a>";
        assert_eq!(
            format_block(text, "\t", DEFAULT_TAB_PASSES),
            "\t<a>\n\t\t<b>\n\t\t\t<c/>\n\t\t</b>\n\t</a>\n"
        );
    }

    #[test]
    fn never_folds_partial_runs() {
        let text = "x\n   three\n       seven";
        assert_eq!(
            format_block(text, "", DEFAULT_TAB_PASSES),
            "x\n   three\n\t   seven\n"
        );
    }

    #[test]
    fn folding_stops_at_pass_bound() {
        let deep = format!("x\n{}y", " ".repeat(4 * 7));
        let out = format_block(&deep, "", DEFAULT_TAB_PASSES);
        assert_eq!(out, format!("x\n\t\t\t\t\t{}y\n", " ".repeat(8)));

        let out = format_block(&deep, "", 2);
        assert_eq!(out, format!("x\n\t\t{}y\n", " ".repeat(20)));
    }

    #[test]
    fn folding_skips_text_after_first_non_space() {
        assert_eq!(format_block("a    b", "", 5), "a    b\n");
    }

    #[test]
    fn idempotent_on_own_output() {
        let samples = [
            ("    <dependency>\n        <scope>test</scope>\n    </dependency>\n", "\t\t", 5),
            ("Copyright 2020\n\nDistributed under MIT.\n", "", 0),
            ("  a\n    b\n", "  ", 0),
        ];
        for (text, indent, passes) in samples {
            let once = format_block(text, indent, passes);
            let twice = format_block(&once, indent, passes);
            assert_eq!(once, twice, "not idempotent for {text:?}");
        }
    }

    #[test]
    fn emitter_skips_leading_line_break_of_templates() {
        let mut out = Emitter::new();
        out.lines(
            "
            ## Status

            Stable.
            ",
        );
        assert_eq!(out.as_str(), "## Status\n\nStable.\n");
    }

    #[test]
    fn emitter_line_and_blank_follow_print_semantics() {
        let mut out = Emitter::new();
        out.line("# demo").blank().raw("tail");
        assert_eq!(out.finish(), "# demo\n\ntail");
    }

    #[test]
    fn capture_returns_nested_output_only() {
        let mut outer = Emitter::new();
        outer.line("outer");
        let captured = Emitter::capture(|o| {
            o.line("inner");
            Ok(())
        })
        .unwrap();
        assert_eq!(captured, "inner\n");
        assert_eq!(outer.as_str(), "outer\n");
    }
}
