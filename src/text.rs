//! Text normalization: rendered-text approximation for parsed elements and the Latin-1 cleanup step.

use scraper::ElementRef;

const BLOCK_TAGS: &[&str] = &[
    "p",
    "div",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "li",
    "ul",
    "ol",
    "blockquote",
    "section",
    "article",
    "pre",
    "tr",
    "table",
];
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Keep only characters representable in ISO-8859-1, dropping the rest.
///
/// Equivalent to encoding as Latin-1 with errors ignored and decoding back.
pub fn to_latin1_lossy(s: &str) -> String {
    s.chars().filter(|c| u32::from(*c) <= 0xFF).collect()
}

/// Approximate the text a browser renders for `element`.
///
/// Whitespace inside text runs collapses to a single space, `<br>` and block
/// elements break lines, and script/style content is skipped. Text inside
/// `<pre>` keeps its spaces and line breaks. Runs of blank lines collapse to one.
pub fn visible_text(element: ElementRef<'_>) -> String {
    let mut collector = Collector::default();
    collector.walk(element);
    tidy_lines(&collector.out)
}

#[derive(Default)]
struct Collector {
    out: String,
    pending_space: bool,
    pre_depth: usize,
}

impl Collector {
    fn walk(&mut self, element: ElementRef<'_>) {
        for child in element.children() {
            if let Some(el) = ElementRef::wrap(child) {
                let name = el.value().name();
                if SKIPPED_TAGS.contains(&name) {
                    continue;
                }
                if name == "br" {
                    self.line_break();
                    continue;
                }
                let block = BLOCK_TAGS.contains(&name);
                let pre = name == "pre";
                if block {
                    self.end_line();
                }
                if pre {
                    self.pre_depth += 1;
                }
                self.walk(el);
                if pre {
                    self.pre_depth -= 1;
                }
                if block {
                    self.end_line();
                }
            } else if let Some(text) = child.value().as_text() {
                self.push_text(text);
            }
        }
    }

    fn push_text(&mut self, s: &str) {
        if self.pre_depth > 0 {
            self.out.push_str(s);
            self.pending_space = false;
            return;
        }
        for c in s.chars() {
            if c.is_whitespace() {
                self.pending_space = true;
                continue;
            }
            if self.pending_space && !self.out.is_empty() && !self.out.ends_with('\n') {
                self.out.push(' ');
            }
            self.pending_space = false;
            self.out.push(c);
        }
    }

    fn line_break(&mut self) {
        self.out.push('\n');
        self.pending_space = false;
    }

    fn end_line(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
        self.pending_space = false;
    }
}

fn tidy_lines(raw: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    // Collapsed runs never start or end with a space, so only whitespace-only lines need care.
    for line in raw
        .lines()
        .map(|l| if l.trim().is_empty() { "" } else { l })
    {
        if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first_text(html: &str, sel: &str) -> String {
        let doc = Html::parse_fragment(html);
        let sel = Selector::parse(sel).unwrap();
        let el = doc.select(&sel).next().unwrap();
        visible_text(el)
    }

    #[test]
    fn latin1_drops_characters_above_u00ff() {
        assert_eq!(to_latin1_lossy("caf\u{e9} \u{201c}quoted\u{201d}"), "caf\u{e9} quoted");
        assert_eq!(to_latin1_lossy("smile \u{1f600}!"), "smile !");
    }

    #[test]
    fn latin1_keeps_ascii_and_upper_half() {
        let s = "plain ASCII \u{a0}\u{b0}\u{ff}";
        assert_eq!(to_latin1_lossy(s), s);
        assert_eq!(to_latin1_lossy(""), "");
    }

    #[test]
    fn collapses_whitespace_inside_runs() {
        let text = first_text("<div id='x'>  one \n\t two   <b>three</b>  </div>", "#x");
        assert_eq!(text, "one two three");
    }

    #[test]
    fn br_and_paragraphs_break_lines() {
        let text = first_text(
            "<div id='x'><p>First line<br>second line</p><p>Next para</p></div>",
            "#x",
        );
        assert_eq!(text, "First line\nsecond line\nNext para");
    }

    #[test]
    fn blank_line_runs_collapse_to_one() {
        let text = first_text("<div id='x'>a<br><br><br><br>b</div>", "#x");
        assert_eq!(text, "a\n\nb");
    }

    #[test]
    fn skips_script_and_style() {
        let text = first_text(
            "<div id='x'>keep<script>var dropped = 1;</script><style>.a{}</style> this</div>",
            "#x",
        );
        assert_eq!(text, "keep this");
    }

    #[test]
    fn pre_keeps_indentation_and_line_breaks() {
        let text = first_text(
            "<div id='x'><pre>  fn main() {\n      body\n  }</pre>after</div>",
            "#x",
        );
        assert_eq!(text, "  fn main() {\n      body\n  }\nafter");
    }

    #[test]
    fn whitespace_only_pre_lines_count_as_blank() {
        let text = first_text("<div id='x'><pre>a\n   \n \n\nb</pre></div>", "#x");
        assert_eq!(text, "a\n\nb");
    }

    #[test]
    fn empty_element_gives_empty_string() {
        assert_eq!(first_text("<p class='t'>   </p>", "p.t"), "");
        assert_eq!(first_text("<p class='t'></p>", "p.t"), "");
    }
}
