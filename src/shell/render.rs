use std::io::{self, Write};

use serde_json::Value;

use super::cursor;
use crate::engine::{Payload, ResultPage};
use crate::highlight::Theme;

const INDENT: &str = "  ";

/// Prints result pages.
///
/// Items of a list page are printed as separate values. After each one but
/// the last, the cursor steps back onto its closing line and rewrites it with
/// a trailing comma, so the scrollback reads as one comma separated list.
/// The closing line of the last item stays pending until the next page is
/// requested.
pub struct PageRenderer {
    theme: Theme,
    pending_close: Option<String>,
}

impl PageRenderer {
    pub fn new(theme: Theme) -> Self {
        PageRenderer {
            theme,
            pending_close: None,
        }
    }

    pub fn render(&mut self, out: &mut dyn Write, page: Option<&ResultPage>) -> io::Result<()> {
        match page.and_then(ResultPage::payload) {
            Some(Payload::Items(items)) => {
                for (index, item) in items.iter().enumerate() {
                    let closing = self.print_value(out, item)?;
                    if index + 1 < items.len() {
                        cursor::move_up(out, 1)?;
                        writeln!(out, "{},", closing)?;
                    } else {
                        self.pending_close = Some(closing);
                    }
                }
            }
            Some(Payload::Single(value)) => {
                let closing = self.print_value(out, value)?;
                self.pending_close = Some(closing);
            }
            None => {}
        }
        Ok(())
    }

    /// Closing line of the last value printed that has not been joined yet.
    pub fn take_pending_close(&mut self) -> Option<String> {
        self.pending_close.take()
    }

    fn print_value(&self, out: &mut dyn Write, value: &Value) -> io::Result<String> {
        let text = format_value(value, &self.theme);
        writeln!(out, "{}", text)?;
        Ok(text.rsplit('\n').next().unwrap_or_default().to_string())
    }
}

/// Pretty-prints a value as JSON at any depth, colored by `theme`.
pub fn format_value(value: &Value, theme: &Theme) -> String {
    let mut buf = String::new();
    write_value(&mut buf, value, 0, theme);
    buf
}

fn write_value(buf: &mut String, value: &Value, depth: usize, theme: &Theme) {
    match value {
        Value::Null => buf.push_str(&theme.null("null")),
        Value::Bool(b) => buf.push_str(&theme.literal(&b.to_string())),
        Value::Number(n) => buf.push_str(&theme.literal(&n.to_string())),
        Value::String(s) => buf.push_str(&theme.string(&quote(s))),
        Value::Array(items) if items.is_empty() => buf.push_str("[]"),
        Value::Object(map) if map.is_empty() => buf.push_str("{}"),
        Value::Array(items) => {
            buf.push_str("[\n");
            for (index, item) in items.iter().enumerate() {
                push_indent(buf, depth + 1);
                write_value(buf, item, depth + 1, theme);
                push_separator(buf, index + 1 < items.len());
            }
            push_indent(buf, depth);
            buf.push(']');
        }
        Value::Object(map) => {
            buf.push_str("{\n");
            for (index, (key, item)) in map.iter().enumerate() {
                push_indent(buf, depth + 1);
                buf.push_str(&theme.key(&quote(key)));
                buf.push_str(": ");
                write_value(buf, item, depth + 1, theme);
                push_separator(buf, index + 1 < map.len());
            }
            push_indent(buf, depth);
            buf.push('}');
        }
    }
}

fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

fn push_indent(buf: &mut String, depth: usize) {
    for _ in 0..depth {
        buf.push_str(INDENT);
    }
}

fn push_separator(buf: &mut String, more: bool) {
    if more {
        buf.push(',');
    }
    buf.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::testing::{screen, strip_ansi};
    use serde_json::json;

    fn render(page: &ResultPage) -> (String, PageRenderer) {
        let mut renderer = PageRenderer::new(Theme::plain());
        let mut out = Vec::new();
        renderer.render(&mut out, Some(page)).unwrap();
        (String::from_utf8(out).unwrap(), renderer)
    }

    #[test]
    fn test_format_nested() {
        let text = format_value(&json!({"a": [1, {"b": null}], "c": {}}), &Theme::plain());
        assert_eq!(
            text,
            "{\n  \"a\": [\n    1,\n    {\n      \"b\": null\n    }\n  ],\n  \"c\": {}\n}"
        );
    }

    #[test]
    fn test_single_value_round_trips() {
        let value = json!({
            "name": "Ann \"the\" admin",
            "age": 31,
            "ratio": 0.5,
            "tags": ["a", "b"],
            "deep": {"deeper": {"deepest": [true, false, null]}}
        });
        let (output, _) = render(&ResultPage::single(value.clone()));

        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_colored_output_round_trips_once_stripped() {
        let theme = Theme::detect();
        let value = json!({"id": 7, "names": ["x", "y"], "ok": true});

        let stripped = strip_ansi(&format_value(&value, &theme));
        assert_eq!(serde_json::from_str::<Value>(&stripped).unwrap(), value);
    }

    #[test]
    fn test_items_joined_with_one_comma() {
        let page = ResultPage::items(vec![json!({"id": 1}), json!({"id": 2})], None);
        let (output, mut renderer) = render(&page);

        assert_eq!(output.matches("\x1b[1A").count(), 1);
        assert_eq!(
            screen(&output),
            vec!["{", "  \"id\": 1", "},", "{", "  \"id\": 2", "}"]
        );
        assert_eq!(renderer.take_pending_close().as_deref(), Some("}"));
    }

    #[test]
    fn test_joined_screen_is_a_json_list() {
        let items = vec![json!({"id": 1}), json!("two"), json!([3])];
        let (output, _) = render(&ResultPage::items(items.clone(), None));

        let listing = format!("[{}]", screen(&output).join("\n"));
        assert_eq!(serde_json::from_str::<Value>(&listing).unwrap(), Value::Array(items));
    }

    #[test]
    fn test_scalar_items_are_joined_too() {
        let (output, _) = render(&ResultPage::items(vec![json!(1), json!(2)], None));
        assert_eq!(screen(&output), vec!["1,", "2"]);
    }

    #[test]
    fn test_absent_page_renders_nothing() {
        let mut renderer = PageRenderer::new(Theme::plain());
        let mut out = Vec::new();

        renderer.render(&mut out, None).unwrap();
        renderer
            .render(&mut out, Some(&ResultPage::default()))
            .unwrap();

        assert!(out.is_empty());
        assert!(renderer.take_pending_close().is_none());
    }

    #[test]
    fn test_empty_items_leave_nothing_pending() {
        let (output, mut renderer) = render(&ResultPage::items(Vec::new(), Some(json!("k"))));
        assert!(output.is_empty());
        assert!(renderer.take_pending_close().is_none());
    }
}
