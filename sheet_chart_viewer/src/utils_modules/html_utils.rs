use crate::common::*;

#[doc = "Escapes text so user-provided strings can be dropped into HTML safely"]
pub fn escape_html(raw: &str) -> String {
    let mut escaped: String = String::with_capacity(raw.len());

    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

#[doc = r#"
    Replaces `{{KEY}}` placeholders in a template in a single left-to-right pass.

    Inserted values are never scanned again, so user text that happens to look
    like a placeholder stays literal. Unknown placeholders are left untouched.
"#]
pub fn fill_template(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut filled: String = String::with_capacity(template.len());
    let mut rest: &str = template;

    while let Some(open) = rest.find("{{") {
        filled.push_str(&rest[..open]);
        let after_open: &str = &rest[open + 2..];

        let Some(close) = after_open.find("}}") else {
            filled.push_str(&rest[open..]);
            return filled;
        };

        let key: &str = &after_open[..close];

        match replacements.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => {
                filled.push_str(value);
                rest = &after_open[close + 2..];
            }
            None => {
                filled.push_str("{{");
                rest = after_open;
            }
        }
    }

    filled.push_str(rest);
    filled
}

#[doc = "Helper function for creating common table rows"]
pub fn generate_rows<T, F>(data: &[T], row_formatter: F) -> String
where
    F: Fn(&T) -> String,
{
    data.iter().map(row_formatter).collect::<String>()
}
