// tagcloud/src/domain/count_text.rs
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_THOUSANDS_SEP: &str = ",";

/// Tooltip text producer for a tag's usage count.
///
/// Cheap to clone; the callback is shared.
#[derive(Clone)]
pub struct CountLabel(Arc<dyn Fn(u64) -> String + Send + Sync>);

impl CountLabel {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(u64) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// "1 topic" / "N topics", N grouped with `thousands_sep`
    pub fn topics(thousands_sep: &str) -> Self {
        let sep = thousands_sep.to_string();
        Self::new(move |count| default_topic_count_text(count, &sep))
    }

    /// Builds the label once from a singular and a plural template.
    ///
    /// `%s` and `%d` in the chosen template are replaced by the formatted count.
    pub fn from_templates(single: &str, multiple: &str, thousands_sep: &str) -> Self {
        let single = single.to_string();
        let multiple = multiple.to_string();
        let sep = thousands_sep.to_string();
        Self::new(move |count| {
            let template = if count == 1 { &single } else { &multiple };
            fill_template(template, &format_number(count, &sep))
        })
    }

    pub fn label(&self, count: u64) -> String {
        (self.0)(count)
    }
}

impl fmt::Debug for CountLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CountLabel(..)")
    }
}

impl Default for CountLabel {
    fn default() -> Self {
        Self::topics(DEFAULT_THOUSANDS_SEP)
    }
}

pub fn default_topic_count_text(count: u64, thousands_sep: &str) -> String {
    let noun = if count == 1 { "topic" } else { "topics" };
    format!("{} {}", format_number(count, thousands_sep), noun)
}

/// Group digits in threes: `1234567` -> `"1,234,567"`
pub fn format_number(n: u64, thousands_sep: &str) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * thousands_sep.len());
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(thousands_sep);
        }
        out.push(c);
    }
    out
}

fn fill_template(template: &str, number: &str) -> String {
    template.replace("%s", number).replace("%d", number)
}
