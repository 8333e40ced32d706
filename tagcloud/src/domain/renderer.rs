// tagcloud/src/domain/renderer.rs
use std::fmt;

use htmlescape::encode_minimal;
use itertools::{Itertools, MinMaxResult};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::domain::cloud::{Format, Order, OrderBy, RenderConfig};
use crate::domain::hooks::{HookContext, HookPoint, Hooks};
use crate::domain::link::clean_url;
use crate::domain::natural::natural_cmp_ignore_case;
use crate::domain::tag::{TagId, TagRecord, NO_LINK};

/// One rendered cloud entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedTag {
    pub id: TagId,
    pub name: String,
    pub count: u64,
    pub size: f64,
    pub href: String,
    /// The full anchor element
    pub markup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", content = "content", rename_all = "lowercase")]
pub enum CloudOutput {
    Flat(String),
    List(String),
    Structured(Vec<RenderedTag>),
}

impl CloudOutput {
    /// Joined markup, `None` for the structured shape
    pub fn markup(&self) -> Option<&str> {
        match self {
            CloudOutput::Flat(s) | CloudOutput::List(s) => Some(s),
            CloudOutput::Structured(_) => None,
        }
    }

    pub fn entries(&self) -> Option<&[RenderedTag]> {
        match self {
            CloudOutput::Structured(entries) => Some(entries),
            _ => None,
        }
    }
}

impl fmt::Display for CloudOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloudOutput::Flat(s) | CloudOutput::List(s) => f.write_str(s),
            CloudOutput::Structured(entries) => {
                write!(f, "{}", entries.iter().map(|e| e.markup.as_str()).join("\n"))
            }
        }
    }
}

/// Turns tag records into a frequency-scaled cloud of nofollow links.
///
/// Stateless apart from the registered hooks; one instance can serve any
/// number of concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct TagCloudRenderer {
    hooks: Hooks,
}

impl TagCloudRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hooks(hooks: Hooks) -> Self {
        Self { hooks }
    }

    /// Render `tags`; `None` when there is nothing to render.
    pub fn render(&self, tags: &[TagRecord], config: &RenderConfig) -> Option<CloudOutput> {
        self.render_with_rng(tags, config, &mut rand::thread_rng())
    }

    /// Same as [`render`](Self::render) with a caller-supplied source for `Order::Random`.
    pub fn render_with_rng<R: Rng + ?Sized>(
        &self,
        tags: &[TagRecord],
        config: &RenderConfig,
        rng: &mut R,
    ) -> Option<CloudOutput> {
        self.render_retained(tags, config, rng)
            .map(|(output, _)| output)
    }

    /// Renders and also returns the records that made it into the output, in output order.
    #[instrument(skip_all, level = "debug", fields(tags = tags.len(), format = %config.format))]
    pub fn render_retained<R: Rng + ?Sized>(
        &self,
        tags: &[TagRecord],
        config: &RenderConfig,
        rng: &mut R,
    ) -> Option<(CloudOutput, Vec<TagRecord>)> {
        if tags.is_empty() {
            debug!("No tags to render");
            return None;
        }

        let count_label = config.resolve_count_label();

        // Second sort: input order is whatever the caller delivered.
        let mut selected: Vec<&TagRecord> = tags.iter().collect();
        match config.order_by {
            OrderBy::Name => selected.sort_by(|a, b| natural_cmp_ignore_case(&a.name, &b.name)),
            OrderBy::Count => selected.sort_by_key(|tag| tag.count),
        }

        match config.order {
            Order::Ascending => {}
            Order::Descending => selected.reverse(),
            Order::Random => selected.shuffle(rng),
        }

        if config.number > 0 {
            selected.truncate(config.number);
        }

        let (min_count, max_count) = match selected.iter().map(|tag| tag.count).minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(count) => (count, count),
            MinMaxResult::MinMax(min, max) => (min, max),
        };

        let spread = match max_count - min_count {
            0 => 1,
            spread => spread,
        };
        let mut font_spread = config.largest - config.smallest;
        if font_spread < 0.0 {
            trace!(
                "largest {} below smallest {}, using font spread 1",
                config.largest,
                config.smallest
            );
            font_spread = 1.0;
        }
        let font_step = font_spread / spread as f64;
        let rel = config.rel_value();

        let entries: Vec<RenderedTag> = selected
            .iter()
            .map(|tag| {
                let size = config.smallest + (tag.count - min_count) as f64 * font_step;
                let href = if !tag.has_link() {
                    NO_LINK.to_string()
                } else {
                    clean_url(&tag.link)
                };
                let markup = format!(
                    "<a href=\"{}\" rel=\"{}\" class=\"tag-link-{}\" title=\"{}\" style=\"font-size: {}{};\">{}</a>",
                    href,
                    rel,
                    encode_minimal(&tag.id.to_string()),
                    encode_minimal(&count_label.label(tag.count)),
                    format_size(size),
                    config.unit,
                    encode_minimal(&tag.name),
                );
                RenderedTag {
                    id: tag.id.clone(),
                    name: tag.name.clone(),
                    count: tag.count,
                    size,
                    href,
                    markup,
                }
            })
            .collect();

        debug!(
            "Rendered {} of {} tags, counts {}..{}",
            entries.len(),
            tags.len(),
            min_count,
            max_count
        );

        let output = match config.format {
            Format::Structured => CloudOutput::Structured(entries),
            Format::List => CloudOutput::List(format!(
                "<ul class=\"wp-tag-cloud\">\n\t<li>{}</li>\n</ul>\n",
                entries.iter().map(|e| e.markup.as_str()).join("</li>\n\t<li>")
            )),
            Format::Flat => CloudOutput::Flat(
                entries
                    .iter()
                    .map(|e| e.markup.as_str())
                    .join(&config.separator),
            ),
        };

        let retained: Vec<TagRecord> = selected.into_iter().cloned().collect();
        let ctx = HookContext {
            point: HookPoint::Generate,
            tags: &retained,
            config,
        };
        let output = self.hooks.apply(output, &ctx);
        Some((output, retained))
    }
}

/// Font size as printed in the style attribute, at most four decimals
pub fn format_size(size: f64) -> String {
    let rounded = (size * 10_000.0).round() / 10_000.0;
    format!("{}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::count_text::CountLabel;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> Vec<TagRecord> {
        vec![
            TagRecord::new(1, "alpha", 5, "http://x/a"),
            TagRecord::new(2, "beta", 1, "#"),
        ]
    }

    fn by_count() -> RenderConfig {
        RenderConfig::builder()
            .order_by(OrderBy::Count)
            .build()
            .unwrap()
    }

    fn structured(config: &RenderConfig, tags: &[TagRecord]) -> Vec<RenderedTag> {
        let mut config = config.clone();
        config.format = Format::Structured;
        match TagCloudRenderer::new().render(tags, &config) {
            Some(CloudOutput::Structured(entries)) => entries,
            other => panic!("expected structured output, got {:?}", other),
        }
    }

    #[test]
    fn given_two_tags_when_render_flat_by_count_then_smallest_first() {
        let out = TagCloudRenderer::new().render(&sample(), &by_count()).unwrap();
        let expected = concat!(
            "<a href=\"#\" rel=\"nofollow\" class=\"tag-link-2\" title=\"1 topic\" style=\"font-size: 8pt;\">beta</a>",
            "\n",
            "<a href=\"http://x/a\" rel=\"nofollow\" class=\"tag-link-1\" title=\"5 topics\" style=\"font-size: 22pt;\">alpha</a>",
        );
        assert_eq!(out, CloudOutput::Flat(expected.to_string()));
    }

    #[test]
    fn given_two_tags_when_render_list_then_wraps_each_in_item() {
        let mut config = by_count();
        config.format = Format::List;
        let out = TagCloudRenderer::new().render(&sample(), &config).unwrap();
        let markup = out.markup().unwrap();
        assert!(markup.starts_with("<ul class=\"wp-tag-cloud\">\n\t<li><a href=\"#\""));
        assert!(markup.contains("</a></li>\n\t<li><a href=\"http://x/a\""));
        assert!(markup.ends_with("</a></li>\n</ul>\n"));
        assert_eq!(markup.matches("<li>").count(), 2);
    }

    #[test]
    fn given_empty_input_when_render_then_returns_none_for_every_format() {
        for format in [Format::Flat, Format::List, Format::Structured] {
            let config = RenderConfig::builder().format(format).build().unwrap();
            assert!(TagCloudRenderer::new().render(&[], &config).is_none());
        }
    }

    #[test]
    fn given_equal_counts_when_render_then_all_sizes_are_smallest() {
        let tags = vec![
            TagRecord::new(1, "a", 3, "#"),
            TagRecord::new(2, "b", 3, "#"),
            TagRecord::new(3, "c", 3, "#"),
        ];
        let entries = structured(&RenderConfig::default(), &tags);
        assert!(entries.iter().all(|e| e.size == 8.0));
    }

    #[test]
    fn given_spread_counts_when_render_then_sizes_interpolate_linearly() {
        let tags = vec![
            TagRecord::new(1, "low", 2, "#"),
            TagRecord::new(2, "mid", 4, "#"),
            TagRecord::new(3, "high", 10, "#"),
        ];
        let config = RenderConfig::builder()
            .smallest(10)
            .largest(18)
            .order_by(OrderBy::Count)
            .build()
            .unwrap();
        let sizes: Vec<f64> = structured(&config, &tags).iter().map(|e| e.size).collect();
        assert_eq!(sizes, vec![10.0, 12.0, 18.0]);
    }

    #[test]
    fn given_largest_below_smallest_when_render_then_font_spread_is_one() {
        let tags = vec![TagRecord::new(1, "a", 0, "#"), TagRecord::new(2, "b", 4, "#")];
        let config = RenderConfig::builder()
            .smallest(20)
            .largest(10)
            .order_by(OrderBy::Count)
            .build()
            .unwrap();
        let sizes: Vec<f64> = structured(&config, &tags).iter().map(|e| e.size).collect();
        assert_eq!(sizes, vec![20.0, 21.0]);
    }

    #[test]
    fn given_number_when_render_then_truncates_after_ordering() {
        let tags: Vec<TagRecord> = (1..=10)
            .map(|i| TagRecord::new(i, format!("t{}", i), i as u64, "#"))
            .collect();
        let config = RenderConfig::builder()
            .number(3usize)
            .order_by(OrderBy::Count)
            .order(Order::Descending)
            .build()
            .unwrap();
        let entries = structured(&config, &tags);
        let counts: Vec<u64> = entries.iter().map(|e| e.count).collect();
        assert_eq!(counts, vec![10, 9, 8]);
        // scale is computed over the retained entries only
        assert_eq!(entries[0].size, 22.0);
        assert_eq!(entries[2].size, 8.0);
    }

    #[test]
    fn given_name_order_when_render_then_sorts_naturally_ignoring_case() {
        let tags = vec![
            TagRecord::new(1, "Tag10", 1, "#"),
            TagRecord::new(2, "tag2", 1, "#"),
            TagRecord::new(3, "Alpha", 1, "#"),
        ];
        let names: Vec<String> = structured(&RenderConfig::default(), &tags)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "tag2", "Tag10"]);
    }

    #[test]
    fn given_name_order_descending_when_render_then_reverses() {
        let tags = vec![
            TagRecord::new(1, "b", 1, "#"),
            TagRecord::new(2, "a", 1, "#"),
            TagRecord::new(3, "c", 1, "#"),
        ];
        let config = RenderConfig::builder().order(Order::Descending).build().unwrap();
        let names: Vec<String> = structured(&config, &tags)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }

    // The count sort is a stable ascending sort; equal counts keep input order.
    #[test]
    fn given_equal_counts_when_sort_by_count_then_input_order_is_kept() {
        let tags = vec![
            TagRecord::new(1, "first", 2, "#"),
            TagRecord::new(2, "big", 9, "#"),
            TagRecord::new(3, "second", 2, "#"),
            TagRecord::new(4, "third", 2, "#"),
        ];
        let names: Vec<String> = structured(&by_count(), &tags)
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["first", "second", "third", "big"]);
    }

    #[test]
    fn given_random_order_when_render_then_returns_permutation_of_input() {
        let tags: Vec<TagRecord> = (1..=20)
            .map(|i| TagRecord::new(i, format!("t{}", i), i as u64, "#"))
            .collect();
        let config = RenderConfig::builder()
            .order(Order::Random)
            .format(Format::Structured)
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let out = TagCloudRenderer::new()
            .render_with_rng(&tags, &config, &mut rng)
            .unwrap();
        let mut ids: Vec<TagId> = out.entries().unwrap().iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids.len(), 20);
        ids.sort_by_key(|id| id.to_string().parse::<i64>().unwrap());
        let expected: Vec<TagId> = (1..=20).map(TagId::Int).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn given_random_order_and_number_when_render_then_picks_from_full_set() {
        let tags: Vec<TagRecord> = (1..=50)
            .map(|i| TagRecord::new(i, format!("t{}", i), 1, "#"))
            .collect();
        let config = RenderConfig::builder()
            .order(Order::Random)
            .number(5usize)
            .format(Format::Structured)
            .build()
            .unwrap();
        let renderer = TagCloudRenderer::new();
        let mut rng = StdRng::seed_from_u64(42);
        let first_five = ["t1", "t2", "t3", "t4", "t5"];
        let mut seen_beyond_first_five = false;
        for _ in 0..10 {
            let out = renderer.render_with_rng(&tags, &config, &mut rng).unwrap();
            let entries = out.entries().unwrap();
            assert_eq!(entries.len(), 5);
            seen_beyond_first_five |= entries
                .iter()
                .any(|e| !first_five.contains(&e.name.as_str()));
        }
        assert!(seen_beyond_first_five);
    }

    #[test]
    fn given_rel_addendum_when_render_then_single_rel_attribute_is_extended() {
        let config = RenderConfig::builder().rel_addendum("tag").build().unwrap();
        let entries = structured(&config, &sample());
        assert!(entries
            .iter()
            .all(|e| e.markup.contains("rel=\"nofollow tag\"") && e.markup.matches("rel=").count() == 1));
    }

    #[test]
    fn given_markup_in_name_and_label_when_render_then_escapes() {
        let tags = vec![TagRecord::new("x\"y", "<b>R&D</b>", 2, "http://x/?a=1&b=2")];
        let config = RenderConfig::builder()
            .count_label(CountLabel::new(|c| format!("{} \"quoted\"", c)))
            .format(Format::Structured)
            .build()
            .unwrap();
        let entry = &structured(&config, &tags)[0];
        assert_eq!(entry.href, "http://x/?a=1&#038;b=2");
        assert!(entry.markup.contains(">&lt;b&gt;R&amp;D&lt;/b&gt;</a>"));
        assert!(entry.markup.contains("title=\"2 &quot;quoted&quot;\""));
        assert!(entry.markup.contains("class=\"tag-link-x&quot;y\""));
    }

    #[test]
    fn given_separator_when_render_flat_then_joins_with_it() {
        let config = RenderConfig::builder()
            .order_by(OrderBy::Count)
            .separator(" ")
            .build()
            .unwrap();
        let out = TagCloudRenderer::new().render(&sample(), &config).unwrap();
        let markup = out.markup().unwrap();
        assert!(!markup.contains('\n'));
        assert_eq!(markup.matches("</a> <a ").count(), 1);
    }

    #[test]
    fn given_unit_when_render_then_passed_verbatim() {
        let config = RenderConfig::builder()
            .unit("em")
            .smallest(0.5)
            .largest(1.5)
            .order_by(OrderBy::Count)
            .build()
            .unwrap();
        let out = TagCloudRenderer::new().render(&sample(), &config).unwrap();
        let markup = out.markup().unwrap();
        assert!(markup.contains("font-size: 0.5em;"));
        assert!(markup.contains("font-size: 1.5em;"));
    }

    #[test]
    fn given_generate_filter_when_render_then_output_is_post_processed() {
        let mut hooks = Hooks::new();
        hooks.add_filter(HookPoint::Generate, |out, ctx| match out {
            CloudOutput::Flat(s) => CloudOutput::Flat(format!("<!-- {} -->{}", ctx.tags.len(), s)),
            other => other,
        });
        let out = TagCloudRenderer::with_hooks(hooks)
            .render(&sample(), &RenderConfig::default())
            .unwrap();
        assert!(out.markup().unwrap().starts_with("<!-- 2 --><a "));
    }

    #[test]
    fn given_number_when_render_retained_then_records_follow_output_order() {
        let tags: Vec<TagRecord> = (1..=6)
            .map(|i| TagRecord::new(i, format!("t{}", i), i as u64, "#"))
            .collect();
        let config = RenderConfig::builder()
            .number(3usize)
            .order_by(OrderBy::Count)
            .order(Order::Descending)
            .format(Format::Structured)
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let (output, retained) = TagCloudRenderer::new()
            .render_retained(&tags, &config, &mut rng)
            .unwrap();

        let rendered: Vec<&str> = output.entries().unwrap().iter().map(|e| e.name.as_str()).collect();
        let kept: Vec<&str> = retained.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(kept, vec!["t6", "t5", "t4"]);
        assert_eq!(kept, rendered);
    }

    #[test]
    fn given_sizes_when_format_size_then_trims_to_four_decimals() {
        assert_eq!(format_size(8.0), "8");
        assert_eq!(format_size(12.5), "12.5");
        assert_eq!(format_size(8.0 + 14.0 / 3.0), "12.6667");
    }
}
