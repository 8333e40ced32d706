// tagcloud/src/domain/repositories/query.rs
use std::cmp::Ordering;

use crate::domain::cloud::{Order, OrderBy};
use crate::domain::natural::natural_cmp_ignore_case;
use crate::domain::tag::{TagId, Term};

/// Selection of stored terms handed to a tag repository
#[derive(Debug, Clone, PartialEq)]
pub struct TagQuery {
    pub order_by: OrderBy,
    pub order: Order,
    /// Maximum number of terms, 0 for all
    pub number: usize,
    /// When non-empty only these ids are returned and `exclude` is ignored
    pub include: Vec<TagId>,
    pub exclude: Vec<TagId>,
    /// Drop terms nobody uses
    pub hide_empty: bool,
}

impl Default for TagQuery {
    fn default() -> Self {
        Self {
            order_by: OrderBy::Name,
            order: Order::Ascending,
            number: 0,
            include: Vec::new(),
            exclude: Vec::new(),
            hide_empty: true,
        }
    }
}

impl TagQuery {
    /// The most used terms first, as the cloud service asks for them
    pub fn top(number: usize) -> Self {
        Self {
            order_by: OrderBy::Count,
            order: Order::Descending,
            number,
            ..Self::default()
        }
    }

    pub fn with_include(mut self, ids: Vec<TagId>) -> Self {
        self.include = ids;
        self
    }

    pub fn with_exclude(mut self, ids: Vec<TagId>) -> Self {
        self.exclude = ids;
        self
    }

    pub fn matches(&self, term: &Term) -> bool {
        if self.hide_empty && term.count == 0 {
            return false;
        }
        if !self.include.is_empty() {
            return self.include.contains(&term.id);
        }
        !self.exclude.contains(&term.id)
    }

    /// Filter, order and cap `terms` in memory.
    ///
    /// `Order::Random` is treated as ascending here; shuffling is left to the
    /// renderer.
    pub fn apply(&self, terms: impl IntoIterator<Item = Term>) -> Vec<Term> {
        let mut selected: Vec<Term> = terms.into_iter().filter(|t| self.matches(t)).collect();

        selected.sort_by(|a, b| {
            let ord = match self.order_by {
                OrderBy::Name => natural_cmp_ignore_case(&a.name, &b.name),
                OrderBy::Count => a.count.cmp(&b.count),
            };
            match self.order {
                Order::Descending => ord.reverse(),
                _ => ord,
            }
            .then_with(|| tie_break(a, b))
        });

        if self.number > 0 {
            selected.truncate(self.number);
        }
        selected
    }
}

fn tie_break(a: &Term, b: &Term) -> Ordering {
    natural_cmp_ignore_case(&a.name, &b.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms() -> Vec<Term> {
        vec![
            Term::new(1, "rust", 12).unwrap(),
            Term::new(2, "go", 3).unwrap(),
            Term::new(3, "unused", 0).unwrap(),
            Term::new(4, "python", 7).unwrap(),
            Term::new(5, "java", 7).unwrap(),
        ]
    }

    fn names(terms: &[Term]) -> Vec<&str> {
        terms.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn given_top_query_when_apply_then_orders_by_count_descending() {
        let result = TagQuery::top(0).apply(terms());
        assert_eq!(names(&result), vec!["rust", "java", "python", "go"]);
    }

    #[test]
    fn given_number_when_apply_then_caps_result() {
        let result = TagQuery::top(2).apply(terms());
        assert_eq!(names(&result), vec!["rust", "java"]);
    }

    #[test]
    fn given_hide_empty_disabled_when_apply_then_keeps_unused() {
        let query = TagQuery {
            hide_empty: false,
            ..TagQuery::default()
        };
        let result = query.apply(terms());
        assert_eq!(names(&result), vec!["go", "java", "python", "rust", "unused"]);
    }

    #[test]
    fn given_include_and_exclude_when_apply_then_include_wins() {
        let query = TagQuery::default()
            .with_include(vec![TagId::Int(1), TagId::Int(2)])
            .with_exclude(vec![TagId::Int(1)]);
        let result = query.apply(terms());
        assert_eq!(names(&result), vec!["go", "rust"]);
    }

    #[test]
    fn given_exclude_when_apply_then_drops_ids() {
        let query = TagQuery::top(0).with_exclude(vec![TagId::Int(1), TagId::Int(5)]);
        let result = query.apply(terms());
        assert_eq!(names(&result), vec!["python", "go"]);
    }
}
