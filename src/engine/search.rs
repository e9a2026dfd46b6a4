use std::collections::HashSet;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::graph::GraphStore;

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

pub fn search_matches(graph: &GraphStore, query: &str) -> Option<HashSet<usize>> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let matcher = SkimMatcherV2::default();
    let matches = graph
        .nodes()
        .iter()
        .enumerate()
        .filter_map(|(index, node)| {
            fuzzy_match_score(&matcher, &node.data.title, query).map(|_| index)
        })
        .collect();
    Some(matches)
}

#[derive(Default)]
pub struct SearchCache {
    query: String,
    revision: u64,
    matches: Option<HashSet<usize>>,
}

impl SearchCache {
    pub fn matches(&mut self, graph: &GraphStore, revision: u64, query: &str) -> Option<&HashSet<usize>> {
        if self.revision != revision || self.query != query {
            self.matches = search_matches(graph, query);
            self.query = query.to_owned();
            self.revision = revision;
        }
        self.matches.as_ref()
    }
}
