use std::fmt::Display;

/// A single filter in the graph, e.g. `eq=brightness=0.01:contrast=1.02`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterNode {
    name: String,
    args: Vec<(String, String)>,
}

impl FilterNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.args.push((key.into(), value.to_string()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arg_value(&self, key: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn render(&self) -> String {
        if self.args.is_empty() {
            return self.name.clone();
        }

        let args = self
            .args
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join(":");

        format!("{}={}", self.name, args)
    }
}

/// The ordered set of filters applied to the decoded stream before
/// re-encoding.
///
/// The graph is append-only: steps may push nodes but never remove or
/// reorder what an earlier step appended.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterGraph {
    nodes: Vec<FilterNode>,
}

impl FilterGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: FilterNode) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[FilterNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The graph as an ffmpeg `-vf` argument, or `None` when no filters were
    /// appended (rendering then runs without a filter chain at all).
    pub fn render_arg(&self) -> Option<String> {
        if self.nodes.is_empty() {
            return None;
        }

        let chain = self
            .nodes
            .iter()
            .map(FilterNode::render)
            .collect::<Vec<_>>()
            .join(",");

        Some(chain)
    }
}
