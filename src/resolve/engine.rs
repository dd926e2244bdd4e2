//! Engine state for one resolution run
//!
//! An [`Engine`] walks a tree depth-first, threads depth and visit ordinals
//! for diagnostics, applies gating, dispatches each element to its builder and
//! isolates node-local failures. Linked trees get a nested engine with its own
//! run id that shares everything else.

use std::rc::Rc;
use std::time::Instant;

use log::{debug, error};

use super::kinds::{Context, Directive, Kind};
use super::Resolution;
use crate::config::ResolveConfig;
use crate::error::{Position, ResolveError};
use crate::i18n::{Locale, TranslationSource};
use crate::token::{FunctionCall, TokenSource};
use crate::tree::{ElementNode, Handling, TreeLoader};
use crate::ui::{Failure, ResolvedNode};
use crate::value::{Record, Value, ValueShape};

const REPETITION_SOURCE: &str = "repetitionSource";
const ELEMENT_SOURCE: &str = "elementSource";
const LINK_PATH: &str = "path";
const LINK_SOURCE_KEY: &str = "sourceKey";

/// An element being resolved, with its place in the run
#[derive(Debug, Clone, Copy)]
pub(super) struct Site<'n> {
    pub node: &'n ElementNode,
    pub depth: usize,
    pub visit: usize,
    /// Set when the element is repeated over a list
    pub repeat: Option<Repeat>,
}

/// One copy of a repeated element
#[derive(Debug, Clone, Copy)]
pub(super) struct Repeat {
    pub index: usize,
    pub count: usize,
}

/// Token sources visible to a run: record scopes, innermost first, then the
/// registered sources by descending precedence
#[derive(Debug, Clone)]
pub(super) struct Sources<'a> {
    scopes: Vec<Rc<TokenSource>>,
    registered: Vec<&'a TokenSource>,
}

impl<'a> Sources<'a> {
    /// Order by descending precedence and seal every source. The sort is
    /// stable, so sources of equal precedence keep the caller's order.
    pub fn new(sources: &[&'a TokenSource]) -> Self {
        let mut registered = sources.to_vec();
        registered.sort_by(|a, b| b.precedence().cmp(&a.precedence()));
        for source in &registered {
            source.seal();
        }
        Self {
            scopes: Vec::new(),
            registered,
        }
    }

    fn iter(&self) -> impl Iterator<Item = &TokenSource> + '_ {
        self.scopes
            .iter()
            .rev()
            .map(|source| source.as_ref())
            .chain(self.registered.iter().map(|source| &**source))
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.iter().find_map(|source| source.get(key))
    }

    pub fn class(&self, key: &str) -> Option<&str> {
        self.iter().find_map(|source| source.get_class(key))
    }

    pub fn function(&self, key: &str) -> Option<&FunctionCall> {
        self.iter().find_map(|source| source.get_function(key))
    }

    /// Sources without an opinion on `id` abstain
    pub fn is_active(&self, id: &str) -> bool {
        self.iter().all(|source| source.is_active(id).unwrap_or(true))
    }

    pub fn push_scope(&mut self, source: TokenSource) {
        self.scopes.push(Rc::new(source));
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }
}

pub(super) struct Engine<'a> {
    pub(super) run_id: String,
    pub(super) handling: Handling,
    pub(super) locale: &'a Locale,
    pub(super) translations: &'a dyn TranslationSource,
    pub(super) sources: Sources<'a>,
    pub(super) loader: &'a dyn TreeLoader,
    pub(super) config: &'a ResolveConfig,
    /// Context the run's root is checked against
    context: Context,
    /// Linked tree paths from the outermost run down to this one
    links: Vec<String>,
    visits: usize,
    pub(super) functions: Vec<FunctionCall>,
}

fn new_run_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

/// Errors that escape the root of an outermost run: structural errors and
/// a root kind the root context does not allow
fn is_fatal_at_root(err: &ResolveError) -> bool {
    err.is_structural()
        || matches!(err, ResolveError::UnsupportedKind { position, .. } if position.depth == 0)
}

/// Render the cause chain of an error for the log
fn causes(err: &dyn std::error::Error) -> String {
    let mut out = String::new();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str("; caused by: ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

impl<'a> Engine<'a> {
    pub fn new(
        handling: Handling,
        locale: &'a Locale,
        translations: &'a dyn TranslationSource,
        sources: Sources<'a>,
        loader: &'a dyn TreeLoader,
        config: &'a ResolveConfig,
    ) -> Self {
        Self {
            run_id: new_run_id(),
            handling,
            locale,
            translations,
            sources,
            loader,
            config,
            context: Context::Root,
            links: Vec::new(),
            visits: 0,
            functions: Vec::new(),
        }
    }

    /// Resolve `root` and everything below it.
    ///
    /// The root of the outermost run has its own failure boundary. A linked
    /// tree's root does not: its errors reach the boundary of the directive.
    pub fn run(mut self, root: &ElementNode) -> Result<Resolution, ResolveError> {
        let started = Instant::now();
        debug!(
            "[{}]: resolve {} tree in locale [{}] with {} token sources",
            self.run_id,
            self.handling,
            self.locale,
            self.sources.registered.len()
        );

        let nodes = if self.links.is_empty() {
            self.guarded(root, 0, self.context, is_fatal_at_root)?
        } else {
            self.visit(root, 0, self.context)?
        };

        debug!(
            "[{}]: resolved {} elements in {:?}",
            self.run_id,
            self.visits,
            started.elapsed()
        );
        Ok(Resolution {
            run_id: self.run_id,
            nodes,
            functions: self.functions,
        })
    }

    pub(super) fn position(&self, site: &Site<'_>) -> Position {
        Position {
            run_id: self.run_id.clone(),
            id: site.node.label().to_string(),
            depth: site.depth,
            visit: site.visit,
        }
    }

    /// Fresh id for an element that declares none
    pub(super) fn generate_id(&self) -> String {
        format!("{}{}", self.config.id_prefix, uuid::Uuid::new_v4().simple())
    }

    fn visit(
        &mut self,
        node: &ElementNode,
        depth: usize,
        context: Context,
    ) -> Result<Vec<ResolvedNode>, ResolveError> {
        let site = self.enter(node, depth);

        if !self.is_active(&site)? {
            debug!("[{}]: skip inactive element [{}]", self.run_id, node.label());
            return Ok(vec![ResolvedNode::Empty]);
        }

        if let Some(Directive::LinkedTree) = Directive::from_name(&node.kind) {
            return self.link(&site, context);
        }

        let kind = self.kind(&site, context)?;
        self.expand(&site, kind)
    }

    /// Resolve a child inside a failure boundary.
    ///
    /// Node-local errors are logged and replaced by a failure node; structural
    /// errors keep propagating.
    pub(super) fn visit_child(
        &mut self,
        node: &ElementNode,
        depth: usize,
        context: Context,
    ) -> Result<Vec<ResolvedNode>, ResolveError> {
        self.guarded(node, depth, context, ResolveError::is_structural)
    }

    /// Visit `node`, replacing any error `fatal` lets through by a failure
    /// node. Functions registered by the failed subtree are dropped.
    fn guarded(
        &mut self,
        node: &ElementNode,
        depth: usize,
        context: Context,
        fatal: fn(&ResolveError) -> bool,
    ) -> Result<Vec<ResolvedNode>, ResolveError> {
        let visit = self.visits + 1;
        let registered = self.functions.len();
        match self.visit(node, depth, context) {
            Ok(nodes) => Ok(nodes),
            Err(err) if fatal(&err) => Err(err),
            Err(err) => {
                self.functions.truncate(registered);
                error!(
                    "[{}]: element [{}] at depth {} (visit {}) failed: {}{}",
                    self.run_id,
                    node.label(),
                    depth,
                    visit,
                    err,
                    causes(&err)
                );
                Ok(vec![ResolvedNode::Failure(Failure::new(
                    &self.run_id,
                    self.config.failure_classes.clone(),
                ))])
            }
        }
    }

    /// Resolve all children of `site` against `context`
    pub(super) fn children(
        &mut self,
        site: &Site<'_>,
        context: Context,
    ) -> Result<Vec<ResolvedNode>, ResolveError> {
        let mut nodes = Vec::with_capacity(site.node.children.len());
        for child in &site.node.children {
            nodes.extend(self.visit_child(child, site.depth + 1, context)?);
        }
        Ok(nodes)
    }

    /// Resolve the first child of `site` only
    pub(super) fn first_child(
        &mut self,
        site: &Site<'_>,
        context: Context,
    ) -> Result<Option<Box<ResolvedNode>>, ResolveError> {
        let Some(child) = site.node.children.first() else {
            return Ok(None);
        };
        let nodes = self.visit_child(child, site.depth + 1, context)?;
        Ok(nodes.into_iter().next().map(Box::new))
    }

    /// Active auxiliary children of `site` (options, tab pages, burger items).
    /// Every child must be of `kind`.
    pub(super) fn entries<'n>(
        &mut self,
        site: &Site<'n>,
        kind: &str,
    ) -> Result<Vec<Site<'n>>, ResolveError> {
        let mut entries = Vec::with_capacity(site.node.children.len());
        for child in &site.node.children {
            let entry = self.enter(child, site.depth + 1);
            if !child.kind.trim().eq_ignore_ascii_case(kind) {
                return Err(ResolveError::unsupported(
                    self.position(&entry),
                    &child.kind,
                    format!("is not allowed in [{}], expected [{}]", site.node.kind, kind),
                ));
            }
            if self.is_active(&entry)? {
                entries.push(entry);
            } else {
                debug!("[{}]: skip inactive entry [{}]", self.run_id, child.label());
            }
        }
        Ok(entries)
    }

    fn enter<'n>(&mut self, node: &'n ElementNode, depth: usize) -> Site<'n> {
        self.visits += 1;
        Site {
            node,
            depth,
            visit: self.visits,
            repeat: None,
        }
    }

    /// The `active` parameter must be true and no token source may mark the
    /// element's id inactive
    fn is_active(&self, site: &Site<'_>) -> Result<bool, ResolveError> {
        let flagged = self.param_or(site, "active", true)?;
        Ok(flagged
            && site
                .node
                .id
                .as_deref()
                .map_or(true, |id| self.sources.is_active(id)))
    }

    fn kind(&self, site: &Site<'_>, context: Context) -> Result<Kind, ResolveError> {
        context.lookup(&site.node.kind).ok_or_else(|| {
            let reason = if Kind::is_known(&site.node.kind) {
                format!("is not allowed in [{}]", context)
            } else {
                "is unknown".to_string()
            };
            ResolveError::unsupported(self.position(site), &site.node.kind, reason)
        })
    }

    /// Apply `repetitionSource` and `elementSource`, then build
    fn expand(&mut self, site: &Site<'_>, kind: Kind) -> Result<Vec<ResolvedNode>, ResolveError> {
        if let Some(records) = self.records(site, REPETITION_SOURCE)? {
            debug!(
                "[{}]: repeat [{}] over {} records",
                self.run_id,
                site.node.label(),
                records.len()
            );
            let mut nodes = Vec::with_capacity(records.len());
            let count = records.len();
            for (index, record) in records.iter().enumerate() {
                let copy = Site {
                    repeat: Some(Repeat { index, count }),
                    ..*site
                };
                nodes.push(self.scoped(record, |engine| engine.build(&copy, kind))?);
            }
            return Ok(nodes);
        }

        if let Some(record) = self.record(site, ELEMENT_SOURCE)? {
            return Ok(vec![self.scoped(&record, |engine| engine.build(site, kind))?]);
        }

        Ok(vec![self.build(site, kind)?])
    }

    fn build(&mut self, site: &Site<'_>, kind: Kind) -> Result<ResolvedNode, ResolveError> {
        debug!(
            "[{}]: map [{}] as [{}] at [{}:{}]",
            self.run_id,
            site.node.label(),
            kind,
            site.depth,
            site.visit
        );
        match kind {
            Kind::Container(kind) => self.container(site, kind),
            Kind::Input(kind) => self.input(site, kind),
        }
    }

    /// Run `f` with a token source built from `record` layered on top
    fn scoped<T>(
        &mut self,
        record: &Record,
        f: impl FnOnce(&mut Self) -> Result<T, ResolveError>,
    ) -> Result<T, ResolveError> {
        self.sources.push_scope(TokenSource::from_record(record, 0));
        let result = f(self);
        self.sources.pop_scope();
        result
    }

    /// Token source value named by the parameter `param`
    fn source_value(&self, site: &Site<'_>, param: &str) -> Result<Option<&Value>, ResolveError> {
        if !site.node.parameters.contains_key(param) {
            return Ok(None);
        }
        let key: String = self.required(site, param)?;
        self.sources
            .value(&key)
            .map(Some)
            .ok_or_else(|| ResolveError::missing(self.position(site), param, Some(&key)))
    }

    /// Records behind a list-valued source parameter
    fn records(&self, site: &Site<'_>, param: &str) -> Result<Option<Vec<Record>>, ResolveError> {
        let Some(value) = self.source_value(site, param)? else {
            return Ok(None);
        };
        let records = value.as_records().ok_or_else(|| {
            ResolveError::mismatch(self.position(site), param, ValueShape::List, value.describe())
        })?;
        Ok(Some(records.into_iter().cloned().collect()))
    }

    /// Record behind a single-record source parameter
    fn record(&self, site: &Site<'_>, param: &str) -> Result<Option<Record>, ResolveError> {
        match self.source_value(site, param)? {
            None => Ok(None),
            Some(Value::Record(record)) => Ok(Some(record.clone())),
            Some(other) => Err(ResolveError::mismatch(
                self.position(site),
                param,
                ValueShape::List,
                other.describe(),
            )),
        }
    }

    /// Resolve a linked tree in place of the directive
    fn link(&mut self, site: &Site<'_>, context: Context) -> Result<Vec<ResolvedNode>, ResolveError> {
        let path: String = self.required(site, LINK_PATH)?;

        let mut chain = self.links.clone();
        chain.push(path.clone());
        if self.links.contains(&path) {
            return Err(ResolveError::CyclicLink { chain });
        }
        if self.links.len() >= self.config.max_link_depth {
            return Err(ResolveError::LinkDepth {
                limit: self.config.max_link_depth,
                chain,
            });
        }

        let tree = self.loader.load(&path)?;
        let (declared, root) = tree.validate()?;
        let handling = match self.handling {
            Handling::Static => Handling::Static,
            Handling::Dynamic => declared,
        };

        let scopes = match self.records(site, LINK_SOURCE_KEY)? {
            Some(records) => records.into_iter().map(Some).collect(),
            None => vec![None],
        };

        let mut nodes = Vec::new();
        for record in scopes {
            let mut nested = self.nested(handling, context, chain.clone());
            if let Some(record) = &record {
                nested.sources.push_scope(TokenSource::from_record(record, 0));
            }
            debug!(
                "[{}]: resolve linked tree [{}] as run [{}]",
                self.run_id, path, nested.run_id
            );
            let resolution = nested.run(root)?;
            nodes.extend(resolution.nodes);
            self.functions.extend(resolution.functions);
        }
        Ok(nodes)
    }

    fn nested(&self, handling: Handling, context: Context, links: Vec<String>) -> Engine<'a> {
        Engine {
            run_id: new_run_id(),
            handling,
            locale: self.locale,
            translations: self.translations,
            sources: self.sources.clone(),
            loader: self.loader,
            config: self.config,
            context,
            links,
            visits: 0,
            functions: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::NoopTranslations;
    use crate::tree::NullLoader;

    #[test]
    fn test_sources_order_by_precedence() {
        let mut low = TokenSource::new(0);
        low.add("name", "Alice").unwrap();
        let mut high = TokenSource::new(5);
        high.add("name", "Bob").unwrap();

        let sources = Sources::new(&[&low, &high]);
        assert_eq!(sources.value("name"), Some(&Value::from("Bob")));
        assert!(low.is_sealed());
        assert!(high.is_sealed());
    }

    #[test]
    fn test_equal_precedence_keeps_caller_order() {
        let mut first = TokenSource::new(1);
        first.add("k", "first").unwrap();
        let mut second = TokenSource::new(1);
        second.add("k", "second").unwrap();

        let sources = Sources::new(&[&first, &second]);
        assert_eq!(sources.value("k"), Some(&Value::from("first")));
    }

    #[test]
    fn test_scopes_shadow_registered_sources() {
        let mut global = TokenSource::new(100);
        global.add("name", "global").unwrap();
        let mut sources = Sources::new(&[&global]);

        let mut record = Record::new();
        record.insert("name".to_string(), Value::from("outer"));
        sources.push_scope(TokenSource::from_record(&record, 0));
        record.insert("name".to_string(), Value::from("inner"));
        sources.push_scope(TokenSource::from_record(&record, 0));
        assert_eq!(sources.value("name"), Some(&Value::from("inner")));

        sources.pop_scope();
        assert_eq!(sources.value("name"), Some(&Value::from("outer")));
        sources.pop_scope();
        assert_eq!(sources.value("name"), Some(&Value::from("global")));
    }

    #[test]
    fn test_active_requires_every_opinion() {
        let mut yes = TokenSource::new(0);
        yes.set_active("banner", true).unwrap();
        let mut no = TokenSource::new(1);
        no.deactivate("banner").unwrap();
        let silent = TokenSource::new(2);

        assert!(Sources::new(&[&yes, &silent]).is_active("banner"));
        assert!(!Sources::new(&[&yes, &no, &silent]).is_active("banner"));
        assert!(Sources::new(&[&no]).is_active("footer"));
    }

    fn visit_root(
        handling: Handling,
        node: &ElementNode,
        sources: &[&TokenSource],
    ) -> Result<Vec<ResolvedNode>, ResolveError> {
        let locale = Locale::default();
        let config = ResolveConfig::default();
        let mut engine = Engine::new(
            handling,
            &locale,
            &NoopTranslations,
            Sources::new(sources),
            &NullLoader,
            &config,
        );
        engine.visit(node, 0, Context::Root)
    }

    #[test]
    fn test_missing_parameter_names_param_and_id() {
        let node = ElementNode::new("text").with_id("title");

        let err = visit_root(Handling::Static, &node, &[]).unwrap_err();
        match &err {
            ResolveError::MissingParameter {
                position, param, ..
            } => {
                assert_eq!(param, "text");
                assert_eq!(position.id, "title");
                assert_eq!(position.depth, 0);
                assert_eq!(position.visit, 1);
            }
            other => panic!("expected missing parameter, got {:?}", other),
        }
        let message = err.to_string();
        assert!(message.contains("[title]"));
        assert!(message.contains("[text]"));
    }

    #[test]
    fn test_unresolved_placeholder_is_named() {
        let node = ElementNode::new("text").with_id("t").with_param("text", "$$value$nope");
        let source = TokenSource::new(0);

        let err = visit_root(Handling::Dynamic, &node, &[&source]).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::MissingParameter { ref placeholder, .. } if placeholder.as_deref() == Some("$$value$nope")
        ));
    }

    #[test]
    fn test_list_for_text_is_a_mismatch() {
        let node = ElementNode::new("text").with_id("t").with_param("text", "$$value$items");
        let mut source = TokenSource::new(0);
        source
            .add("items", Value::List(vec![Value::from("a"), Value::from("b")]))
            .unwrap();

        let err = visit_root(Handling::Dynamic, &node, &[&source]).unwrap_err();
        assert!(matches!(err, ResolveError::TypeMismatch { ref param, .. } if param == "text"));
    }

    #[test]
    fn test_malformed_literal_is_reported() {
        let node = ElementNode::new("heading")
            .with_id("h")
            .with_param("text", "Title")
            .with_param("size", "big");

        let err = visit_root(Handling::Static, &node, &[]).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::MalformedLiteral { ref param, ref value, .. } if param == "size" && value == "big"
        ));
    }

    #[test]
    fn test_only_root_kind_violations_are_fatal_at_root() {
        let root = Position {
            run_id: "r".to_string(),
            id: "x".to_string(),
            depth: 0,
            visit: 1,
        };
        let entry = Position { depth: 1, visit: 2, ..root.clone() };

        assert!(is_fatal_at_root(&ResolveError::unsupported(root.clone(), "textfield", "is not allowed")));
        assert!(!is_fatal_at_root(&ResolveError::unsupported(entry, "text", "is not allowed")));
        assert!(!is_fatal_at_root(&ResolveError::missing(root, "text", None)));
        assert!(is_fatal_at_root(&ResolveError::CyclicLink { chain: vec!["a".to_string()] }));
    }

    #[test]
    fn test_run_id_is_short() {
        let id = new_run_id();
        assert_eq!(id.len(), 8);
        assert_ne!(id, new_run_id());
    }
}
