//! Resolution of element trees into resolved UI trees
//!
//! A [`Resolver`] owns the long-lived collaborators of resolution (the loader
//! for linked trees and the [`ResolveConfig`]). Every call to
//! [`Resolver::resolve_static`] or [`Resolver::resolve_dynamic`] builds a fresh
//! engine with its own run id and visit counter, so one resolver can serve
//! concurrent calls sharing the same sealed token sources.

mod containers;
mod engine;
mod inputs;
pub mod kinds;
mod params;
pub mod placeholder;

use serde::Serialize;

use crate::config::ResolveConfig;
use crate::error::ResolveError;
use crate::i18n::{Locale, NoopTranslations, TranslationSource};
use crate::token::{FunctionCall, TokenSource};
use crate::tree::{Handling, NullLoader, TreeLoader, TreeRoot};
use crate::ui::ResolvedNode;

use engine::{Engine, Sources};

pub use kinds::{ContainerKind, Context, InputKind, Kind};
pub use placeholder::Placeholder;

/// Output of one resolution run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Diagnostic id of the run, also carried by every failure node
    pub run_id: String,
    /// Resolved nodes in tree order. The root usually yields one node; a
    /// repeated root yields one per record.
    pub nodes: Vec<ResolvedNode>,
    /// Function references the renderer must register
    pub functions: Vec<FunctionCall>,
}

impl Resolution {
    /// First resolved node
    pub fn root(&self) -> Option<&ResolvedNode> {
        self.nodes.first()
    }
}

pub struct Resolver {
    loader: Box<dyn TreeLoader>,
    config: ResolveConfig,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver {
    /// Resolver without linked tree support and default configuration
    pub fn new() -> Self {
        Self {
            loader: Box::new(NullLoader),
            config: ResolveConfig::default(),
        }
    }

    pub fn with_loader(mut self, loader: impl TreeLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    pub fn with_config(mut self, config: ResolveConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    /// Resolve without placeholder substitution. Sentinel strings stay
    /// literal text; the default locale and no translations are used.
    pub fn resolve_static(&self, tree: &TreeRoot) -> Result<Resolution, ResolveError> {
        let (_, root) = tree.validate()?;
        let engine = Engine::new(
            Handling::Static,
            &self.config.default_locale,
            &NoopTranslations,
            Sources::new(&[]),
            self.loader.as_ref(),
            &self.config,
        );
        engine.run(root)
    }

    /// Resolve with full placeholder substitution.
    ///
    /// Every source is sealed before the first lookup. A tree declared
    /// `dynamic` needs at least one token source; a tree declared `static`
    /// keeps its sentinel strings literal.
    pub fn resolve_dynamic(
        &self,
        tree: &TreeRoot,
        locale: &Locale,
        translations: &dyn TranslationSource,
        sources: &[&TokenSource],
    ) -> Result<Resolution, ResolveError> {
        let (handling, root) = tree.validate()?;
        if handling == Handling::Dynamic && sources.is_empty() {
            return Err(ResolveError::invalid(
                "dynamic tree needs at least one token source",
            ));
        }
        let engine = Engine::new(
            handling,
            locale,
            translations,
            Sources::new(sources),
            self.loader.as_ref(),
            &self.config,
        );
        engine.run(root)
    }
}
