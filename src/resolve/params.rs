//! Parameter pipeline: literals, placeholders and fallbacks

use log::trace;

use super::engine::{Engine, Repeat, Site};
use super::placeholder::Placeholder;
use crate::error::ResolveError;
use crate::i18n::missing_translation;
use crate::tree::Handling;
use crate::ui::{Common, Marker, MarkerCategory, MarkerType};
use crate::value::{FromValue, Value, ValueShape};

impl Engine<'_> {
    /// Placeholders are only recognized in dynamic runs
    pub(super) fn placeholder<'r>(&self, raw: &'r str) -> Option<Placeholder<'r>> {
        match self.handling {
            Handling::Static => None,
            Handling::Dynamic => Placeholder::parse(raw),
        }
    }

    /// Resolve parameter `key` of the element.
    ///
    /// An absent parameter yields `fallback` without any lookup. A placeholder
    /// that does not resolve, or resolves to the wrong shape, also yields
    /// `fallback` when one is given.
    pub(super) fn param<T: FromValue>(
        &self,
        site: &Site<'_>,
        key: &str,
        fallback: Option<T>,
    ) -> Result<T, ResolveError> {
        let Some(raw) = site.node.parameters.get(key) else {
            return fallback.ok_or_else(|| ResolveError::missing(self.position(site), key, None));
        };
        trace!(
            "[{}]: [{}] parameter [{}] = {:?}",
            self.run_id,
            site.node.label(),
            key,
            raw
        );
        match raw {
            Value::Text(text) => self.literal(site, key, text, fallback),
            other => T::from_value(other).ok_or_else(|| {
                ResolveError::mismatch(self.position(site), key, T::SHAPE, other.describe())
            }),
        }
    }

    pub(super) fn required<T: FromValue>(&self, site: &Site<'_>, key: &str) -> Result<T, ResolveError> {
        self.param(site, key, None)
    }

    pub(super) fn param_or<T: FromValue>(
        &self,
        site: &Site<'_>,
        key: &str,
        fallback: T,
    ) -> Result<T, ResolveError> {
        self.param(site, key, Some(fallback))
    }

    /// Resolve one string that is either a literal or a placeholder
    pub(super) fn literal<T: FromValue>(
        &self,
        site: &Site<'_>,
        param: &str,
        raw: &str,
        fallback: Option<T>,
    ) -> Result<T, ResolveError> {
        let Some(placeholder) = self.placeholder(raw) else {
            return T::from_literal(raw)
                .ok_or_else(|| ResolveError::malformed(self.position(site), param, raw, T::SHAPE));
        };
        match (self.substitute::<T>(site, param, placeholder), fallback) {
            (Ok(value), _) => Ok(value),
            (Err(err), Some(fallback)) => {
                trace!("[{}]: {}, using fallback", self.run_id, err);
                Ok(fallback)
            }
            (Err(err), None) => Err(err),
        }
    }

    fn substitute<T: FromValue>(
        &self,
        site: &Site<'_>,
        param: &str,
        placeholder: Placeholder<'_>,
    ) -> Result<T, ResolveError> {
        trace!(
            "[{}]: [{}] resolve {} for [{}]",
            self.run_id,
            site.node.label(),
            placeholder,
            param
        );
        let unresolved = || {
            ResolveError::missing(self.position(site), param, Some(&placeholder.to_string()))
        };
        match placeholder {
            Placeholder::Value(key) => {
                let value = self.sources.value(key).ok_or_else(unresolved)?;
                T::from_value(value).ok_or_else(|| {
                    ResolveError::mismatch(self.position(site), param, T::SHAPE, value.describe())
                })
            }
            Placeholder::Text(key) => {
                if T::SHAPE != ValueShape::Text {
                    return Err(ResolveError::mismatch(
                        self.position(site),
                        param,
                        T::SHAPE,
                        "text",
                    ));
                }
                let text = self.translate(key);
                T::from_literal(&text).ok_or_else(|| {
                    ResolveError::malformed(self.position(site), param, &text, T::SHAPE)
                })
            }
            Placeholder::Class(key) => {
                let class = self.sources.class(key).unwrap_or_default();
                T::from_literal(class).ok_or_else(|| {
                    ResolveError::malformed(self.position(site), param, class, T::SHAPE)
                })
            }
            Placeholder::Function(key) => {
                let call = self.sources.function(key).ok_or_else(unresolved)?;
                T::from_function(call).ok_or_else(|| {
                    ResolveError::mismatch(self.position(site), param, T::SHAPE, "function")
                })
            }
        }
    }

    /// Look up a translation; a miss yields a visible marker text
    pub(super) fn translate(&self, key: &str) -> String {
        self.translations
            .translate(self.locale, key)
            .unwrap_or_else(|| {
                trace!(
                    "[{}]: no translation for [{}] in [{}]",
                    self.run_id,
                    key,
                    self.locale
                );
                missing_translation(key)
            })
    }

    /// The element's resolved id; never empty
    pub(super) fn id(&self, site: &Site<'_>) -> Result<String, ResolveError> {
        let declared = match &site.node.id {
            Some(raw) => self.literal(site, "id", raw, Some(String::new()))?,
            None => String::new(),
        };
        if declared.trim().is_empty() {
            return Ok(self.generate_id());
        }
        Ok(match site.repeat {
            Some(Repeat { index, count }) if count > 1 => format!("{}-{}", declared, index),
            _ => declared,
        })
    }

    /// Class tokens with placeholders substituted; blank results are dropped
    pub(super) fn classes(&self, site: &Site<'_>) -> Result<Vec<String>, ResolveError> {
        let mut classes = Vec::with_capacity(site.node.classes.len());
        for raw in &site.node.classes {
            let class: String = self.literal(site, "classes", raw, Some(String::new()))?;
            if !class.trim().is_empty() {
                classes.push(class);
            }
        }
        Ok(classes)
    }

    pub(super) fn common(&self, site: &Site<'_>) -> Result<Common, ResolveError> {
        Ok(Common {
            id: self.id(site)?,
            classes: self.classes(site)?,
            attributes: site.node.attributes.clone(),
        })
    }

    /// Markers of an input. Only the text form of placeholders applies to
    /// marker text.
    pub(super) fn markers(&self, site: &Site<'_>, owner_id: &str) -> Result<Vec<Marker>, ResolveError> {
        site.node
            .markers
            .iter()
            .enumerate()
            .map(|(index, marker)| {
                let category: MarkerCategory = marker.category.parse().map_err(|_| {
                    ResolveError::malformed(
                        self.position(site),
                        &format!("markers[{index}].category"),
                        &marker.category,
                        ValueShape::Text,
                    )
                })?;
                let kind: MarkerType = marker.kind.parse().map_err(|_| {
                    ResolveError::malformed(
                        self.position(site),
                        &format!("markers[{index}].type"),
                        &marker.kind,
                        ValueShape::Text,
                    )
                })?;
                let text = match self.placeholder(&marker.text) {
                    Some(Placeholder::Text(key)) => self.translate(key),
                    _ => marker.text.clone(),
                };
                Ok(Marker {
                    owner_id: owner_id.to_string(),
                    category,
                    kind,
                    text,
                })
            })
            .collect()
    }
}
