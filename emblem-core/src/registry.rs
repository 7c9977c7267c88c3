//! Metadata tables and the registration helpers every decorator goes through.
//!
//! The `generate_*` functions turn a requirement into a decorator value.
//! [`MetadataRegistry`] owns one [`ControllerMetadata`] table per controller
//! type; decorators are applied to it through
//! [`ControllerBuilder`](crate::controller::ControllerBuilder).

use std::any::TypeId;
use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::controller::{Controller, ControllerBuilder};
use crate::decorator::{MethodDecorator, ParameterDecorator};
use crate::handler::{NameTransform, ValueTransform};
use crate::requirement::{
    EndpointRequirement, MethodRequirement, ParameterRequirement, SecurityContribution,
};
use crate::source::{ParamLocation, SourcePath};
use crate::verb::HttpVerb;

/// Decorator attaching `verb` to a method.
pub fn generate_http_method_decorator(verb: HttpVerb) -> MethodDecorator {
    MethodDecorator::Endpoint(EndpointRequirement { verb })
}

/// Decorator attaching an arbitrary parameter requirement.
pub fn generate_parameter_decorator(requirement: ParameterRequirement) -> ParameterDecorator {
    ParameterDecorator::new(requirement)
}

/// Decorator reading a parameter from `path`.
///
/// For single-value sources the name transform, when given, is applied to
/// the last path segment right away, and also kept on the record.
pub fn generate_parameter_source_decorator(
    path: SourcePath,
    is_single_value: bool,
    is_required: bool,
    name_transform: Option<NameTransform>,
    value_transform: Option<ValueTransform>,
    security: Option<SecurityContribution>,
) -> ParameterDecorator {
    let source = match &name_transform {
        Some(transform) if is_single_value => path.map_name(|name| transform.apply(name)),
        _ => path,
    };
    ParameterDecorator::new(ParameterRequirement {
        source: Some(source),
        single_value: Some(is_single_value),
        required: Some(is_required),
        name_transform,
        value_transform,
        security,
    })
}

/// Decorator attaching a method-level fragment.
pub fn generate_method_decorator(fragment: MethodRequirement) -> MethodDecorator {
    MethodDecorator::Method(fragment)
}

// ── Metadata tables ─────────────────────────────────────────────────────────

/// Everything the decorators attached to one controller method.
#[derive(Debug, Clone)]
pub struct MethodMetadata {
    name: String,
    verbs: Vec<HttpVerb>,
    parameters: BTreeMap<usize, ParameterRequirement>,
    requirement: MethodRequirement,
}

impl MethodMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verbs: Vec::new(),
            parameters: BTreeMap::new(),
            requirement: MethodRequirement::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared verbs, deduplicated, in declaration order.
    pub fn verbs(&self) -> &[HttpVerb] {
        &self.verbs
    }

    /// Whether at least one verb decorator was applied.
    pub fn is_endpoint(&self) -> bool {
        !self.verbs.is_empty()
    }

    /// Parameters by position, in ascending order.
    pub fn parameters(&self) -> impl Iterator<Item = (usize, &ParameterRequirement)> {
        self.parameters.iter().map(|(index, req)| (*index, req))
    }

    pub fn parameter(&self, index: usize) -> Option<&ParameterRequirement> {
        self.parameters.get(&index)
    }

    pub fn requirement(&self) -> &MethodRequirement {
        &self.requirement
    }

    /// Whether nothing was attached.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty() && self.parameters.is_empty() && self.requirement.is_empty()
    }

    pub(crate) fn add_verb(&mut self, verb: HttpVerb) {
        if !self.verbs.contains(&verb) {
            self.verbs.push(verb);
        }
    }

    pub(crate) fn add_parameter(&mut self, index: usize, requirement: ParameterRequirement) {
        self.parameters
            .entry(index)
            .or_default()
            .merge(requirement);
    }

    pub(crate) fn add_requirement(&mut self, fragment: MethodRequirement) {
        self.requirement.merge(fragment);
    }

    /// Summary suitable for listings and logs.
    pub fn summary(&self) -> MethodSummary {
        MethodSummary {
            name: self.name.clone(),
            verbs: self.verbs.clone(),
            parameters: self
                .parameters
                .iter()
                .map(|(index, req)| ParameterSummary {
                    index: *index,
                    source: req.source.clone(),
                    location: req.source.as_ref().and_then(SourcePath::location),
                    required: req.is_required(),
                    single_value: req.is_single_value(),
                    security: req.security.as_ref().map(|s| s.name.clone()),
                })
                .collect(),
            middlewares: self
                .requirement
                .middlewares
                .as_ref()
                .map(|list| list.names().into_iter().map(str::to_string).collect())
                .unwrap_or_default(),
            validator: self
                .requirement
                .validator
                .as_ref()
                .map(|v| v.handler.name().to_string()),
            content_type: self
                .requirement
                .formatter
                .as_ref()
                .map(|f| f.content_type().to_string()),
            has_docs: self.requirement.docs.is_some(),
        }
    }
}

/// Serializable view of a [`MethodMetadata`], without the function values.
#[derive(Debug, Clone, Serialize)]
pub struct MethodSummary {
    pub name: String,
    pub verbs: Vec<HttpVerb>,
    pub parameters: Vec<ParameterSummary>,
    pub middlewares: Vec<String>,
    pub validator: Option<String>,
    pub content_type: Option<String>,
    pub has_docs: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterSummary {
    pub index: usize,
    pub source: Option<SourcePath>,
    pub location: Option<ParamLocation>,
    pub required: bool,
    pub single_value: bool,
    pub security: Option<String>,
}

/// The metadata table of one controller type.
#[derive(Debug, Clone)]
pub struct ControllerMetadata {
    type_id: TypeId,
    name: &'static str,
    methods: Vec<MethodMetadata>,
}

impl ControllerMetadata {
    pub(crate) fn new(type_id: TypeId, name: &'static str) -> Self {
        Self {
            type_id,
            name,
            methods: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Methods in the order they were first decorated.
    pub fn methods(&self) -> impl Iterator<Item = &MethodMetadata> {
        self.methods.iter()
    }

    /// Methods that declare at least one verb.
    pub fn endpoints(&self) -> impl Iterator<Item = &MethodMetadata> {
        self.methods.iter().filter(|m| m.is_endpoint())
    }

    pub fn method(&self, name: &str) -> Option<&MethodMetadata> {
        self.methods.iter().find(|m| m.name == name)
    }

    pub(crate) fn method_mut(&mut self, name: &str) -> &mut MethodMetadata {
        let idx = match self.methods.iter().position(|m| m.name == name) {
            Some(idx) => idx,
            None => {
                self.methods.push(MethodMetadata::new(name));
                self.methods.len() - 1
            }
        };
        &mut self.methods[idx]
    }
}

/// Per-controller metadata, keyed by controller type.
///
/// Controllers are listed in registration order.
#[derive(Debug, Default)]
pub struct MetadataRegistry {
    controllers: Vec<ControllerMetadata>,
    index: HashMap<TypeId, usize>,
    registered: HashSet<TypeId>,
}

impl MetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `C::register` against the table for `C`.
    ///
    /// Registering the same controller twice is a no-op. Decorators applied
    /// earlier through [`controller`](Self::controller) are kept and merged.
    pub fn register<C: Controller>(&mut self) -> &mut Self {
        if !self.registered.insert(TypeId::of::<C>()) {
            tracing::warn!(controller = C::name(), "Controller already registered, skipping");
            return self;
        }
        {
            let mut builder = self.controller::<C>();
            C::register(&mut builder);
        }
        if let Some(table) = self.get::<C>() {
            tracing::debug!(
                controller = table.name(),
                methods = table.methods.len(),
                endpoints = table.endpoints().count(),
                "Registered controller metadata"
            );
        }
        self
    }

    /// Builder over the table of `C`, created on first access.
    pub fn controller<C: Controller>(&mut self) -> ControllerBuilder<'_> {
        let type_id = TypeId::of::<C>();
        let idx = match self.index.get(&type_id) {
            Some(idx) => *idx,
            None => {
                self.controllers
                    .push(ControllerMetadata::new(type_id, C::name()));
                let idx = self.controllers.len() - 1;
                self.index.insert(type_id, idx);
                idx
            }
        };
        ControllerBuilder::new(&mut self.controllers[idx])
    }

    pub fn get<C: 'static>(&self) -> Option<&ControllerMetadata> {
        self.index
            .get(&TypeId::of::<C>())
            .map(|idx| &self.controllers[*idx])
    }

    pub fn contains<C: 'static>(&self) -> bool {
        self.index.contains_key(&TypeId::of::<C>())
    }

    pub fn controllers(&self) -> impl Iterator<Item = &ControllerMetadata> {
        self.controllers.iter()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}
