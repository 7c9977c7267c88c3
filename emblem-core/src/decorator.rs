use std::marker::PhantomData;

use crate::registry::MethodMetadata;
use crate::requirement::{EndpointRequirement, MethodRequirement, ParameterRequirement};

/// A decorator for a controller method.
///
/// Applying it forwards its requirement record to the method's metadata
/// table. Build one with the factories in [`crate::decorators`] or with the
/// `generate_*` functions in [`crate::registry`].
#[derive(Debug, Clone)]
pub enum MethodDecorator {
    /// Declares an HTTP verb for the method.
    Endpoint(EndpointRequirement),
    /// Validator, middleware, formatter or docs fragment.
    Method(MethodRequirement),
    /// Typing-only marker naming a declared error type. Applying it does
    /// nothing.
    Marker(&'static str),
}

impl MethodDecorator {
    pub fn apply(&self, target: &mut MethodMetadata) {
        match self {
            MethodDecorator::Endpoint(endpoint) => target.add_verb(endpoint.verb),
            MethodDecorator::Method(fragment) => target.add_requirement(fragment.clone()),
            MethodDecorator::Marker(_) => {}
        }
    }

    pub fn endpoint(&self) -> Option<&EndpointRequirement> {
        match self {
            MethodDecorator::Endpoint(endpoint) => Some(endpoint),
            _ => None,
        }
    }

    pub fn fragment(&self) -> Option<&MethodRequirement> {
        match self {
            MethodDecorator::Method(fragment) => Some(fragment),
            _ => None,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, MethodDecorator::Marker(_))
    }
}

/// A decorator for one handler parameter, identified by its position.
#[derive(Debug, Clone)]
pub struct ParameterDecorator {
    requirement: ParameterRequirement,
}

impl ParameterDecorator {
    pub fn new(requirement: ParameterRequirement) -> Self {
        Self { requirement }
    }

    /// The record this decorator forwards when applied.
    pub fn requirement(&self) -> &ParameterRequirement {
        &self.requirement
    }

    pub fn into_requirement(self) -> ParameterRequirement {
        self.requirement
    }

    pub fn apply(&self, target: &mut MethodMetadata, index: usize) {
        target.add_parameter(index, self.requirement.clone());
    }
}

/// Marker declaring that a method may return error type `E`.
///
/// It only exists for the type checker and for readers; converting it into a
/// [`MethodDecorator`] yields a [`MethodDecorator::Marker`] that leaves the
/// metadata untouched.
pub struct ErrorReturn<E> {
    _marker: PhantomData<fn() -> E>,
}

impl<E> ErrorReturn<E> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    pub fn type_name(&self) -> &'static str {
        std::any::type_name::<E>()
    }
}

impl<E> Default for ErrorReturn<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for ErrorReturn<E> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<E> Copy for ErrorReturn<E> {}

impl<E> std::fmt::Debug for ErrorReturn<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ErrorReturn").field(&self.type_name()).finish()
    }
}

impl<E> From<ErrorReturn<E>> for MethodDecorator {
    fn from(marker: ErrorReturn<E>) -> Self {
        MethodDecorator::Marker(marker.type_name())
    }
}
