use crate::decorator::{MethodDecorator, ParameterDecorator};
use crate::registry::{ControllerMetadata, MethodMetadata};

/// A type whose methods are HTTP endpoints.
///
/// `register` plays the role of the class body: it names each method and
/// applies the decorators that describe it.
///
/// ```ignore
/// use emblem_core::prelude::*;
///
/// struct UserController;
///
/// impl Controller for UserController {
///     fn register(c: &mut ControllerBuilder<'_>) {
///         c.method("find")
///             .decorate(get())
///             .decorate(docs(json!({ "summary": "Find a user" })))
///             .param(0, path("id"))
///             .param(1, bearer_token());
///     }
/// }
///
/// let mut registry = MetadataRegistry::new();
/// registry.register::<UserController>();
/// ```
pub trait Controller: 'static {
    /// Display name of the controller. Defaults to the unqualified type name.
    fn name() -> &'static str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    fn register(controller: &mut ControllerBuilder<'_>);
}

/// Applies decorators to the methods of one controller table.
pub struct ControllerBuilder<'a> {
    table: &'a mut ControllerMetadata,
}

impl<'a> ControllerBuilder<'a> {
    pub(crate) fn new(table: &'a mut ControllerMetadata) -> Self {
        Self { table }
    }

    pub fn name(&self) -> &'static str {
        self.table.name()
    }

    /// Start decorating `name`. Calling it again for the same method keeps
    /// adding to the existing metadata.
    pub fn method(&mut self, name: &str) -> MethodBuilder<'_> {
        let controller = self.table.name();
        MethodBuilder {
            controller,
            method: self.table.method_mut(name),
        }
    }

    /// Read back what has been attached so far.
    pub fn metadata(&self) -> &ControllerMetadata {
        &*self.table
    }
}

/// Applies decorators to one method and its parameters.
pub struct MethodBuilder<'a> {
    controller: &'static str,
    method: &'a mut MethodMetadata,
}

impl<'a> MethodBuilder<'a> {
    pub fn decorate(self, decorator: impl Into<MethodDecorator>) -> Self {
        let decorator = decorator.into();
        tracing::trace!(
            controller = self.controller,
            method = self.method.name(),
            decorator = ?decorator,
            "Applying method decorator"
        );
        decorator.apply(self.method);
        self
    }

    /// Decorate the parameter at position `index`.
    pub fn param(self, index: usize, decorator: ParameterDecorator) -> Self {
        tracing::trace!(
            controller = self.controller,
            method = self.method.name(),
            index,
            source = ?decorator.requirement().source,
            "Applying parameter decorator"
        );
        decorator.apply(self.method, index);
        self
    }

    pub fn metadata(&self) -> &MethodMetadata {
        &*self.method
    }
}
