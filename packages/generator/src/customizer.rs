use crate::emit::{Block, FuncSignature};
use crate::model::ServiceModel;
use middlegen_interpreter::DeclaredFunction;
use std::collections::BTreeMap;

/// A strategy shaping one kind of middleware.
///
/// The generator owns the structure of the output (wrapper struct, factory
/// function, method signatures); a customizer supplies the extra state and
/// the body of every method.
///
/// # Implementing a customizer
///
/// ```ignore
/// use middlegen_generator::{Block, Customizer, FuncSignature, ServiceModel};
///
/// struct Passthrough;
///
/// impl Customizer for Passthrough {
///     fn file_name_prefix(&self) -> &str { "passthrough" }
///     fn factory_suffix(&self) -> &str { "Passthrough" }
///     fn configure_model(&self, model: &mut ServiceModel) {
///         model.struct_pattern = "passthrough{}".to_string();
///     }
///     fn required_imports(&self) -> BTreeMap<String, String> { BTreeMap::new() }
///     fn generate_method_body(&self, _: &FuncSignature, model: &ServiceModel, method: &DeclaredFunction) -> Block {
///         let mut body = Block::new();
///         body.push(model.forward(method));
///         body
///     }
/// }
/// ```
pub trait Customizer: Send + Sync {
    /// Prefix of the generated file name, e.g. `tracer` in `tracer_service.go`.
    fn file_name_prefix(&self) -> &str;

    /// Appended to `New<Type>` to name the factory function.
    fn factory_suffix(&self) -> &str;

    /// Called once per generation, before any code is emitted. Sets the
    /// struct naming pattern and appends constructor parameters.
    fn configure_model(&self, model: &mut ServiceModel);

    /// Imports the generated file always carries, as alias -> path.
    fn required_imports(&self) -> BTreeMap<String, String>;

    /// Produces the body for `method`, whose empty signature has already been
    /// built as `signature`.
    fn generate_method_body(
        &self,
        signature: &FuncSignature,
        model: &ServiceModel,
        method: &DeclaredFunction,
    ) -> Block;
}
