use crate::emit::Stmt;
use middlegen_interpreter::{DeclaredFunction, ImportTable};

/// The interface being decorated, plus everything a customizer added to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceModel {
    /// Name of the target interface, e.g. `Service`
    pub type_name: String,
    /// Name of the `func(T) T` type the factory returns
    pub middleware_name: String,
    /// Wrapper struct name with a `{}` placeholder for the type's initial
    pub struct_pattern: String,
    pub functions: Vec<DeclaredFunction>,
    /// Extra constructor inputs, each stored in a struct field
    pub input_parameters: Vec<MiddlewareParameter>,
    /// Receiver name used in generated methods
    pub struct_symbol: String,
    /// Field holding the wrapped instance
    pub service_symbol: String,
}

/// A customizer-contributed constructor parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiddlewareParameter {
    pub variable_name: String,
    /// Type name, optionally prefixed with `*`
    pub type_name: String,
    /// Import path of the type; empty for local or predeclared types
    pub type_path: String,
    pub field_name: String,
}

impl MiddlewareParameter {
    pub fn new(
        variable_name: impl Into<String>,
        type_name: impl Into<String>,
        type_path: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        Self {
            variable_name: variable_name.into(),
            type_name: type_name.into(),
            type_path: type_path.into(),
            field_name: field_name.into(),
        }
    }

    pub fn type_expr(&self, imports: &ImportTable) -> String {
        let name = self.type_name.trim_start_matches('*');
        let stars = &self.type_name[..self.type_name.len() - name.len()];
        format!("{}{}", stars, imports.qualify(&self.type_path, name))
    }
}

impl ServiceModel {
    pub fn new(
        type_name: impl Into<String>,
        middleware_name: impl Into<String>,
        functions: Vec<DeclaredFunction>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            middleware_name: middleware_name.into(),
            struct_pattern: "middleware{}".to_string(),
            functions,
            input_parameters: Vec::new(),
            struct_symbol: String::new(),
            service_symbol: String::new(),
        }
    }

    /// `tracer{}` over `Service` gives `tracerS`.
    pub fn struct_name(&self) -> String {
        let initial: String = self.type_name.chars().take(1).collect();
        self.struct_pattern.replacen("{}", &initial, 1)
    }

    /// The call handing a method on to the wrapped instance, returning its
    /// results unchanged.
    pub fn forward(&self, function: &DeclaredFunction) -> Stmt {
        let call = format!(
            "{}.{}.{}({})",
            self.struct_symbol,
            self.service_symbol,
            function.name,
            function.forward_args()
        );
        if function.results.is_empty() {
            Stmt::Line(call)
        } else {
            Stmt::Line(format!("return {}", call))
        }
    }
}
