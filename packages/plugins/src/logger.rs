//! Call logging middleware built on the standard `log` package.

use middlegen_generator::{Block, Customizer, FuncSignature, MiddlewareParameter, ServiceModel};
use middlegen_interpreter::DeclaredFunction;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, Copy)]
pub struct LoggerCustomizer;

impl LoggerCustomizer {
    pub fn new() -> Self {
        Self
    }
}

impl Customizer for LoggerCustomizer {
    fn file_name_prefix(&self) -> &str {
        "logger"
    }

    fn factory_suffix(&self) -> &str {
        "Logger"
    }

    fn configure_model(&self, model: &mut ServiceModel) {
        model.struct_pattern = "logger{}".to_string();
        model
            .input_parameters
            .push(MiddlewareParameter::new("logger", "*Logger", "log", "l"));
    }

    fn required_imports(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("fmt".to_string(), "fmt".to_string()),
            ("log".to_string(), "log".to_string()),
        ])
    }

    fn generate_method_body(
        &self,
        _signature: &FuncSignature,
        model: &ServiceModel,
        method: &DeclaredFunction,
    ) -> Block {
        let placeholders: Vec<String> = method
            .params
            .iter()
            .map(|p| format!("{}=%s", p.name))
            .collect();

        let mut args = vec![format!("\"{}({})\"", method.name, placeholders.join(", "))];
        args.extend(method.params.iter().map(|p| p.ty.stringer(&p.name)));

        let mut body = Block::new();
        body.line(format!(
            "{}.l.Output(2, fmt.Sprintf({}))",
            model.struct_symbol,
            args.join(", ")
        ));
        body.push(model.forward(method));
        body
    }
}
