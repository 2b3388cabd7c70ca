//! Zipkin tracing middleware.
//!
//! Every method receiving a `context.Context` opens a span named after the
//! method and finishes it once the wrapped call returns.

use middlegen_generator::{
    Block, Customizer, FuncSignature, MiddlewareParameter, ServiceModel, Stmt,
};
use middlegen_interpreter::DeclaredFunction;
use std::collections::BTreeMap;

pub const ZIPKIN_PATH: &str = "github.com/openzipkin/zipkin-go";

#[derive(Debug, Default, Clone, Copy)]
pub struct TracerCustomizer;

impl TracerCustomizer {
    pub fn new() -> Self {
        Self
    }
}

/// A local name for the span that no parameter already uses.
fn span_symbol(method: &DeclaredFunction) -> String {
    let taken = |name: &str| method.params.iter().any(|p| p.name == name);
    if !taken("span") {
        return "span".to_string();
    }
    (1..)
        .map(|i| format!("span{}", i))
        .find(|candidate| !taken(candidate))
        .unwrap_or_default()
}

impl Customizer for TracerCustomizer {
    fn file_name_prefix(&self) -> &str {
        "tracer"
    }

    fn factory_suffix(&self) -> &str {
        "Tracer"
    }

    fn configure_model(&self, model: &mut ServiceModel) {
        model.struct_pattern = "tracer{}".to_string();
        model
            .input_parameters
            .push(MiddlewareParameter::new("tracer", "Tracer", ZIPKIN_PATH, "tr"));
    }

    fn required_imports(&self) -> BTreeMap<String, String> {
        BTreeMap::from([("zipkin".to_string(), ZIPKIN_PATH.to_string())])
    }

    fn generate_method_body(
        &self,
        _signature: &FuncSignature,
        model: &ServiceModel,
        method: &DeclaredFunction,
    ) -> Block {
        let mut body = Block::new();

        let context = method
            .params
            .iter()
            .find(|p| p.underlying().is_named("context", "Context"));

        if let Some(ctx) = context {
            let span = span_symbol(method);
            let mut finish = Block::new();
            finish.line(format!("{}.Finish()", span));

            body.line(format!(
                "{span}, {ctx} := {recv}.tr.StartSpanFromContext({ctx}, \"{name}\")",
                span = span,
                ctx = ctx.name,
                recv = model.struct_symbol,
                name = method.name,
            ))
            .blank()
            .push(Stmt::Nested {
                open: "defer func() {".to_string(),
                body: finish,
                close: "}()".to_string(),
            })
            .blank();
        }

        body.push(model.forward(method));
        body
    }
}
