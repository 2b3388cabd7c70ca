use middlegen_generator::{
    CustomizerRegistry, DirectoryEmitter, GenerateError, GenerateRequest, Generator, LoadError,
    ManifestLoader, DEFAULT_MANIFEST,
};
use middlegen_plugins::register_builtin;
use serde_json::json;
use std::path::{Path, PathBuf};

fn demo_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/service")
}

fn registry() -> CustomizerRegistry {
    let registry = CustomizerRegistry::new();
    register_builtin(&registry).unwrap();
    registry
}

fn generate(customizer: &str) -> String {
    let registry = registry();
    let loader = ManifestLoader::new();
    Generator::new(&registry, &loader)
        .generate(&GenerateRequest::new(
            demo_dir(),
            "Service",
            "SvcMiddleware",
            customizer,
        ))
        .unwrap()
        .render()
}

const TRACER_SERVICE: &str = r#"// Code generated by "middlegen Service SvcMiddleware tracer"; DO NOT EDIT.

package service

import (
	"context"

	zipkin "github.com/openzipkin/zipkin-go"
)

func NewServiceTracer(tracer zipkin.Tracer) SvcMiddleware {
	return func(s Service) Service {
		return &tracerS{
			tr: tracer,
			s:  s,
		}
	}
}

type tracerS struct {
	tr zipkin.Tracer
	s  Service
}

func (t *tracerS) Foo(ctx context.Context, bar string) (string, error) {
	span, ctx := t.tr.StartSpanFromContext(ctx, "Foo")

	defer func() {
		span.Finish()
	}()

	return t.s.Foo(ctx, bar)
}

func (t *tracerS) Bar(ctx context.Context, ids ...int) error {
	span, ctx := t.tr.StartSpanFromContext(ctx, "Bar")

	defer func() {
		span.Finish()
	}()

	return t.s.Bar(ctx, ids...)
}

func (t *tracerS) Close() {
	t.s.Close()
}

func (t *tracerS) Lookup(m map[string][]int) map[string][]int {
	return t.s.Lookup(m)
}
"#;

#[test]
fn test_tracer_output() {
    assert_eq!(generate("tracer"), TRACER_SERVICE);
}

#[test]
fn test_logger_output() {
    let output = generate("logger");

    assert!(output.contains("import (\n\t\"context\"\n\t\"fmt\"\n\t\"log\"\n)\n"));
    assert!(output.contains("func NewServiceLogger(logger *log.Logger) SvcMiddleware {"));
    assert!(output.contains("type loggerS struct {\n\tl *log.Logger\n\ts Service\n}"));
    assert!(output.contains(
        "\tl.l.Output(2, fmt.Sprintf(\"Foo(ctx=%s, bar=%s)\", fmt.Sprintf(\"%v\", ctx), bar))\n\treturn l.s.Foo(ctx, bar)\n"
    ));
    assert!(output.contains("\tl.l.Output(2, fmt.Sprintf(\"Close()\"))\n\tl.s.Close()\n"));
}

#[test]
fn test_generation_is_deterministic() {
    for customizer in ["tracer", "logger"] {
        assert_eq!(generate(customizer), generate(customizer));
    }
}

#[test]
fn test_middlewares_compose() {
    for (customizer, struct_name, recv) in [("tracer", "tracerS", "t"), ("logger", "loggerS", "l")] {
        let output = generate(customizer);

        assert!(!output.contains("type SvcMiddleware"));
        assert!(output.contains(") SvcMiddleware {\n\treturn func(s Service) Service {\n"));
        assert!(output.contains(&format!("return &{}{{", struct_name)));

        for method in ["Foo", "Bar", "Close", "Lookup"] {
            let call = format!("{}.s.{}(", recv, method);
            assert_eq!(
                output.matches(&call).count(),
                1,
                "{} should forward {} exactly once",
                customizer,
                method
            );
        }
    }
}

#[test]
fn test_spans_only_for_context_methods() {
    let output = generate("tracer");

    let methods: Vec<&str> = output.split("\nfunc (t *tracerS) ").skip(1).collect();
    assert_eq!(methods.len(), 4);

    for method in methods {
        let spans = method.matches("StartSpanFromContext").count();
        let finishes = method.matches("span.Finish()").count();
        if method.contains("ctx context.Context") {
            assert_eq!((spans, finishes), (1, 1));
        } else {
            assert_eq!((spans, finishes), (0, 0));
        }
    }
}

#[test]
fn test_map_type_renders_the_same_as_param_and_result() {
    let output = generate("tracer");
    assert!(output.contains("Lookup(m map[string][]int) map[string][]int {"));
}

#[test]
fn test_writes_into_directory() {
    let out = tempfile::tempdir().unwrap();
    let registry = registry();
    let loader = ManifestLoader::new();
    let generator = Generator::new(&registry, &loader);

    let file = generator
        .generate(&GenerateRequest::new(
            demo_dir(),
            "Service",
            "SvcMiddleware",
            "tracer",
        ))
        .unwrap();
    let path = generator
        .write(&file, &DirectoryEmitter::new(out.path()))
        .unwrap();

    assert_eq!(path, out.path().join("tracer_service.go"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), TRACER_SERVICE);
}

fn write_manifest(dir: &Path, manifest: serde_json::Value) {
    std::fs::write(dir.join(DEFAULT_MANIFEST), manifest.to_string()).unwrap();
}

#[test]
fn test_manifest_must_hold_one_package() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry();
    let loader = ManifestLoader::new();
    let generator = Generator::new(&registry, &loader);
    let request = GenerateRequest::new(dir.path(), "Service", "SvcMiddleware", "tracer");

    write_manifest(dir.path(), json!({ "packages": [] }));
    assert!(matches!(
        generator.generate(&request),
        Err(GenerateError::PackageResolution { count: 0, .. })
    ));

    let package = json!({ "name": "a", "path": "example.com/a" });
    write_manifest(dir.path(), json!({ "packages": [package.clone(), package] }));
    assert!(matches!(
        generator.generate(&request),
        Err(GenerateError::PackageResolution { count: 2, .. })
    ));
}

#[test]
fn test_missing_manifest_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let registry = registry();
    let loader = ManifestLoader::new();

    let result = Generator::new(&registry, &loader).generate(&GenerateRequest::new(
        dir.path(),
        "Service",
        "SvcMiddleware",
        "tracer",
    ));
    assert!(matches!(
        result,
        Err(GenerateError::Load(LoadError::Read { .. }))
    ));
}

#[test]
fn test_only_interfaces_are_decorated() {
    let registry = registry();
    let loader = ManifestLoader::new();
    let generator = Generator::new(&registry, &loader);

    assert!(matches!(
        generator.generate(&GenerateRequest::new(demo_dir(), "Config", "M", "tracer")),
        Err(GenerateError::NotAnInterface { .. })
    ));
    assert!(matches!(
        generator.generate(&GenerateRequest::new(demo_dir(), "Missing", "M", "tracer")),
        Err(GenerateError::UndeclaredType { .. })
    ));
}

#[test]
fn test_logger_renames_parameters_shadowing_fmt() {
    let dir = tempfile::tempdir().unwrap();
    let package = json!({ "path": "example.com/shadow", "name": "shadow" });
    let named = |name: &str| json!({ "kind": "named", "name": name, "package": package });
    let string = json!({ "kind": "basic", "name": "string" });
    write_manifest(
        dir.path(),
        json!({ "packages": [{
            "name": "shadow",
            "path": "example.com/shadow",
            "scope": {
                "Printer": { "kind": "type_name", "type": {
                    "kind": "named", "name": "Printer", "package": package,
                    "underlying": { "kind": "interface", "methods": [{
                        "name": "Print",
                        "type": { "kind": "signature", "params": [
                            { "name": "fmt", "type": string },
                            { "name": "log", "type": string },
                        ] },
                    }] },
                } },
                "PrinterMiddleware": { "kind": "type_name", "type": {
                    "kind": "named", "name": "PrinterMiddleware", "package": package,
                    "underlying": {
                        "kind": "signature",
                        "params": [{ "type": named("Printer") }],
                        "results": [{ "type": named("Printer") }],
                    },
                } },
            },
        }] }),
    );

    let registry = registry();
    let loader = ManifestLoader::new();
    let output = Generator::new(&registry, &loader)
        .generate(&GenerateRequest::new(
            dir.path(),
            "Printer",
            "PrinterMiddleware",
            "logger",
        ))
        .unwrap()
        .render();

    assert!(output.contains("func (l *loggerP) Print(fmt1 string, log1 string) {"));
    assert!(output.contains(
        "\tl.l.Output(2, fmt.Sprintf(\"Print(fmt1=%s, log1=%s)\", fmt1, log1))\n\tl.p.Print(fmt1, log1)\n"
    ));
}

#[test]
fn test_undeclared_middleware_type_fails() {
    let registry = registry();
    let loader = ManifestLoader::new();

    match Generator::new(&registry, &loader).generate(&GenerateRequest::new(
        demo_dir(),
        "Service",
        "OtherMiddleware",
        "tracer",
    )) {
        Err(GenerateError::UndeclaredType { name, .. }) => assert_eq!(name, "OtherMiddleware"),
        other => panic!("Expected UndeclaredType, got {:?}", other.map(|f| f.file_name)),
    }
}
