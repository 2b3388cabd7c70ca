//! Assembled Go source and its hand-off to disk.
//!
//! A [`GoFile`] is built in full before anything is written, so a failed
//! generation never leaves a partial file behind.

use crate::error::EmitError;
use crate::writer::CodeWriter;
use middlegen_interpreter::ImportTable;
use std::path::{Path, PathBuf};
use tracing::info;

/// A complete generated source file.
#[derive(Debug, Clone)]
pub struct GoFile {
    pub package: String,
    /// Comment placed above the package clause
    pub header: Option<String>,
    pub imports: ImportTable,
    pub decls: Vec<Decl>,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Type(TypeDecl),
    Func(FuncDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub body: TypeBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeBody {
    Struct(Vec<Field>),
    /// Any other type expression, e.g. `func(Service) Service`
    Expr(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Receiver {
    pub name: String,
    pub ty: String,
}

/// Everything up to the opening brace of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncSignature {
    pub receiver: Option<Receiver>,
    pub name: String,
    /// Parenthesized parameter list
    pub params: String,
    /// Result list, empty when the function returns nothing
    pub results: String,
}

impl FuncSignature {
    pub fn render(&self) -> String {
        let mut out = String::from("func ");
        if let Some(receiver) = &self.receiver {
            out.push_str(&format!("({} {}) ", receiver.name, receiver.ty));
        }
        out.push_str(&self.name);
        out.push_str(&self.params);
        if !self.results.is_empty() {
            out.push(' ');
            out.push_str(&self.results);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub signature: FuncSignature,
    pub body: Block,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Line(String),
    Blank,
    /// `open` line, indented body, `close` line
    Nested {
        open: String,
        body: Block,
        close: String,
    },
    /// Keyed composite literal with aligned values
    KeyedLiteral {
        open: String,
        entries: Vec<(String, String)>,
        close: String,
    },
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.stmts.push(Stmt::Line(text.into()));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.stmts.push(Stmt::Blank);
        self
    }

    pub fn push(&mut self, stmt: Stmt) -> &mut Self {
        self.stmts.push(stmt);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }

    fn write(&self, writer: &CodeWriter) {
        for stmt in &self.stmts {
            match stmt {
                Stmt::Line(text) => writer.add_line(text),
                Stmt::Blank => writer.blank_line(),
                Stmt::Nested { open, body, close } => {
                    writer.add_line(open);
                    writer.indent();
                    body.write(writer);
                    writer.dedent();
                    writer.add_line(close);
                }
                Stmt::KeyedLiteral {
                    open,
                    entries,
                    close,
                } => {
                    writer.add_line(open);
                    writer.indent();
                    writer.add_aligned(entries, ": ", ",");
                    writer.dedent();
                    writer.add_line(close);
                }
            }
        }
    }
}

impl Decl {
    fn write(&self, writer: &CodeWriter) {
        match self {
            Decl::Type(decl) => match &decl.body {
                TypeBody::Struct(fields) if fields.is_empty() => {
                    writer.add_line(&format!("type {} struct{{}}", decl.name));
                }
                TypeBody::Struct(fields) => {
                    writer.add_line(&format!("type {} struct {{", decl.name));
                    writer.indent();
                    let rows: Vec<(String, String)> = fields
                        .iter()
                        .map(|f| (f.name.clone(), f.ty.clone()))
                        .collect();
                    writer.add_aligned(&rows, " ", "");
                    writer.dedent();
                    writer.add_line("}");
                }
                TypeBody::Expr(expr) => {
                    writer.add_line(&format!("type {} {}", decl.name, expr));
                }
            },
            Decl::Func(func) => {
                writer.add_line(&format!("{} {{", func.signature.render()));
                writer.indent();
                func.body.write(writer);
                writer.dedent();
                writer.add_line("}");
            }
        }
    }
}

impl GoFile {
    /// Formats the file the way gofmt would lay it out.
    pub fn render(&self) -> String {
        let writer = CodeWriter::new();

        if let Some(header) = &self.header {
            writer.add_line(&format!("// {}", header));
            writer.blank_line();
        }

        writer.add_line(&format!("package {}", self.package));
        self.write_imports(&writer);

        for decl in &self.decls {
            writer.blank_line();
            decl.write(&writer);
        }

        writer.get_output()
    }

    fn write_imports(&self, writer: &CodeWriter) {
        let specs = self.imports.specs();
        if specs.is_empty() {
            return;
        }
        writer.blank_line();

        let spell = |spec: &middlegen_interpreter::ImportSpec| {
            if spec.needs_alias() {
                format!("{} \"{}\"", spec.alias, spec.path)
            } else {
                format!("\"{}\"", spec.path)
            }
        };

        if let [only] = specs.as_slice() {
            writer.add_line(&format!("import {}", spell(only)));
            return;
        }

        writer.add_line("import (");
        writer.indent();
        let mut previous_stdlib = None;
        for spec in &specs {
            if previous_stdlib == Some(true) && !spec.is_stdlib() {
                writer.blank_line();
            }
            writer.add_line(&spell(spec));
            previous_stdlib = Some(spec.is_stdlib());
        }
        writer.dedent();
        writer.add_line(")");
    }
}

/// A named file ready to be handed to an [`Emitter`].
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub file_name: String,
    pub file: GoFile,
}

impl GeneratedFile {
    pub fn render(&self) -> String {
        self.file.render()
    }
}

/// Destination for generated files.
pub trait Emitter {
    fn emit(&self, file: &GeneratedFile) -> Result<PathBuf, EmitError>;
}

/// Writes generated files into a directory.
pub struct DirectoryEmitter {
    dir: PathBuf,
}

impl DirectoryEmitter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl Emitter for DirectoryEmitter {
    fn emit(&self, file: &GeneratedFile) -> Result<PathBuf, EmitError> {
        let path = self.dir.join(&file.file_name);
        std::fs::write(&path, file.render()).map_err(|source| EmitError::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "Wrote generated file");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(imports: ImportTable, decls: Vec<Decl>) -> GoFile {
        GoFile {
            package: "example".to_string(),
            header: Some("Code generated by test; DO NOT EDIT.".to_string()),
            imports,
            decls,
        }
    }

    #[test]
    fn test_render_without_imports() {
        let go = file(
            ImportTable::new("example"),
            vec![Decl::Type(TypeDecl {
                name: "SvcMiddleware".to_string(),
                body: TypeBody::Expr("func(Service) Service".to_string()),
            })],
        );

        assert_eq!(
            go.render(),
            "// Code generated by test; DO NOT EDIT.\n\npackage example\n\ntype SvcMiddleware func(Service) Service\n"
        );
    }

    #[test]
    fn test_single_import_has_no_parentheses() {
        let mut imports = ImportTable::new("example");
        imports.register("context", "context");
        let rendered = file(imports, vec![]).render();
        assert!(rendered.contains("\nimport \"context\"\n"));
    }

    #[test]
    fn test_import_groups() {
        let mut imports = ImportTable::new("example");
        imports.register("zipkin", "github.com/openzipkin/zipkin-go");
        imports.register("context", "context");
        imports.register("domain", "example/domain");
        let rendered = file(imports, vec![]).render();

        assert!(rendered.contains(
            "import (\n\t\"context\"\n\t\"example/domain\"\n\n\tzipkin \"github.com/openzipkin/zipkin-go\"\n)\n"
        ));
    }

    #[test]
    fn test_struct_fields_are_aligned() {
        let go = file(
            ImportTable::new("example"),
            vec![Decl::Type(TypeDecl {
                name: "tracerS".to_string(),
                body: TypeBody::Struct(vec![
                    Field {
                        name: "tr".to_string(),
                        ty: "zipkin.Tracer".to_string(),
                    },
                    Field {
                        name: "s".to_string(),
                        ty: "Service".to_string(),
                    },
                ]),
            })],
        );

        assert!(go
            .render()
            .contains("type tracerS struct {\n\ttr zipkin.Tracer\n\ts  Service\n}\n"));
    }

    #[test]
    fn test_function_with_nested_blocks() {
        let mut inner = Block::new();
        inner.line("span.Finish()");

        let mut body = Block::new();
        body.line("span, ctx := t.tr.StartSpanFromContext(ctx, \"Foo\")")
            .blank()
            .push(Stmt::Nested {
                open: "defer func() {".to_string(),
                body: inner,
                close: "}()".to_string(),
            })
            .blank()
            .line("return t.s.Foo(ctx)");

        let go = file(
            ImportTable::new("example"),
            vec![Decl::Func(FuncDecl {
                signature: FuncSignature {
                    receiver: Some(Receiver {
                        name: "t".to_string(),
                        ty: "*tracerS".to_string(),
                    }),
                    name: "Foo".to_string(),
                    params: "(ctx context.Context)".to_string(),
                    results: "error".to_string(),
                },
                body,
            })],
        );

        let expected = "func (t *tracerS) Foo(ctx context.Context) error {\n\
                        \tspan, ctx := t.tr.StartSpanFromContext(ctx, \"Foo\")\n\
                        \n\
                        \tdefer func() {\n\
                        \t\tspan.Finish()\n\
                        \t}()\n\
                        \n\
                        \treturn t.s.Foo(ctx)\n\
                        }\n";
        assert!(go.render().ends_with(expected));
    }

    #[test]
    fn test_directory_emitter_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let generated = GeneratedFile {
            file_name: "tracer_service.go".to_string(),
            file: file(ImportTable::new("example"), vec![]),
        };

        let path = DirectoryEmitter::new(dir.path()).emit(&generated).unwrap();
        assert_eq!(path, dir.path().join("tracer_service.go"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), generated.render());
    }
}
