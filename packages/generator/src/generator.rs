//! The generation pipeline: load, validate, derive, customize, assemble.

use crate::emit::{
    Block, Decl, Emitter, Field, FuncDecl, FuncSignature, GeneratedFile, GoFile, Receiver, Stmt,
    TypeBody, TypeDecl,
};
use crate::error::{GenerateError, GenerateResult};
use crate::loader::PackageLoader;
use crate::model::ServiceModel;
use crate::options::GenerateOptions;
use crate::registry::CustomizerRegistry;
use middlegen_interpreter::graph::{GoType, ObjectKind};
use middlegen_interpreter::{derive_interface, DeclaredFunction, ImportTable, Package, PackageRef};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// One invocation of the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Directory holding the target package
    pub dir: PathBuf,
    /// Interface to decorate
    pub type_name: String,
    /// Name of the `func(T) T` type returned by the factory
    pub middleware_name: String,
    /// Registered customizer to apply
    pub customizer: String,
}

impl GenerateRequest {
    pub fn new(
        dir: impl AsRef<Path>,
        type_name: impl Into<String>,
        middleware_name: impl Into<String>,
        customizer: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            type_name: type_name.into(),
            middleware_name: middleware_name.into(),
            customizer: customizer.into(),
        }
    }
}

pub struct Generator<'a> {
    registry: &'a CustomizerRegistry,
    loader: &'a dyn PackageLoader,
    options: GenerateOptions,
}

impl<'a> Generator<'a> {
    pub fn new(registry: &'a CustomizerRegistry, loader: &'a dyn PackageLoader) -> Self {
        Self::with_options(registry, loader, GenerateOptions::default())
    }

    pub fn with_options(
        registry: &'a CustomizerRegistry,
        loader: &'a dyn PackageLoader,
        options: GenerateOptions,
    ) -> Self {
        Self {
            registry,
            loader,
            options,
        }
    }

    /// Builds the middleware file for `request` without touching the disk.
    #[instrument(skip_all, fields(type_name = %request.type_name, customizer = %request.customizer))]
    pub fn generate(&self, request: &GenerateRequest) -> GenerateResult<GeneratedFile> {
        let package = self.load_package(&request.dir)?;
        info!(package = %package.path, "Loaded package");

        let target = validate_target(&package, &request.type_name)?;

        let functions = derive_interface(target)?;
        if functions.is_empty() {
            return Err(GenerateError::NoMethods {
                name: request.type_name.clone(),
            });
        }
        info!(methods = functions.len(), "Derived service model");

        validate_middleware(&package, &request.middleware_name)?;

        let customizer = self.registry.get(&request.customizer)?;

        let mut imports = ImportTable::new(package.path.clone());
        for (alias, path) in customizer.required_imports() {
            imports.register(&alias, &path);
        }
        let mut discovered = BTreeSet::new();
        for function in &functions {
            function.collect_imports(&mut discovered);
        }
        for package_ref in &discovered {
            imports.require(package_ref);
        }

        let mut model = ServiceModel::new(
            request.type_name.clone(),
            request.middleware_name.clone(),
            functions,
        );
        customizer.configure_model(&mut model);
        for param in &model.input_parameters {
            if !param.type_path.is_empty() && imports.alias_for(&param.type_path).is_none() {
                imports.require(&PackageRef::new(param.type_path.clone(), ""));
            }
        }

        rename_shadowing_fields(&mut model.functions, &imports);

        model.service_symbol = service_symbol(&model);
        model.struct_symbol = receiver_symbol(&model, &imports);

        let struct_name = model.struct_name();
        let mut decls = Vec::new();
        decls.push(factory_function(
            &model,
            &struct_name,
            customizer.factory_suffix(),
            &imports,
        ));
        decls.push(wrapper_struct(&model, &struct_name, &imports));

        for function in &model.functions {
            let signature = FuncSignature {
                receiver: Some(Receiver {
                    name: model.struct_symbol.clone(),
                    ty: format!("*{}", struct_name),
                }),
                name: function.name.clone(),
                params: function.params_decl(&imports),
                results: function.results_decl(&imports),
            };
            let body = customizer.generate_method_body(&signature, &model, function);
            decls.push(Decl::Func(FuncDecl { signature, body }));
        }
        info!(struct_name = %struct_name, "Assembled middleware");

        let header = self.options.header.then(|| {
            format!(
                "Code generated by \"middlegen {} {} {}\"; DO NOT EDIT.",
                request.type_name, request.middleware_name, request.customizer
            )
        });

        Ok(GeneratedFile {
            file_name: format!(
                "{}_{}.go",
                customizer.file_name_prefix(),
                request.type_name.to_lowercase()
            ),
            file: GoFile {
                package: package.name.clone(),
                header,
                imports,
                decls,
            },
        })
    }

    /// Hands a generated file to its destination.
    pub fn write(&self, file: &GeneratedFile, emitter: &dyn Emitter) -> GenerateResult<PathBuf> {
        Ok(emitter.emit(file)?)
    }

    fn load_package(&self, dir: &Path) -> GenerateResult<Package> {
        let mut packages = self.loader.load(dir)?;
        if packages.len() != 1 {
            return Err(GenerateError::PackageResolution {
                path: dir.to_path_buf(),
                count: packages.len(),
            });
        }
        Ok(packages.remove(0))
    }
}

fn validate_target<'p>(package: &'p Package, type_name: &str) -> GenerateResult<&'p GoType> {
    let object = package
        .lookup(type_name)
        .filter(|object| object.kind == ObjectKind::TypeName)
        .ok_or_else(|| GenerateError::UndeclaredType {
            name: type_name.to_string(),
            package: package.path.clone(),
        })?;

    match object.ty.underlying() {
        GoType::Interface { .. } => Ok(&object.ty),
        _ => Err(GenerateError::NotAnInterface {
            name: type_name.to_string(),
        }),
    }
}

/// The `func(T) T` type is declared by the package itself, so that several
/// middlewares generated for one interface share it.
fn validate_middleware(package: &Package, middleware_name: &str) -> GenerateResult<()> {
    match package.lookup(middleware_name) {
        Some(object) if object.kind == ObjectKind::TypeName => Ok(()),
        _ => Err(GenerateError::UndeclaredType {
            name: middleware_name.to_string(),
            package: package.path.clone(),
        }),
    }
}

fn lower_initial(name: &str) -> String {
    name.chars().take(1).flat_map(char::to_lowercase).collect()
}

/// Name of the wrapped instance, both as factory closure parameter and as
/// struct field.
fn service_symbol(model: &ServiceModel) -> String {
    let symbol = lower_initial(&model.type_name);
    let taken = model
        .input_parameters
        .iter()
        .any(|p| p.field_name == symbol || p.variable_name == symbol);
    if symbol.is_empty() || taken {
        "next".to_string()
    } else {
        symbol
    }
}

/// Renames parameters and named results that would shadow an imported
/// package inside the generated bodies.
fn rename_shadowing_fields(functions: &mut [DeclaredFunction], imports: &ImportTable) {
    let aliases: HashSet<String> = imports
        .specs()
        .into_iter()
        .map(|spec| spec.alias)
        .collect();

    for function in functions {
        let mut taken: HashSet<String> = function
            .params
            .iter()
            .chain(&function.results)
            .map(|field| field.name.clone())
            .collect();
        taken.extend(aliases.iter().cloned());

        for field in function.params.iter_mut().chain(function.results.iter_mut()) {
            if !aliases.contains(&field.name) {
                continue;
            }
            let renamed = (1..)
                .map(|i| format!("{}{}", field.name, i))
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or_default();
            debug!(
                method = %function.name,
                from = %field.name,
                to = %renamed,
                "Renamed shadowing field"
            );
            taken.insert(renamed.clone());
            field.name = renamed;
        }
    }
}

/// Receiver name for the generated methods; must not shadow a parameter or
/// an imported package.
fn receiver_symbol(model: &ServiceModel, imports: &ImportTable) -> String {
    let mut taken: HashSet<String> = model
        .functions
        .iter()
        .flat_map(|f| f.params.iter().map(|p| p.name.clone()))
        .collect();
    taken.extend(imports.specs().into_iter().map(|spec| spec.alias));

    let symbol = lower_initial(&model.struct_name());
    if !symbol.is_empty() && !taken.contains(&symbol) {
        return symbol;
    }
    if !taken.contains("mw") {
        return "mw".to_string();
    }
    let mut index = 1;
    loop {
        let candidate = format!("mw{}", index);
        if !taken.contains(&candidate) {
            return candidate;
        }
        index += 1;
    }
}

fn factory_function(
    model: &ServiceModel,
    struct_name: &str,
    suffix: &str,
    imports: &ImportTable,
) -> Decl {
    let params: Vec<String> = model
        .input_parameters
        .iter()
        .map(|p| format!("{} {}", p.variable_name, p.type_expr(imports)))
        .collect();

    let mut entries: Vec<(String, String)> = model
        .input_parameters
        .iter()
        .map(|p| (p.field_name.clone(), p.variable_name.clone()))
        .collect();
    entries.push((model.service_symbol.clone(), model.service_symbol.clone()));

    let mut closure = Block::new();
    closure.push(Stmt::KeyedLiteral {
        open: format!("return &{}{{", struct_name),
        entries,
        close: "}".to_string(),
    });

    let mut body = Block::new();
    body.push(Stmt::Nested {
        open: format!(
            "return func({} {}) {} {{",
            model.service_symbol, model.type_name, model.type_name
        ),
        body: closure,
        close: "}".to_string(),
    });

    Decl::Func(FuncDecl {
        signature: FuncSignature {
            receiver: None,
            name: format!("New{}{}", model.type_name, suffix),
            params: format!("({})", params.join(", ")),
            results: model.middleware_name.clone(),
        },
        body,
    })
}

fn wrapper_struct(model: &ServiceModel, struct_name: &str, imports: &ImportTable) -> Decl {
    let mut fields: Vec<Field> = model
        .input_parameters
        .iter()
        .map(|p| Field {
            name: p.field_name.clone(),
            ty: p.type_expr(imports),
        })
        .collect();
    fields.push(Field {
        name: model.service_symbol.clone(),
        ty: model.type_name.clone(),
    });

    Decl::Type(TypeDecl {
        name: struct_name.to_string(),
        body: TypeBody::Struct(fields),
    })
}
