//! Generates Go middleware decorators for interfaces.
//!
//! A [`Generator`] loads the target package through a [`PackageLoader`],
//! derives the interface's methods, and lets a registered [`Customizer`]
//! author the body of every forwarding method. The result is a
//! [`GeneratedFile`] that an [`Emitter`] writes out.

mod customizer;
mod emit;
mod error;
mod generator;
mod loader;
mod model;
mod options;
mod registry;
mod writer;

pub use customizer::Customizer;
pub use emit::{
    Block, Decl, DirectoryEmitter, Emitter, Field, FuncDecl, FuncSignature, GeneratedFile, GoFile,
    Receiver, Stmt, TypeBody, TypeDecl,
};
pub use error::{EmitError, GenerateError, GenerateResult, LoadError, RegistryError};
pub use generator::{GenerateRequest, Generator};
pub use loader::{ManifestLoader, PackageLoader, StaticLoader, DEFAULT_MANIFEST};
pub use model::{MiddlewareParameter, ServiceModel};
pub use options::GenerateOptions;
pub use registry::CustomizerRegistry;
pub use writer::CodeWriter;

// Re-export from interpreter crate for convenience
pub use middlegen_interpreter::{DeclaredFunction, ImportTable, NamedField, TypeNode};
