use middlegen_interpreter::DeriveError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a [`PackageLoader`](crate::loader::PackageLoader)
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read type manifest {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid type manifest {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Misuse of the customizer registry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Customizer '{name}' is already registered")]
    Duplicate { name: String },

    #[error("Customizer registered with an empty name")]
    EmptyName,

    #[error("Cannot register customizer '{name}': registry is sealed after the first lookup")]
    Sealed { name: String },

    #[error("No customizer found by name '{name}'")]
    UnknownCustomizer { name: String },
}

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a generation request
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Expected exactly one package in {path:?}, found {count}")]
    PackageResolution { path: PathBuf, count: usize },

    #[error("'{name}' is not a declared type in package {package}")]
    UndeclaredType { name: String, package: String },

    #[error("Type '{name}' is not an interface")]
    NotAnInterface { name: String },

    #[error("Interface '{name}' declares no methods")]
    NoMethods { name: String },

    #[error("Failed to derive types: {0}")]
    Derive(#[from] DeriveError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Emit(#[from] EmitError),
}

pub type GenerateResult<T> = Result<T, GenerateError>;
