//! Built-in middleware customizers.
//!
//! | Name     | Wraps every method with                           |
//! |----------|---------------------------------------------------|
//! | `tracer` | a Zipkin span when it receives a `context.Context` |
//! | `logger` | a `log.Logger` line listing its arguments          |

mod logger;
mod tracer;

pub use logger::LoggerCustomizer;
pub use tracer::{TracerCustomizer, ZIPKIN_PATH};

use middlegen_generator::{CustomizerRegistry, RegistryError};
use std::sync::Arc;
use tracing::debug;

/// Registers every built-in customizer under its well-known name.
pub fn register_builtin(registry: &CustomizerRegistry) -> Result<(), RegistryError> {
    registry.register("tracer", Arc::new(TracerCustomizer::new()))?;
    registry.register("logger", Arc::new(LoggerCustomizer::new()))?;
    debug!(count = 2, "Registered built-in customizers");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtin() {
        let registry = CustomizerRegistry::new();
        register_builtin(&registry).unwrap();
        assert_eq!(registry.names(), vec!["logger", "tracer"]);
    }

    #[test]
    fn test_register_builtin_twice_fails() {
        let registry = CustomizerRegistry::new();
        register_builtin(&registry).unwrap();
        assert_eq!(
            register_builtin(&registry),
            Err(RegistryError::Duplicate {
                name: "tracer".to_string()
            })
        );
    }
}
