use colored::Colorize;
use middlegen_generator::CustomizerRegistry;

pub fn list(registry: &CustomizerRegistry) {
    println!("{}", "Available customizers:".bright_blue().bold());
    for name in registry.names() {
        println!("  {}", name);
    }
}
