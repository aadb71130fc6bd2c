pub mod text;

use std::sync::Once;

static LOADED: Once = Once::new();

/// Register every builtin with the global registry. Safe to call repeatedly.
pub fn load_builtins() {
    LOADED.call_once(|| {
        text::register_builtins();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            functions = crate::function_registry::names().len(),
            "builtins loaded"
        );
    });
}
