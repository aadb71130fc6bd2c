/// Implement `Function::caps` from a list of `FnCaps` flag names.
#[macro_export]
macro_rules! func_caps {
    ($($cap:ident),+ $(,)?) => {
        fn caps(&self) -> $crate::function::FnCaps {
            $crate::function::FnCaps::empty() $(| $crate::function::FnCaps::$cap)+
        }
    };
}

#[macro_export]
macro_rules! register_functions {
    ( $($fn:expr),+ $(,)? ) => {{
        use std::sync::Arc;
        $(
            $crate::function_registry::register(Arc::new($fn));
        )+
    }};
}
