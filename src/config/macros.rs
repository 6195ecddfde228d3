/// Define a configuration struct with embedded defaults
///
/// Each field is declared together with its default value. The macro
/// generates the struct with public fields, a `Default` implementation and
/// serde support with `#[serde(default)]`, so a partial TOML file only needs
/// the values it overrides.
///
/// # Example
/// ```
/// tokenomics::config_struct! {
///     pub struct ExampleCacheConfig {
///         namespace: String = "tokenomics".to_string(),
///         default_ttl_seconds: u64 = 300,
///     }
/// }
///
/// let cfg = ExampleCacheConfig::default();
/// assert_eq!(cfg.default_ttl_seconds, 300);
/// ```
#[macro_export]
macro_rules! config_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_name:ident: $field_type:ty = $default_value:expr
            ),*
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
        #[serde(default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field_name: $field_type,
            )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self {
                    $(
                        $field_name: $default_value,
                    )*
                }
            }
        }
    };
}
