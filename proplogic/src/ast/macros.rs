//! Some useful helper macros.

/// Implements `FromStr` and `Display` for an enum whose variants are each spelled by a fixed
/// string. Parsing an unknown string returns `Err(())`.
macro_rules! impl_str_conversion_traits {
    ($enum_name:ident { $($variant:ident: $str:literal),* $(,)? }) => {
        impl std::str::FromStr for $enum_name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($str => Ok($enum_name::$variant),)*
                    _ => Err(()),
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                let s = match self {
                    $($enum_name::$variant => $str,)*
                };
                write!(f, "{}", s)
            }
        }

        impl $enum_name {
            /// Returns the textual symbol of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($enum_name::$variant => $str,)*
                }
            }
        }
    }
}
