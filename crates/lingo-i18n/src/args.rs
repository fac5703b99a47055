//! Translation arguments
//!
//! Arguments are an explicit tagged type rather than anything inspected at
//! runtime. A sequence is passed with [`spread`], which produces an
//! [`Arg::List`]; the translator expands a list into one positional parameter
//! per element (one level deep) before substitution.

use std::fmt;

/// A single argument passed to a translation.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// An absent value. Dropped by the translator; renders as `<nil>` when
    /// it reaches the formatter directly.
    Nil,
    /// Text
    Str(String),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    Uint(u64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// A sequence whose elements become separate parameters
    List(Vec<Arg>),
}

impl Arg {
    /// Type label used in formatter diagnostics such as `%!d(string=hi)`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "<nil>",
            Self::Str(_) => "string",
            Self::Int(_) => "int",
            Self::Uint(_) => "uint",
            Self::Float(_) => "float64",
            Self::Bool(_) => "bool",
            Self::List(_) => "[]interface {}",
        }
    }

    /// Whether this is [`Arg::Nil`]
    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::render_default(self))
    }
}

/// Wrap a sequence so each element is substituted as its own parameter.
///
/// ```
/// use lingo_i18n::{spread, Arg};
///
/// let args = [spread(["a", "b"])];
/// assert_eq!(args[0], Arg::List(vec![Arg::from("a"), Arg::from("b")]));
/// ```
pub fn spread<I, T>(items: I) -> Arg
where
    I: IntoIterator<Item = T>,
    T: Into<Arg>,
{
    Arg::List(items.into_iter().map(Into::into).collect())
}

/// Expand translation arguments into the flat parameter list handed to the
/// formatter: `Nil` is dropped, a `List` contributes its elements, anything
/// else contributes itself.
pub fn flatten(args: &[Arg]) -> Vec<&Arg> {
    let mut params = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Arg::Nil => {}
            Arg::List(items) => params.extend(items.iter()),
            other => params.push(other),
        }
    }
    params
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<char> for Arg {
    fn from(value: char) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for Arg {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Arg {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )+
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::Uint(u64::from(value))
                }
            }
        )+
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Arg {
    fn from(value: isize) -> Self {
        i64::try_from(value).map_or(Self::Nil, Self::Int)
    }
}

impl From<usize> for Arg {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or(Self::Nil, Self::Uint)
    }
}

/// Build a `Vec<Arg>` from heterogeneous values.
///
/// ```
/// use lingo_i18n::{tr_args, Arg};
///
/// let args = tr_args!["Ana", 3, None::<&str>];
/// assert_eq!(args, vec![Arg::from("Ana"), Arg::Int(3), Arg::Nil]);
/// ```
#[macro_export]
macro_rules! tr_args {
    () => {
        ::std::vec::Vec::<$crate::Arg>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Arg::from($value)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_drops_nil() {
        let args = vec![Arg::Nil, Arg::from("x")];
        assert_eq!(flatten(&args), vec![&Arg::from("x")]);
    }

    #[test]
    fn test_flatten_expands_one_level() {
        let inner = spread(["c", "d"]);
        let args = vec![spread(vec![Arg::from("a"), inner.clone(), Arg::Nil]), Arg::Int(1)];
        let params = flatten(&args);

        assert_eq!(params.len(), 4);
        assert_eq!(params[0], &Arg::from("a"));
        assert_eq!(params[1], &inner);
        assert_eq!(params[2], &Arg::Nil);
        assert_eq!(params[3], &Arg::Int(1));
    }

    #[test]
    fn test_empty_spread_contributes_nothing() {
        let args = vec![spread(Vec::<String>::new())];
        assert!(flatten(&args).is_empty());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Arg::from(7u8), Arg::Uint(7));
        assert_eq!(Arg::from(-7i32), Arg::Int(-7));
        assert_eq!(Arg::from(1.5f32), Arg::Float(1.5));
        assert_eq!(Arg::from(Some("x")), Arg::from("x"));
        assert_eq!(Arg::from(None::<i32>), Arg::Nil);
        assert_eq!(Arg::from('é'), Arg::from("é"));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Arg::from("x").type_name(), "string");
        assert_eq!(Arg::Int(1).type_name(), "int");
        assert_eq!(spread([1, 2]).type_name(), "[]interface {}");
    }
}
