use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Runtime type tag of an rpc argument or return value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Type {
    Nil,
    Int,
    Float,
    Bool,
    String,
    Any,
    Char,
    List(Box<Type>),
}

impl Type {
    fn name(&self) -> &'static str {
        use Type::*;
        match self {
            Nil => "Nil",
            Int => "Int",
            Float => "Float",
            Bool => "Bool",
            String => "String",
            Any => "Any",
            Char => "Char",
            List(_) => "List",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())?;
        if let Type::List(elem) = self {
            write!(f, "[{elem}]")?;
        }
        Ok(())
    }
}

/// An untyped argument or return value, as carried by a transport.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum Value {
    Nil,
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    Char(char),
    List(Vec<Value>),
}

pub trait Typed {
    fn rpc_type() -> Type;
}

pub trait Encode {
    fn encode(val: Self) -> Value;
}

pub trait Decode: Sized {
    fn decode(val: Value) -> Result<Self, TypeMismatch>;
}

macro_rules! impl_encode_decode {
    ($rust_type:ty, $rpc_type:expr, $encode_name:pat => $encode_expr:expr, $($from_rpc_arm:tt)*) => {
        impl Typed for $rust_type {
            fn rpc_type() -> Type {
                $rpc_type
            }
        }

        impl Encode for $rust_type {
            fn encode($encode_name: $rust_type) -> Value {
                $encode_expr
            }
        }

        impl Decode for $rust_type {
            fn decode(val: Value) -> Result<Self, TypeMismatch> {
                Ok(match val {
                    $($from_rpc_arm)*,
                    _ => return Err(TypeMismatch::new(val, <Self as Typed>::rpc_type()))
                })
            }
        }

        impl From<$rust_type> for Value {
            fn from(val: $rust_type) -> Value {
                <$rust_type as Encode>::encode(val)
            }
        }
    };
}

impl_encode_decode!((), Type::Nil, () => Value::Nil, Value::Nil => ());
impl_encode_decode!(String, Type::String, s => Value::String(s), Value::String(s) => s);
impl_encode_decode!(i64, Type::Int, n => Value::Int(n), Value::Int(n) => n);
impl_encode_decode!(i32, Type::Int, n => Value::Int(n.into()), Value::Int(n) if i32::try_from(n).is_ok() => n as i32);
impl_encode_decode!(f64, Type::Float, x => Value::Float(x), Value::Float(x) => x);
impl_encode_decode!(f32, Type::Float, x => Value::Float(x.into()), Value::Float(x) if !x.is_finite() || (x as f32).is_finite() => x as f32);
impl_encode_decode!(bool, Type::Bool, b => Value::Bool(b), Value::Bool(b) => b);
impl_encode_decode!(char, Type::Char, c => Value::Char(c), Value::Char(c) => c);

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::String(s.to_owned())
    }
}

// `Value` passes through untouched, whatever it holds.
impl Typed for Value {
    fn rpc_type() -> Type {
        Type::Any
    }
}

impl Encode for Value {
    fn encode(val: Self) -> Value {
        val
    }
}

impl Decode for Value {
    fn decode(val: Value) -> Result<Self, TypeMismatch> {
        Ok(val)
    }
}

impl<T: Typed> Typed for Vec<T> {
    fn rpc_type() -> Type {
        Type::List(Box::new(T::rpc_type()))
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(val: Self) -> Value {
        Value::List(val.into_iter().map(T::encode).collect())
    }
}

impl<T: Decode + Typed> Decode for Vec<T> {
    fn decode(val: Value) -> Result<Self, TypeMismatch> {
        match val {
            Value::List(items) => items.into_iter().map(T::decode).collect(),
            _ => Err(TypeMismatch::new(val, <Self as Typed>::rpc_type())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error, Deserialize, Serialize)]
#[error("type error: {value:?} is not {expected_type}")]
pub struct TypeMismatch {
    value: Value,
    expected_type: Type,
}

impl TypeMismatch {
    fn new(value: Value, expected_type: Type) -> Self {
        Self {
            value,
            expected_type,
        }
    }

    pub fn expected_type(&self) -> &Type {
        &self.expected_type
    }
}

/// Argument and return types of an rpc function, as seen at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Signature {
    pub domain: Vec<Type>,
    pub range: Type,
}

impl Signature {
    pub fn infer<D: Arguments, R: Typed>() -> Self {
        Signature {
            domain: D::param_types(),
            range: R::rpc_type(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error, Deserialize, Serialize)]
pub enum ArgsError {
    #[error("expected {expected} arguments, got {found}")]
    Count { expected: usize, found: usize },
    #[error("argument {index}: {mismatch}")]
    Type { index: usize, mismatch: TypeMismatch },
}

/// A positional argument list, decoded from untyped [`Value`]s.
///
/// Implemented for tuples of up to eight [`Decode`] + [`Typed`] elements.
pub trait Arguments: Sized {
    const ARITY: usize;

    fn param_types() -> Vec<Type>;
    fn decode_args(args: Vec<Value>) -> Result<Self, ArgsError>;
}

macro_rules! impl_arguments {
    ($arity:literal; $($index:literal $T:ident $v:ident),*) => {
        impl<$($T),*> Arguments for ($($T,)*)
        where
            $($T: Decode + Typed,)*
        {
            const ARITY: usize = $arity;

            fn param_types() -> Vec<Type> {
                vec![$(<$T as Typed>::rpc_type()),*]
            }

            fn decode_args(args: Vec<Value>) -> Result<Self, ArgsError> {
                let [$($v),*]: [Value; $arity] = args.try_into().map_err(|args: Vec<Value>| {
                    ArgsError::Count {
                        expected: $arity,
                        found: args.len(),
                    }
                })?;
                Ok(($(
                    $T::decode($v).map_err(|mismatch| ArgsError::Type {
                        index: $index,
                        mismatch,
                    })?,
                )*))
            }
        }
    };
}

impl_arguments!(0;);
impl_arguments!(1; 0 A a);
impl_arguments!(2; 0 A a, 1 B b);
impl_arguments!(3; 0 A a, 1 B b, 2 C c);
impl_arguments!(4; 0 A a, 1 B b, 2 C c, 3 D d);
impl_arguments!(5; 0 A a, 1 B b, 2 C c, 3 D d, 4 E e);
impl_arguments!(6; 0 A a, 1 B b, 2 C c, 3 D d, 4 E e, 5 F f);
impl_arguments!(7; 0 A a, 1 B b, 2 C c, 3 D d, 4 E e, 5 F f, 6 G g);
impl_arguments!(8; 0 A a, 1 B b, 2 C c, 3 D d, 4 E e, 5 F f, 6 G g, 7 H h);
