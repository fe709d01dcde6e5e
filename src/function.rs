//! [`RpcFunction`] for plain Rust functions and closures.

use crate::{
    types::{Arguments, Encode, Typed},
    BoxFuture, RpcFunction,
};
use futures::future::{ready, FutureExt};
use std::{any::type_name, marker::PhantomData};

/// Recovers the declared name of a function item from its type, e.g. `add`
/// for `my_crate::math::add`. Closures come out as `{{closure}}`, which no
/// source scan will ever know about; name those with [`rpc_fn_named`].
///
/// Only `::` outside angle brackets separates path segments, so
/// `<T as Trait>::f` is `f` and `generic<a::B>` is `generic`.
pub fn identify<F>() -> &'static str {
    let path = type_name::<F>();
    let bytes = path.as_bytes();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, b) in bytes.iter().enumerate() {
        match b {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => start = i + 2,
            _ => {}
        }
    }
    let segment = &path[start..];
    segment.split('<').next().unwrap_or(segment)
}

/// A synchronous function of up to eight arguments, exposed under a name.
pub struct FnRpc<F, Args> {
    name: String,
    func: F,
    _args: PhantomData<fn(Args)>,
}

/// Wraps a function item, naming it after its declaration.
pub fn rpc_fn<F, Args>(func: F) -> FnRpc<F, Args> {
    rpc_fn_named(identify::<F>(), func)
}

pub fn rpc_fn_named<F, Args>(name: impl Into<String>, func: F) -> FnRpc<F, Args> {
    FnRpc {
        name: name.into(),
        func,
        _args: PhantomData,
    }
}

macro_rules! impl_fn_rpc {
    ($($T:ident $v:ident),*) => {
        impl<Func, R, $($T),*> RpcFunction for FnRpc<Func, ($($T,)*)>
        where
            Func: Fn($($T),*) -> R + Send + Sync,
            ($($T,)*): Arguments + Send,
            R: Encode + Typed + Send + 'static,
        {
            type Domain = ($($T,)*);
            type Range = R;

            fn name(&self) -> &str {
                &self.name
            }

            fn call(&self, ($($v,)*): Self::Domain) -> BoxFuture<'_, R> {
                ready((self.func)($($v),*)).boxed()
            }
        }
    };
}

impl_fn_rpc!();
impl_fn_rpc!(A a);
impl_fn_rpc!(A a, B b);
impl_fn_rpc!(A a, B b, C c);
impl_fn_rpc!(A a, B b, C c, D d);
impl_fn_rpc!(A a, B b, C c, D d, E e);
impl_fn_rpc!(A a, B b, C c, D d, E e, F f);
impl_fn_rpc!(A a, B b, C c, D d, E e, F f, G g);
impl_fn_rpc!(A a, B b, C c, D d, E e, F f, G g, H h);
