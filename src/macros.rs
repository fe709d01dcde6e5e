/// Implements [`RpcFunction::name`](crate::RpcFunction::name).
#[macro_export]
macro_rules! name {
    ($name:expr) => {
        fn name(&self) -> &str {
            $name
        }
    };
}

/// Implements the rest of [`RpcFunction`](crate::RpcFunction) from an async
/// body taking the whole argument tuple.
///
/// ```ignore
/// impl RpcFunction for Greeter {
///     name!("greet");
///     call! {
///         async fn call(&self, args: (String,)) -> String {
///             format!("{}, {}!", self.greeting, args.0)
///         }
///     }
/// }
/// ```
#[macro_export]
macro_rules! call {
    (async fn call(& $self:ident, $domain_ident:ident : $domain_ty:ty) -> $range_ty:ty { $($body:tt)* }) => {
        type Domain = $domain_ty;
        type Range = $range_ty;

        fn call<'call>(&'call $self, $domain_ident: $domain_ty) -> $crate::BoxFuture<'call, Self::Range> {
            let body = async move {
                $($body)*
            };
            Box::pin(body)
        }
    };
}
