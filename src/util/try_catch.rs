/// Wrap a fallible function so failures go to `on_error` instead of the caller.
///
/// The wrapped function returns `None` whenever `func` fails, after calling
/// `on_error` exactly once with the error.
pub fn with_try_catch<A, T, E, F, H>(func: F, on_error: H) -> impl Fn(A) -> Option<T>
where
    F: Fn(A) -> Result<T, E>,
    H: Fn(E),
{
    move |arg| match func(arg) {
        Ok(value) => Some(value),
        Err(error) => {
            on_error(error);
            None
        }
    }
}
