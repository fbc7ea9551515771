/// Returns early from the enclosing function with the given error, converted
/// into the function's error type.
#[macro_export]
macro_rules! raise {
    ($err:expr) => {
        return ::std::result::Result::Err(::std::convert::From::from($err))
    };
    ($variant:path, $format:expr, $( $arg:expr ),* ) => {
        $crate::raise!($variant(format!($format, $($arg),*)))
    };
}
