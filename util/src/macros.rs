/// Print to stderr, for use before tracing is initialized.
#[macro_export]
macro_rules! bootstrap {
    ($x:expr $( , $xs:expr )* $(,)?) => {
        eprintln!(concat!("[bootstrap] ", $x) $( , $xs )*)
    };
}

/// Log the error side of a `Result` by reference, leaving it to the caller.
/// Defaults to `error` level; prefix with `warn:` for recoverable failures.
#[macro_export]
macro_rules! trace_catch {
    (warn: $val:expr, $($rest:tt)*) => {
        if let Err(ref e) = $val {
            ::tracing::warn!(error = %e, $($rest)*);
        }
    };

    ($val:expr, $($rest:tt)*) => {
        if let Err(ref e) = $val {
            ::tracing::error!(error = %e, $($rest)*);
        }
    };
}

#[cfg(test)]
mod test {
    #[test]
    fn trace_catch_leaves_result() {
        let ok: Result<u8, std::fmt::Error> = Ok(1);
        let err: Result<u8, std::fmt::Error> = Err(std::fmt::Error);

        crate::trace_catch!(ok, "never logged");
        crate::trace_catch!(warn: err, attempt = 1, "logged");

        assert_eq!(ok, Ok(1));
        assert!(err.is_err());
    }
}
