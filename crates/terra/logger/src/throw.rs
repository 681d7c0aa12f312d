extern crate tracing;

// Log an error and abort
#[macro_export]
macro_rules! throw {
    ($($arg:tt)*) => ({
        $crate::error!($($arg)*);
        panic!($($arg)*);
    })
}
