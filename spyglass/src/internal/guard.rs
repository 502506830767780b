use std::{
    any::Any,
    panic::{AssertUnwindSafe, catch_unwind},
};

/// Runs a call into user code, turning a panic into an `Err` with its message.
///
/// Subjects and augmenters are foreign code; a panic in one of them must not
/// take down the whole introspection call.
pub(crate) fn guarded<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        format!("panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {msg}")
    } else {
        "panicked".to_string()
    }
}
