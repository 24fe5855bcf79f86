use std::future::Future;
use std::pin::Pin;

use super::exception::{BufferError, BufferResult};
use super::msg::{Stamped, TransformStamped};
use super::registry::TransformRegistration;
use super::time::{Duration, Time};

/// Boxed, sendable future returned by buffer primitives.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// tf2 buffer capability set.
///
/// Implementors provide the four lookup/probe primitives; `transform` and
/// `transform_full` are shared and only dispatch through the registry.
///
/// `timeout: None` lets the implementation pick its default.
pub trait BufferInterface: Send + Sync {
    fn lookup_transform<'a>(
        &'a self,
        target_frame: &'a str,
        source_frame: &'a str,
        time: Time,
        timeout: Option<Duration>,
    ) -> BoxFuture<'a, BufferResult<TransformStamped>>;

    /// Transform between two (frame, time) pairs, chained through `fixed_frame`.
    fn lookup_transform_full<'a>(
        &'a self,
        target_frame: &'a str,
        target_time: Time,
        source_frame: &'a str,
        source_time: Time,
        fixed_frame: &'a str,
        timeout: Option<Duration>,
    ) -> BoxFuture<'a, BufferResult<TransformStamped>>;

    /// `Ok(false)` on any transform failure; other errors propagate.
    fn can_transform<'a>(
        &'a self,
        target_frame: &'a str,
        source_frame: &'a str,
        time: Time,
        timeout: Option<Duration>,
    ) -> BoxFuture<'a, BufferResult<bool>>;

    fn can_transform_full<'a>(
        &'a self,
        target_frame: &'a str,
        target_time: Time,
        source_frame: &'a str,
        source_time: Time,
        fixed_frame: &'a str,
        timeout: Option<Duration>,
    ) -> BoxFuture<'a, BufferResult<bool>>;

    /// Registry used to dispatch `transform*` calls.
    fn registration(&self) -> &TransformRegistration {
        TransformRegistration::global()
    }

    /// Re-express `object` in `target_frame` at the object's own stamp.
    ///
    /// The apply-function is resolved before any lookup, so an unregistered
    /// payload type never reaches the resolver.
    fn transform<'a, T>(
        &'a self,
        object: &'a T,
        target_frame: &'a str,
        timeout: Option<Duration>,
    ) -> BoxFuture<'a, BufferResult<T>>
    where
        Self: Sized,
        T: Stamped,
    {
        Box::pin(async move {
            let do_transform = self.registration().get::<T>()?;
            let transform = self
                .lookup_transform(target_frame, object.frame_id(), object.stamp(), timeout)
                .await?;
            Ok(do_transform.apply(object, &transform))
        })
    }

    /// Re-express `object` in `target_frame` at `target_time`, via `fixed_frame`.
    fn transform_full<'a, T>(
        &'a self,
        object: &'a T,
        target_frame: &'a str,
        target_time: Time,
        fixed_frame: &'a str,
        timeout: Option<Duration>,
    ) -> BoxFuture<'a, BufferResult<T>>
    where
        Self: Sized,
        T: Stamped,
    {
        Box::pin(async move {
            let do_transform = self.registration().get::<T>()?;
            let transform = self
                .lookup_transform_full(
                    target_frame,
                    target_time,
                    object.frame_id(),
                    object.stamp(),
                    fixed_frame,
                    timeout,
                )
                .await?;
            Ok(do_transform.apply(object, &transform))
        })
    }
}

/// Collapse a lookup outcome into a probe answer.
///
/// Transform failures become `Ok(false)`; anything else (unregistered payload,
/// client/transport faults) is returned as-is.
pub fn probe<T>(result: BufferResult<T>) -> BufferResult<bool> {
    match result {
        Ok(_) => Ok(true),
        Err(BufferError::Transform(_)) => Ok(false),
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::tf::exception::TransformException;

    #[test]
    fn probe_maps_only_transform_failures_to_false() {
        assert_eq!(probe::<()>(Ok(())), Ok(true));
        assert_eq!(
            probe::<()>(Err(TransformException::Lookup("x".into()).into())),
            Ok(false)
        );

        let unregistered = BufferError::UnregisteredType { type_name: "Foo" };
        assert_eq!(probe::<()>(Err(unregistered.clone())), Err(unregistered));

        let core: BufferError = CoreError::client_not_initialized("tf2").into();
        assert_eq!(probe::<()>(Err(core.clone())), Err(core));
    }
}
