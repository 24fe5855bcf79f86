use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock, RwLock};

use super::apply::{do_transform_point, do_transform_pose, do_transform_transform, do_transform_vector3};
use super::exception::{BufferError, BufferResult};
use super::msg::{PointStamped, PoseStamped, Stamped, TransformStamped, Vector3Stamped};

type ApplyFn<T> = dyn Fn(&T, &TransformStamped) -> T + Send + Sync;

/// Typed apply-function, stored type-erased in the registry.
struct TypedApply<T: Stamped>(Box<ApplyFn<T>>);

struct Entry {
    type_name: &'static str,
    apply: Arc<dyn Any + Send + Sync>,
}

/// Payload type -> apply-function table.
///
/// One entry per payload type; registering a type again replaces its entry.
/// There is no removal. Reads vastly outnumber writes (registration happens
/// at startup), so a plain `RwLock` is enough.
pub struct TransformRegistration {
    entries: RwLock<HashMap<TypeId, Entry>>,
}

/// Apply-function resolved for payload type `T`.
pub struct DoTransform<T: Stamped> {
    apply: Arc<TypedApply<T>>,
    _payload: PhantomData<fn(&T) -> T>,
}

impl<T: Stamped> DoTransform<T> {
    pub fn apply(&self, object: &T, transform: &TransformStamped) -> T {
        (self.apply.0)(object, transform)
    }
}

impl TransformRegistration {
    /// Empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Registry with the built-in geometry payloads installed.
    pub fn with_geometry_types() -> Self {
        let registry = Self::new();
        registry.add::<PointStamped, _>(do_transform_point);
        registry.add::<Vector3Stamped, _>(do_transform_vector3);
        registry.add::<PoseStamped, _>(do_transform_pose);
        registry.add::<TransformStamped, _>(do_transform_transform);
        registry
    }

    /// Process-wide registry, created with the geometry payloads on first use.
    pub fn global() -> &'static TransformRegistration {
        static GLOBAL: OnceLock<TransformRegistration> = OnceLock::new();
        GLOBAL.get_or_init(Self::with_geometry_types)
    }

    /// Install the apply-function for `T` (last writer wins).
    pub fn add<T, F>(&self, apply: F)
    where
        T: Stamped,
        F: Fn(&T, &TransformStamped) -> T + Send + Sync + 'static,
    {
        let entry = Entry {
            type_name: type_name::<T>(),
            apply: Arc::new(TypedApply::<T>(Box::new(apply))),
        };
        let mut entries = match self.entries.write() {
            Ok(guard) => guard,
            Err(poison) => poison.into_inner(),
        };
        if entries.insert(TypeId::of::<T>(), entry).is_some() {
            tracing::debug!(payload = type_name::<T>(), "replaced transform registration");
        }
    }

    /// Resolve the apply-function for `T`.
    pub fn get<T: Stamped>(&self) -> BufferResult<DoTransform<T>> {
        let unregistered = || BufferError::UnregisteredType {
            type_name: type_name::<T>(),
        };

        let entries = match self.entries.read() {
            Ok(guard) => guard,
            Err(poison) => poison.into_inner(),
        };
        let entry = entries.get(&TypeId::of::<T>()).ok_or_else(unregistered)?;
        let apply = Arc::clone(&entry.apply)
            .downcast::<TypedApply<T>>()
            .map_err(|_| unregistered())?;

        Ok(DoTransform {
            apply,
            _payload: PhantomData,
        })
    }

    pub fn contains<T: Stamped>(&self) -> bool {
        match self.entries.read() {
            Ok(guard) => guard.contains_key(&TypeId::of::<T>()),
            Err(poison) => poison.into_inner().contains_key(&TypeId::of::<T>()),
        }
    }

    /// Names of all registered payload types (for diagnostics).
    pub fn registered_types(&self) -> Vec<&'static str> {
        let entries = match self.entries.read() {
            Ok(guard) => guard,
            Err(poison) => poison.into_inner(),
        };
        let mut names: Vec<_> = entries.values().map(|e| e.type_name).collect();
        names.sort_unstable();
        names
    }
}

impl Default for TransformRegistration {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tf::msg::{Header, Point};
    use crate::tf::time::Time;

    #[test]
    fn empty_registry_rejects_lookups() {
        let registry = TransformRegistration::new();
        assert!(!registry.contains::<PointStamped>());

        let err = registry.get::<PointStamped>().err().expect("must fail");
        match err {
            BufferError::UnregisteredType { type_name } => {
                assert!(type_name.ends_with("PointStamped"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn geometry_registry_contains_builtin_payloads() {
        let registry = TransformRegistration::with_geometry_types();
        assert!(registry.contains::<PointStamped>());
        assert!(registry.contains::<Vector3Stamped>());
        assert!(registry.contains::<PoseStamped>());
        assert!(registry.contains::<TransformStamped>());
        assert_eq!(registry.registered_types().len(), 4);
    }

    #[test]
    fn reregistration_overwrites() {
        let registry = TransformRegistration::new();
        registry.add::<PointStamped, _>(|p, _| p.clone());
        registry.add::<PointStamped, _>(|p, _| PointStamped {
            header: p.header.clone(),
            point: Point::new(42.0, 0.0, 0.0),
        });

        let input = PointStamped {
            header: Header::new("a", Time::ZERO),
            point: Point::default(),
        };
        let out = registry
            .get::<PointStamped>()
            .unwrap()
            .apply(&input, &TransformStamped::default());
        assert_eq!(out.point.x, 42.0);
        assert_eq!(registry.registered_types().len(), 1);
    }
}
