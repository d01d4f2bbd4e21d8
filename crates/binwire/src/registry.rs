// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide codec registry and type resolution.
//!
//! Resolution order (first match wins):
//! 1. Exact hit in the registry -- primitives seeded up front, previously
//!    resolved composites, and explicitly pre-registered pairs.
//! 2. Structural construction via [`Wire::codec`], recursing through
//!    [`resolve`] for element types.
//!
//! Newly built pairs are inserted insert-if-absent before being returned,
//! so repeated resolution of the same type is a cache hit.
//!
//! # Thread Safety
//!
//! The registry is a `DashMap` behind a `OnceLock`. Concurrent first-time
//! resolution of the same type races benignly: the earliest insert wins and
//! every caller observes the same immutable pair afterwards. Entries are
//! write-once per key and live for the process lifetime.

use crate::codec::Codec;
use crate::error::{WireError, WireResult};
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::{Arc, OnceLock};

/// Types that can travel the wire.
///
/// Implementing this trait is the opt-in marker for serialization: the
/// single required method supplies the type's decoder/encoder pair. All
/// primitives, `Box<[T]>`, `Vec<T>`, `HashMap<K, V>`, and tuples up to
/// arity 8 implement it already; user types implement it by hand (or
/// declare an open enum with [`wire_enum!`](crate::wire_enum)).
///
/// `codec()` builds the pair from scratch. Callers go through [`resolve`]
/// instead, which consults the registry first and caches the result.
pub trait Wire: Sized + 'static {
    /// Build the structural codec pair for this type.
    fn codec() -> Codec<Self>;
}

/// Type-erased registry slot. The concrete payload is always the
/// `Codec<T>` whose `TypeId` keys the slot.
type Registered = Arc<dyn Any + Send + Sync>;

fn registry() -> &'static DashMap<TypeId, Registered> {
    static REGISTRY: OnceLock<DashMap<TypeId, Registered>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let map = DashMap::new();
        seed_primitives(&map);
        map
    })
}

// Primitive pairs exist before the first resolve() or register() call can
// observe the map, so registering a primitive always reports a duplicate.
// Primitive codecs are leaves and never re-enter the registry.
fn seed_primitives(map: &DashMap<TypeId, Registered>) {
    fn put<T: Wire>(map: &DashMap<TypeId, Registered>) {
        map.insert(TypeId::of::<T>(), Arc::new(T::codec()) as Registered);
    }
    put::<u8>(map);
    put::<i8>(map);
    put::<u16>(map);
    put::<i16>(map);
    put::<u32>(map);
    put::<i32>(map);
    put::<u64>(map);
    put::<i64>(map);
    put::<u128>(map);
    put::<i128>(map);
    put::<f32>(map);
    put::<f64>(map);
    put::<bool>(map);
    put::<char>(map);
    put::<String>(map);
    #[cfg(feature = "decimal")]
    put::<rust_decimal::Decimal>(map);
}

fn cached<T: 'static>() -> Option<Codec<T>> {
    registry()
        .get(&TypeId::of::<T>())
        .and_then(|slot| slot.downcast_ref::<Codec<T>>().cloned())
}

/// Resolve the codec pair for `T`, building and caching it on first use.
pub fn resolve<T: Wire>() -> Codec<T> {
    if let Some(pair) = cached::<T>() {
        log::trace!("codec cache hit for {}", std::any::type_name::<T>());
        return pair;
    }

    // Build outside the map lock: structural construction recurses into
    // resolve() for element types.
    let built = T::codec();
    let slot = registry().entry(TypeId::of::<T>()).or_insert_with(|| {
        log::debug!("resolved codec for {}", std::any::type_name::<T>());
        Arc::new(built.clone()) as Registered
    });
    match slot.downcast_ref::<Codec<T>>() {
        Some(pair) => pair.clone(),
        // Unreachable by construction; the freshly built pair is equivalent.
        None => built,
    }
}

/// Resolve from the registry only, without structural construction.
///
/// This is the fail path for types that neither implement [`Wire`] nor
/// were pre-registered: the error names the type and the expected route.
pub fn try_resolve<T: 'static>() -> WireResult<Codec<T>> {
    cached::<T>().ok_or(WireError::Unresolvable {
        type_name: std::any::type_name::<T>(),
    })
}

/// Pre-register a codec pair for `T`, overriding structural resolution.
///
/// Must happen before the first use of `T` (directly or as an element of a
/// composite); registering a type that already has a pair is an error.
/// Primitive pairs are seeded up front, so primitives can never be
/// overridden.
pub fn register<T: 'static>(pair: Codec<T>) -> WireResult<()> {
    use dashmap::mapref::entry::Entry;
    match registry().entry(TypeId::of::<T>()) {
        Entry::Occupied(_) => Err(WireError::DuplicateRegistration {
            type_name: std::any::type_name::<T>(),
        }),
        Entry::Vacant(slot) => {
            log::debug!("registered codec for {}", std::any::type_name::<T>());
            slot.insert(Arc::new(pair) as Registered);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_caches_and_returns_the_same_pair() {
        // u64 is seeded; both calls hit the same registry entry.
        let first = resolve::<u64>();
        let second = resolve::<u64>();

        let mut buf = Vec::new();
        first.encode(&mut buf, &7).expect("encode");
        let mut cursor = std::io::Cursor::new(buf);
        assert_eq!(second.decode(&mut cursor).expect("decode"), 7);
    }

    #[test]
    fn try_resolve_fails_for_unknown_types() {
        struct NotOnTheWire;
        let err = try_resolve::<NotOnTheWire>().unwrap_err();
        match err {
            WireError::Unresolvable { type_name } => {
                assert!(type_name.contains("NotOnTheWire"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        struct Once;
        let make = || {
            Codec::<Once>::new(|_| Ok(Once), |_, _| Ok(()))
        };
        register(make()).expect("first registration");
        let err = register(make()).unwrap_err();
        match err {
            WireError::DuplicateRegistration { type_name } => {
                assert!(type_name.contains("Once"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn registering_a_primitive_is_a_duplicate() {
        // u16 is seeded before any call can reach the map, so this fails
        // no matter whether u16 was resolved earlier in the process.
        let err = register(Codec::<u16>::new(|_| Ok(0), |_, _| Ok(()))).unwrap_err();
        match err {
            WireError::DuplicateRegistration { type_name } => assert_eq!(type_name, "u16"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn registered_pair_is_resolvable() {
        struct Marker(u8);
        register(Codec::<Marker>::new(
            |r| {
                let mut b = [0u8; 1];
                r.read_exact(&mut b)?;
                Ok(Marker(b[0]))
            },
            |w, v| Ok(w.write_all(&[v.0])?),
        ))
        .expect("register");

        let codec = try_resolve::<Marker>().expect("resolve");
        let mut buf = Vec::new();
        codec.encode(&mut buf, &Marker(9)).expect("encode");
        assert_eq!(buf, [9]);
    }

    #[test]
    fn concurrent_first_resolution_settles_on_one_pair() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    let codec = resolve::<(u16, u16)>();
                    let mut buf = Vec::new();
                    codec.encode(&mut buf, &(1, 2)).expect("encode");
                    buf
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("join"), [1, 0, 2, 0]);
        }
    }
}
