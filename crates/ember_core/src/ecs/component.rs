// component.rs - Compile-time component identification
//
// Components are identified by u32 bit indices, not Rust TypeIds. The
// game's component set is closed and small, so membership of an entity is
// a single bitmask and ALL/ANY query filters are two integer compares.

/// Component identifier: a bit index into an entity's component mask.
/// Must be unique per component type and less than 32.
pub type ComponentId = u32;

/// Trait for store-managed components.
///
/// Implementors should be plain data: the store owns every instance and
/// hands out references only through generation-checked lookups.
pub trait Component: 'static + Sized {
    /// Globally unique component ID (bit index).
    const ID: ComponentId;

    /// Human-readable name for errors and debugging.
    const NAME: &'static str;

    /// Mask with only this component's bit set.
    const MASK: u32 = 1 << Self::ID;
}

/// A set of component types, used to filter queries.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ComponentSet(u32);

impl ComponentSet {
    pub const EMPTY: Self = Self(0);

    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a component type to the set.
    pub const fn with<T: Component>(self) -> Self {
        Self(self.0 | T::MASK)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if `mask` carries every component in this set.
    pub const fn all_in(self, mask: u32) -> bool {
        mask & self.0 == self.0
    }

    /// True if `mask` carries at least one component in this set.
    pub const fn any_in(self, mask: u32) -> bool {
        mask & self.0 != 0
    }
}

/// Helper macro to implement the Component trait.
///
/// # Example
/// ```ignore
/// #[derive(Clone, Copy)]
/// struct Position { x: f32, y: f32 }
///
/// define_component!(Position, 1, "Position");
/// ```
#[macro_export]
macro_rules! define_component {
    ($ty:ty, $id:expr, $name:expr) => {
        impl $crate::ecs::Component for $ty {
            const ID: $crate::ecs::ComponentId = $id;
            const NAME: &'static str = $name;
        }
    };
}
