//! Component model: loadable units and their embedded fragments
//!
//! A component is an opaque unit of server-side logic owned by the loader.
//! Page-style components embed named fragments; whether a given component
//! does is a capability query on the trait, not a downcast.

use std::fmt;

mod page;
mod registry;

pub use page::Page;
pub use registry::{FragmentRegistry, SharedFragments};

/// A loadable unit of server-side logic.
///
/// Instances live in the loader's cache and are shared by reference; every
/// implementation carries `Debug` so shared handles can be printed. The one
/// capability resolution cares about is whether the component embeds
/// fragments.
pub trait Component: Send + Sync + fmt::Debug {
    /// The fragment registry, for components that embed fragments.
    ///
    /// The default answers "none"; plain components opt out by doing nothing.
    /// Resolution treats "none" the same as a fragment that does not exist.
    fn fragments(&self) -> Option<&FragmentRegistry> {
        None
    }
}

/// A named fragment embedded in a parent component.
///
/// Fragments are full components in their own right and can be returned
/// wherever a component is expected.
pub trait Fragment: Component {
    /// Teardown hook run by the owning registry when the parent component is
    /// dropped.
    ///
    /// The default is a no-op. Fragments holding resources that need an
    /// explicit release override it.
    fn unload(&self) {}
}
