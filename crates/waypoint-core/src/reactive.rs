//! Reactivity contract and runtimes.
//!
//! The navigation engine mutates its state exclusively through a
//! [`ReactivityAdapter`]. Observers of that state (a rendering layer, a
//! test, a devtools panel) subscribe through the same adapter, so the
//! engine stays agnostic of which reactive ecosystem is plugged in.

mod adapter;
mod effect;
mod observable;
mod plain;
pub mod runtime;

pub use adapter::{ObservableCell, ReactivityAdapter, SignalAdapter};
pub use effect::{Disposer, autorun};
pub use observable::{Observable, batch};
pub use plain::{PlainAdapter, PlainCell};
