/// Kuro-Roku Core — tree aggregation and treemap layout for the library views.
///
/// This crate contains the data model and layout logic with zero UI
/// dependencies. It is designed to be reusable across different frontends
/// (desktop shell, CLI tooling, tests).
///
/// Both engines are pure, synchronous transformations over an in-memory
/// record collection: they perform no I/O, hold no shared state, and are
/// safe to call from any thread. Outputs are rebuilt wholesale whenever the
/// input collection changes.
///
/// # Modules
///
/// - [`model`] — Scanned-file records and the arena-allocated aggregation tree.
/// - [`layout`] — Squarified treemap tiling.
pub mod layout;
pub mod model;
