//! The table mediator (spec §4.E): owns membership and the single
//! `HoldemState` per table, serializes every mutation, and broadcasts
//! fresh views through an injected [`Transport`]. [`Casino`] extends
//! this to many tables behind one registry, since nothing about the
//! mediator's contract depends on there being exactly one table.

mod casino;
mod table;
mod transport;

pub use casino::Casino;
pub use table::{HandRecord, Table, TableId};
pub use transport::{NullTransport, Transport};
