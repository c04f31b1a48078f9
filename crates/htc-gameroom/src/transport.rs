use htc_holdem::{PlayerView, PublicView};

use crate::table::TableId;

/// The core's only outbound dependency (spec §6.2): after every
/// successful mutation the mediator hands the fresh views to a
/// `Transport`, which is responsible for actually getting them to
/// sockets, rooms, or wherever clients live. The core never imports a
/// socket library directly — that boundary is exactly what let the
/// teacher swap `actix-ws` in without this crate knowing.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn publish_public(&self, table: TableId, view: PublicView);
    async fn publish_player(&self, table: TableId, player: htc_core::SeatId, view: PlayerView);
}

/// A transport that drops every view. Useful for tests and for tables
/// nobody has subscribed to yet.
pub struct NullTransport;

#[async_trait::async_trait]
impl Transport for NullTransport {
    async fn publish_public(&self, _table: TableId, _view: PublicView) {}
    async fn publish_player(&self, _table: TableId, _player: htc_core::SeatId, _view: PlayerView) {}
}
